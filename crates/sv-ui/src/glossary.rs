//! Short written descriptions of the audio features

/// Feature name and description shown in the "feature glossary" panel.
pub const FEATURE_GLOSSARY: &[(&str, &str)] = &[
    (
        "chroma_stft",
        "Pitch-class energy profile of the signal; summarizes which of the \
         twelve pitch classes dominate (unit: intensity).",
    ),
    (
        "rms",
        "Root-mean-square level, the average loudness of the track measured \
         over short windows (unit: intensity).",
    ),
    (
        "rolloff",
        "Frequency below which most of the spectral energy sits; marks the \
         practical bass-to-treble extent of the signal (unit: Hz).",
    ),
    (
        "harmony",
        "Mean of the harmonic component after separating it from percussive \
         energy; reflects how strongly pitched content dominates.",
    ),
    (
        "tempo",
        "Estimated speed of the performance (unit: beats per minute).",
    ),
];
