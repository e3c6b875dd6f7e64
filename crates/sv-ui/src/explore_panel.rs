//! Genre/song explorer panel
//!
//! Genre selectbox, dependent song selectbox, playback controls, and the
//! feature glossary. Data (genre list, playlist) is supplied by the app
//! each frame; the panel only owns the widget state.

use egui::{ComboBox, RichText, Ui};

use crate::glossary::FEATURE_GLOSSARY;
use crate::icons;

/// Request to play one song, emitted when the user presses play.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest {
    pub genre: String,
    pub filename: String,
}

/// Panel state
pub struct ExplorePanel {
    selected_genre: Option<String>,
    selected_song: Option<String>,
    /// Last playback failure, shown in place of the player
    playback_error: Option<String>,
    /// Song currently loaded into the sink, if any
    now_playing: Option<PlayRequest>,
}

impl ExplorePanel {
    pub fn new() -> Self {
        Self {
            selected_genre: None,
            selected_song: None,
            playback_error: None,
            now_playing: None,
        }
    }

    pub fn selected_genre(&self) -> Option<&str> {
        self.selected_genre.as_deref()
    }

    /// Record a playback failure; cleared on the next successful play.
    pub fn set_playback_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("Playback notice: {}", message);
        self.playback_error = Some(message);
        self.now_playing = None;
    }

    pub fn set_now_playing(&mut self, request: PlayRequest) {
        self.playback_error = None;
        self.now_playing = Some(request);
    }

    /// Draw the panel. `genres` is the dataset's genre list and `playlist`
    /// the songs of the currently selected genre, both in dataset row order.
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        genres: &[String],
        playlist: &[String],
    ) -> Option<PlayRequest> {
        if genres.is_empty() {
            ui.label("No genres in the dataset");
            return None;
        }

        // Default to the first genre, as the selectboxes are never empty
        if self
            .selected_genre
            .as_ref()
            .map_or(true, |g| !genres.contains(g))
        {
            self.selected_genre = Some(genres[0].clone());
            self.selected_song = None;
        }
        let genre = self.selected_genre.clone().unwrap_or_default();

        let mut genre_changed = false;
        ComboBox::from_label("Pick a genre")
            .selected_text(&genre)
            .show_ui(ui, |ui| {
                for candidate in genres {
                    let response = ui.selectable_label(candidate == &genre, candidate);
                    if response.clicked() && candidate != &genre {
                        self.selected_genre = Some(candidate.clone());
                        genre_changed = true;
                    }
                }
            });

        if genre_changed {
            // The song list below belongs to the previous genre this frame;
            // reset and let the next frame repopulate.
            self.selected_song = None;
            return None;
        }

        if playlist.is_empty() {
            ui.label(RichText::new("No songs for this genre").weak());
            return None;
        }

        if self
            .selected_song
            .as_ref()
            .map_or(true, |s| !playlist.contains(s))
        {
            self.selected_song = Some(playlist[0].clone());
        }
        let song = self.selected_song.clone().unwrap_or_default();

        ComboBox::from_label("Pick a song")
            .selected_text(&song)
            .show_ui(ui, |ui| {
                for candidate in playlist {
                    if ui.selectable_label(candidate == &song, candidate).clicked() {
                        self.selected_song = Some(candidate.clone());
                    }
                }
            });

        ui.add_space(4.0);

        let mut request = None;
        ui.horizontal(|ui| {
            if ui
                .button(format!("{} Play", icons::PLAY))
                .on_hover_text("Play the selected song")
                .clicked()
            {
                request = Some(PlayRequest {
                    genre: genre.clone(),
                    filename: song.clone(),
                });
            }

            match (&self.playback_error, &self.now_playing) {
                (Some(error), _) => {
                    ui.label(RichText::new(error).color(ui.style().visuals.warn_fg_color));
                }
                (None, Some(playing)) => {
                    ui.label(
                        RichText::new(format!("{} {}", icons::MUSIC, playing.filename)).weak(),
                    );
                }
                (None, None) => {}
            }
        });

        ui.add_space(8.0);
        egui::CollapsingHeader::new("See description of features")
            .default_open(true)
            .show(ui, |ui| {
                for (name, description) in FEATURE_GLOSSARY {
                    ui.horizontal_wrapped(|ui| {
                        ui.strong(*name);
                        ui.label(*description);
                    });
                }
            });

        request
    }
}

impl Default for ExplorePanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_request_fields() {
        let request = PlayRequest {
            genre: "blues".to_string(),
            filename: "blues.00000.wav".to_string(),
        };
        assert_eq!(request.genre, "blues");
        assert_eq!(request.filename, "blues.00000.wav");
    }

    #[test]
    fn test_error_clears_on_play() {
        let mut panel = ExplorePanel::new();
        panel.set_playback_error("Audio file not found");
        assert!(panel.playback_error.is_some());

        panel.set_now_playing(PlayRequest {
            genre: "jazz".to_string(),
            filename: "jazz.00000.wav".to_string(),
        });
        assert!(panel.playback_error.is_none());
    }
}
