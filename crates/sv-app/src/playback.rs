//! Audio playback via rodio
//!
//! The dashboard never decodes audio itself; the raw file bytes go straight
//! into a rodio sink.

use std::io::Cursor;

use anyhow::{Context as _, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::info;

/// Owns the output stream and at most one playing sink.
pub struct AudioPlayer {
    // The stream must stay alive for the sink to keep playing
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
}

impl AudioPlayer {
    /// Open the default output device.
    ///
    /// Failure (no audio device) degrades the player to a notice in the
    /// explore panel; it never takes the page down.
    pub fn new() -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("no audio output device available")?;
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
        })
    }

    /// Decode and play one WAV file's bytes, replacing any current playback.
    pub fn play_wav(&mut self, bytes: Vec<u8>) -> Result<()> {
        self.stop();

        let sink = Sink::try_new(&self.handle).context("failed to open audio sink")?;
        let source = Decoder::new(Cursor::new(bytes)).context("failed to decode audio")?;
        sink.append(source);

        info!("Playback started");
        self.sink = Some(sink);
        Ok(())
    }

    /// Toggle pause on the current sink, if any.
    pub fn toggle_pause(&self) {
        if let Some(sink) = &self.sink {
            if sink.is_paused() {
                sink.play();
            } else {
                sink.pause();
            }
        }
    }

    pub fn is_paused(&self) -> bool {
        self.sink.as_ref().map_or(false, |sink| sink.is_paused())
    }

    /// Whether a song is loaded and not yet finished.
    pub fn is_active(&self) -> bool {
        self.sink.as_ref().map_or(false, |sink| !sink.empty())
    }

    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}
