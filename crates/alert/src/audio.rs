use anyhow::Result;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Plays the configured alert clips back to back, each to completion.
///
/// Playback failures are logged and skipped; audio must never block the
/// rest of the alert path.
pub struct AudioPlayer {
    clips: Vec<PathBuf>,
}

impl AudioPlayer {
    pub fn new(clips: Vec<PathBuf>) -> Self {
        Self { clips }
    }

    pub fn play_all(&self) {
        if self.clips.is_empty() {
            return;
        }

        let (_stream, handle) = match OutputStream::try_default() {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(error = %e, "No audio output device, skipping alert sound");
                return;
            }
        };

        for clip in &self.clips {
            tracing::info!(clip = %clip.display(), "Playing alert clip");
            if let Err(e) = play_clip(&handle, clip) {
                tracing::warn!(clip = %clip.display(), error = %e, "Alert clip playback failed");
            }
        }
    }
}

fn play_clip(handle: &OutputStreamHandle, clip: &Path) -> Result<()> {
    let file = BufReader::new(File::open(clip)?);
    let source = Decoder::new(file)?;

    let sink = Sink::try_new(handle)?;
    sink.append(source);
    sink.sleep_until_end();

    Ok(())
}
