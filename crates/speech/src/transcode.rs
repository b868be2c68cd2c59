//! Audio transcoding for speech processing
//!
//! Normalizes browser recordings (typically WebM/Opus) to the mono
//! 16 kHz PCM WAV layout the recognizer expects, by shelling out to
//! FFmpeg.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, error, instrument, warn};

/// File-to-file audio transcoder
///
/// Uses FFmpeg for transcoding. FFmpeg must be installed on the system.
#[derive(Debug, Clone, Default)]
pub struct Transcoder {
    /// FFmpeg binary path (defaults to "ffmpeg" in PATH)
    ffmpeg_path: Option<String>,
}

impl Transcoder {
    /// Create a new transcoder with default settings
    #[must_use]
    pub const fn new() -> Self {
        Self { ffmpeg_path: None }
    }

    /// Create a new transcoder with a custom FFmpeg path
    #[must_use]
    pub fn with_ffmpeg_path(path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: Some(path.into()),
        }
    }

    /// Get the FFmpeg binary path
    fn ffmpeg_path(&self) -> &str {
        self.ffmpeg_path.as_deref().unwrap_or("ffmpeg")
    }

    /// Check if FFmpeg is available on the system
    #[instrument(skip(self))]
    pub async fn is_available(&self) -> bool {
        Command::new(self.ffmpeg_path())
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok_and(|status| status.success())
    }

    /// Transcode `input` into a mono 16 kHz WAV file at `output`
    ///
    /// Returns `true` on success and `false` on any failure: a missing
    /// input file, a spawn error, or a nonzero FFmpeg exit. Failure
    /// detail goes to the log only. When the input file does not exist
    /// FFmpeg is never invoked. The output file is not inspected.
    #[instrument(skip(self))]
    pub async fn to_normalized_wav(&self, input: &Path, output: &Path) -> bool {
        if !tokio::fs::try_exists(input).await.unwrap_or(false) {
            warn!(input = %input.display(), "Input file does not exist, skipping transcode");
            return false;
        }

        debug!(
            input = %input.display(),
            output = %output.display(),
            "Transcoding to normalized wav"
        );

        // ffmpeg -y -i <input> -ar 16000 -ac 1 <output>
        let result = Command::new(self.ffmpeg_path())
            .arg("-y") // Overwrite output
            .arg("-i")
            .arg(input)
            .args(["-ar", "16000", "-ac", "1"])
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        match result {
            Ok(output) if output.status.success() => {
                debug!("Transcode successful");
                true
            },
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                error!(
                    status = ?output.status.code(),
                    "FFmpeg transcode failed: {stderr}"
                );
                false
            },
            Err(e) => {
                error!("Failed to run FFmpeg: {e}");
                false
            },
        }
    }
}
