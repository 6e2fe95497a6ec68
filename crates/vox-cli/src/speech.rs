//! Audio boundary backed by external commands
//!
//! The assistant shells out for both directions of audio: a transcribe
//! command whose stdout is taken as the spoken text, and a speak command
//! that receives the response on stdin. Either side failing degrades to
//! text, never aborts the cycle.

use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::SpeechSettings;

/// External-command speech I/O
pub struct SpeechBoundary {
    transcribe_command: Option<String>,
    speak_command: Option<String>,
}

impl SpeechBoundary {
    pub fn new(settings: &SpeechSettings) -> Self {
        Self {
            transcribe_command: settings.transcribe_command.clone(),
            speak_command: settings.speak_command.clone(),
        }
    }

    /// Whether voice input is available at all
    pub fn can_transcribe(&self) -> bool {
        self.transcribe_command.is_some()
    }

    /// Capture one utterance and return the transcribed text.
    ///
    /// Any failure (no command configured, spawn error, non-zero exit)
    /// returns an empty string, which the cycle treats as a no-op.
    pub async fn transcribe(&self) -> String {
        let Some(command) = &self.transcribe_command else {
            tracing::warn!("No transcribe command configured; voice input is unavailable");
            return String::new();
        };

        let output = match Command::new("sh").arg("-c").arg(command).output().await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("Failed to run transcribe command: {}", e);
                return String::new();
            }
        };

        if !output.status.success() {
            tracing::warn!(
                "Transcribe command exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return String::new();
        }

        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Speak the response text. Returns false when nothing was spoken, so
    /// the caller can fall back to printing.
    pub async fn speak(&self, text: &str) -> bool {
        let Some(command) = &self.speak_command else {
            return false;
        };

        let child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::piped())
            .spawn();

        let mut child = match child {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!("Failed to run speak command: {}", e);
                return false;
            }
        };

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(text.as_bytes()).await {
                tracing::warn!("Failed to write to speak command: {}", e);
                return false;
            }
        }

        match child.wait().await {
            Ok(status) if status.success() => true,
            Ok(status) => {
                tracing::warn!("Speak command exited with {}", status);
                false
            }
            Err(e) => {
                tracing::warn!("Failed to wait for speak command: {}", e);
                false
            }
        }
    }
}
