use serde::{Deserialize, Serialize};

use super::audio_clip::AudioClip;
use crate::scoring::domain::language::Language;

/// What the speech-to-text service heard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub transcript: String,
    /// Service-reported reliability, nominally in `[0, 1]`.
    pub confidence: f64,
}

impl Transcription {
    /// Confidence limited to `[0, 1]`; NaN counts as no confidence.
    pub fn clamped_confidence(&self) -> f64 {
        if self.confidence.is_nan() {
            0.0
        } else {
            self.confidence.clamp(0.0, 1.0)
        }
    }
}

/// Domain interface for speech-to-text transcription.
///
/// Implementations forward the clip to a recognizer for the given language.
pub trait Transcriber: Send {
    fn transcribe(
        &self,
        audio: &AudioClip,
        language: Language,
    ) -> Result<Transcription, Box<dyn std::error::Error>>;
}
