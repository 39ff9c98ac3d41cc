use serde::Serialize;

use crate::scoring::domain::language::Language;
use crate::scoring::domain::score_result::ScoreResult;
use crate::scoring::domain::scoring_engine::ScoringEngine;
use crate::transcription::domain::audio_clip::AudioClip;
use crate::transcription::domain::transcriber::{Transcriber, Transcription};

/// What was heard and how it scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechAssessment {
    pub transcription: Transcription,
    pub result: ScoreResult,
}

/// Audio pipeline: transcribe → score.
pub struct ScoreSpeechUseCase {
    transcriber: Box<dyn Transcriber>,
    engine: ScoringEngine,
}

impl ScoreSpeechUseCase {
    pub fn new(transcriber: Box<dyn Transcriber>, engine: ScoringEngine) -> Self {
        Self {
            transcriber,
            engine,
        }
    }

    /// Transcribes `audio` in the named language and scores the transcript
    /// against `target_text`. The service's confidence is clamped to `[0, 1]`
    /// before it weights the score.
    pub fn execute(
        &self,
        audio: &AudioClip,
        target_text: &str,
        language_tag: &str,
    ) -> Result<SpeechAssessment, Box<dyn std::error::Error>> {
        let language = Language::from_tag(language_tag)
            .ok_or_else(|| format!("Unsupported transcription language '{language_tag}'"))?;
        if audio.is_empty() {
            return Err(format!("Audio clip '{}' is empty", audio.file_name()).into());
        }

        let transcription = self.transcriber.transcribe(audio, language)?;
        log::info!(
            "Heard \"{}\" (confidence {:.2})",
            transcription.transcript,
            transcription.confidence
        );

        let result = self.engine.score_attempt(
            target_text,
            &transcription.transcript,
            transcription.clamped_confidence(),
            language.tag(),
        );

        Ok(SpeechAssessment {
            transcription,
            result,
        })
    }
}
