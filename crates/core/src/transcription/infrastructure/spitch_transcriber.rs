use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::domain::language::Language;
use crate::shared::constants::{SPITCH_API_URL, TRANSCRIPTION_TIMEOUT_SECS};
use crate::transcription::domain::audio_clip::AudioClip;
use crate::transcription::domain::transcriber::{Transcriber, Transcription};

#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("no API key configured for the transcription service (set SPITCH_API_KEY)")]
    MissingApiKey,
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("invalid audio content type '{content_type}': {source}")]
    ContentType {
        content_type: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("transcription request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("transcription failed with status {status}")]
    Status { status: u16 },
    #[error("malformed transcription response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Connection settings for the Spitch speech-to-text API.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub api_url: String,
    pub api_key: Option<String>,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            api_url: SPITCH_API_URL.to_string(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for TranscriptionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptionConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Deserialize)]
struct SpitchResponse {
    #[serde(default, alias = "text")]
    transcript: String,
    #[serde(default)]
    confidence: f64,
}

/// Transcribes audio through the Spitch HTTP API.
///
/// The clip is posted as the multipart `audio` field to
/// `<api_url>?language=<code>` with bearer authentication.
pub struct SpitchTranscriber {
    config: TranscriptionConfig,
    client: reqwest::blocking::Client,
}

impl SpitchTranscriber {
    pub fn new(config: TranscriptionConfig) -> Result<Self, TranscriptionError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(TRANSCRIPTION_TIMEOUT_SECS))
            .build()
            .map_err(TranscriptionError::Client)?;
        Ok(Self { config, client })
    }

    fn request(
        &self,
        audio: &AudioClip,
        language: Language,
    ) -> Result<Transcription, TranscriptionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(TranscriptionError::MissingApiKey)?;

        let part = Part::bytes(audio.bytes().to_vec())
            .file_name(audio.file_name().to_string())
            .mime_str(audio.content_type())
            .map_err(|e| TranscriptionError::ContentType {
                content_type: audio.content_type().to_string(),
                source: e,
            })?;
        let form = Form::new().part("audio", part);

        let url = &self.config.api_url;
        log::debug!(
            "Transcribing {} bytes of {} audio ({language})",
            audio.bytes().len(),
            audio.content_type()
        );
        let response = self
            .client
            .post(url)
            .query(&[("language", language.transcription_code())])
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .map_err(|e| TranscriptionError::Request {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(TranscriptionError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| TranscriptionError::Request {
            url: url.clone(),
            source: e,
        })?;
        parse_response(&body)
    }
}

impl Transcriber for SpitchTranscriber {
    fn transcribe(
        &self,
        audio: &AudioClip,
        language: Language,
    ) -> Result<Transcription, Box<dyn std::error::Error>> {
        Ok(self.request(audio, language)?)
    }
}

/// Reads the service's JSON body. Missing fields mean an empty transcript
/// and zero confidence.
fn parse_response(body: &str) -> Result<Transcription, TranscriptionError> {
    let parsed: SpitchResponse = serde_json::from_str(body).map_err(TranscriptionError::Decode)?;
    Ok(Transcription {
        transcript: parsed.transcript,
        confidence: parsed.confidence,
    })
}
