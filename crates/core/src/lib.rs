pub mod lessons;
pub mod pipeline;
pub mod progress;
pub mod scoring;
pub mod shared;
pub mod transcription;
