pub mod audio_clip;
pub mod transcriber;
