pub mod spitch_transcriber;
