pub mod json_progress_store;
