pub const SPITCH_API_URL: &str = "https://api.spitch.app/v1/transcribe";

pub const SPITCH_API_KEY_ENV: &str = "SPITCH_API_KEY";
pub const SPITCH_API_URL_ENV: &str = "SPITCH_API_URL";
pub const PROGRESS_STORE_ENV: &str = "PRONOUNCE_STORE";
pub const LESSONS_PATH_ENV: &str = "PRONOUNCE_LESSONS";

pub const APP_DIR_NAME: &str = "Pronounce";
pub const SETTINGS_FILENAME: &str = "settings.json";
pub const PROGRESS_STORE_FILENAME: &str = "progress.json";

pub const DEFAULT_LANGUAGE_TAG: &str = "english";
/// Transcription confidence assumed when the caller supplies none.
pub const DEFAULT_CONFIDENCE: f64 = 1.0;

pub const DEFAULT_HISTORY_LIMIT: usize = 10;
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;
pub const MAX_PAGE_LIMIT: usize = 100;

pub const DEFAULT_BATCH_WORKERS: usize = 4;
pub const TRANSCRIPTION_TIMEOUT_SECS: u64 = 30;
