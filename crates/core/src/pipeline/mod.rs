pub mod batch_executor;
pub mod infrastructure;
pub mod learner_preferences_use_case;
pub mod pipeline_logger;
pub mod record_attempt_use_case;
pub mod score_speech_use_case;
