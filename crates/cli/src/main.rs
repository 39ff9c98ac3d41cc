use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use pronounce_core::lessons::domain::lesson::LessonLevel;
use pronounce_core::lessons::domain::lesson_catalog::LessonCatalog;
use pronounce_core::lessons::infrastructure::json_lesson_source::JsonLessonSource;
use pronounce_core::pipeline::batch_executor::BatchExecutor;
use pronounce_core::pipeline::infrastructure::sequential_batch_executor::SequentialBatchExecutor;
use pronounce_core::pipeline::infrastructure::threaded_batch_executor::ThreadedBatchExecutor;
use pronounce_core::pipeline::learner_preferences_use_case::LearnerPreferencesUseCase;
use pronounce_core::pipeline::pipeline_logger::{LoggingPipelineLogger, PipelineLogger};
use pronounce_core::pipeline::record_attempt_use_case::{AttemptOutcome, RecordAttemptUseCase};
use pronounce_core::pipeline::score_speech_use_case::{ScoreSpeechUseCase, SpeechAssessment};
use pronounce_core::progress::domain::progress_repository::ProgressRepository;
use pronounce_core::progress::infrastructure::json_progress_store::JsonProgressStore;
use pronounce_core::scoring::domain::language::Language;
use pronounce_core::scoring::domain::score_result::{ScoreRequest, ScoreResult, WordStatus};
use pronounce_core::scoring::domain::scoring_engine::ScoringEngine;
use pronounce_core::scoring::domain::word_aligner::AlignmentStrategy;
use pronounce_core::shared::constants::{
    DEFAULT_HISTORY_LIMIT, DEFAULT_LEADERBOARD_LIMIT, MAX_PAGE_LIMIT,
};
use pronounce_core::shared::settings::Settings;
use pronounce_core::transcription::domain::audio_clip::AudioClip;
use pronounce_core::transcription::infrastructure::spitch_transcriber::SpitchTranscriber;

/// Pronunciation scoring for English, Yoruba, Igbo and Hausa practice.
#[derive(Parser)]
#[command(name = "pronounce")]
struct Cli {
    /// Settings file (defaults to the per-user config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a transcript against a target phrase or a lesson item.
    Score {
        /// What the recognizer heard.
        transcript: String,
        /// Phrase the learner was asked to say.
        #[arg(long, required_unless_present = "item", conflicts_with = "item")]
        target: Option<String>,
        /// Lesson item to score against; its text is the target.
        #[arg(long)]
        item: Option<u64>,
        #[command(flatten)]
        scoring: ScoringArgs,
    },
    /// Transcribe an audio file, then score it against a target phrase.
    Transcribe {
        /// Recorded attempt (wav, mp3, ogg, webm, m4a, flac).
        audio: PathBuf,
        /// Phrase the learner was asked to say.
        target: String,
        /// Language of the recording; defaults to the configured language.
        #[arg(long)]
        language: Option<String>,
        /// Alignment strategy: positional or sequence.
        #[arg(long)]
        alignment: Option<String>,
    },
    /// Score a JSON array of requests.
    Batch {
        /// JSON file holding `[{target_text, transcript, confidence?, language?}]`.
        input: PathBuf,
        /// Write results here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Worker threads (1 = score on the main thread).
        #[arg(long)]
        workers: Option<usize>,
        /// Alignment strategy: positional or sequence.
        #[arg(long)]
        alignment: Option<String>,
    },
    /// Score an attempt at a lesson item and credit it to a learner.
    Record {
        learner: String,
        lesson_item: u64,
        transcript: String,
        /// Score against this phrase instead of the item's text.
        #[arg(long)]
        target: Option<String>,
        #[command(flatten)]
        scoring: ScoringArgs,
    },
    /// List lessons, optionally filtered.
    Lessons {
        /// Language tag or code; defaults to the learner's choice with --learner.
        #[arg(long)]
        language: Option<String>,
        /// beginner, intermediate or advanced.
        #[arg(long)]
        level: Option<String>,
        /// Filter by this learner's practice language.
        #[arg(long)]
        learner: Option<String>,
    },
    /// Show the items of a lesson.
    Lesson { id: u64 },
    /// Show or change the language a learner practises.
    Prefs {
        learner: String,
        /// New practice language (tag or code).
        #[arg(long)]
        language: Option<String>,
    },
    /// List a learner's recent attempts, newest first.
    History {
        learner: String,
        #[arg(long, default_value_t = 0)]
        skip: usize,
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,
    },
    /// Show learners ranked by XP.
    Leaderboard {
        #[arg(long, default_value_t = DEFAULT_LEADERBOARD_LIMIT)]
        limit: usize,
    },
}

#[derive(Args)]
struct ScoringArgs {
    /// Recognizer confidence (0.0-1.0).
    #[arg(long, default_value = "1.0")]
    confidence: f64,

    /// Language tag: english, yoruba, igbo or hausa. Overrides the lesson's
    /// language and the learner's choice.
    #[arg(long)]
    language: Option<String>,

    /// Alignment strategy: positional or sequence.
    #[arg(long)]
    alignment: Option<String>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli.command)?;

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load(),
    };

    match cli.command {
        Command::Score {
            transcript,
            target,
            item,
            scoring,
        } => {
            let engine = build_engine(scoring.alignment.as_deref(), &settings)?;
            let request = build_request(target, item, transcript, &scoring, None, &settings)?;
            let result = engine.score(&request);
            print_result(&result, cli.json)
        }
        Command::Transcribe {
            audio,
            target,
            language,
            alignment,
        } => {
            let engine = build_engine(alignment.as_deref(), &settings)?;
            let language = language_or_default(language, &settings);
            let assessment = run_transcribe(&audio, &target, &language, engine, &settings)?;
            print_assessment(&assessment, cli.json)
        }
        Command::Batch {
            input,
            output,
            workers,
            alignment,
        } => {
            let engine = build_engine(alignment.as_deref(), &settings)?;
            let workers = workers.unwrap_or(settings.batch_workers).max(1);
            run_batch(&input, output.as_deref(), workers, engine)
        }
        Command::Record {
            learner,
            lesson_item,
            transcript,
            target,
            scoring,
        } => {
            let engine = build_engine(scoring.alignment.as_deref(), &settings)?;
            let store = open_store(&settings)?;
            let preferred = store.load_preferences(&learner)?.map(|p| p.target_language);
            let request = build_request(
                target,
                Some(lesson_item),
                transcript,
                &scoring,
                preferred,
                &settings,
            )?;
            let mut use_case = RecordAttemptUseCase::new(Box::new(store), engine);
            let outcome = use_case.execute(&learner, lesson_item, &request, chrono::Utc::now())?;
            print_outcome(&outcome, cli.json)
        }
        Command::Lessons {
            language,
            level,
            learner,
        } => {
            let catalog = load_catalog(&settings)?;
            let language = match (language, learner) {
                (Some(tag), _) => Some(parse_language(&tag)?),
                (None, Some(learner)) => {
                    let use_case = LearnerPreferencesUseCase::new(Box::new(open_store(&settings)?));
                    Some(
                        use_case
                            .stored_language(&learner)?
                            .unwrap_or(Language::DEFAULT_TARGET),
                    )
                }
                (None, None) => None,
            };
            let level = level.as_deref().map(parse_level).transpose()?;
            let lessons = catalog.lessons(language, level);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&lessons)?);
            } else if lessons.is_empty() {
                println!("No lessons match");
            } else {
                for lesson in &lessons {
                    println!(
                        "{:>3}  {:<8} {:<12} {} ({} items)",
                        lesson.id,
                        lesson.language.tag(),
                        lesson.level.tag(),
                        lesson.title,
                        lesson.items.len()
                    );
                }
            }
            Ok(())
        }
        Command::Lesson { id } => {
            let catalog = load_catalog(&settings)?;
            let items = catalog
                .items(id)
                .ok_or_else(|| format!("No items found for lesson {id}"))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(items)?);
            } else {
                for item in items {
                    match &item.hint {
                        Some(hint) => println!("{:>4}  {:<32} {}", item.id, item.text, hint),
                        None => println!("{:>4}  {}", item.id, item.text),
                    }
                }
            }
            Ok(())
        }
        Command::Prefs { learner, language } => {
            let mut use_case = LearnerPreferencesUseCase::new(Box::new(open_store(&settings)?));
            let now = chrono::Utc::now();
            let preferences = match language {
                Some(tag) => use_case.set_target_language(&learner, parse_language(&tag)?, now)?,
                None => use_case.get(&learner, now)?,
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&preferences)?);
            } else {
                println!("{} practises {}", preferences.learner_id, preferences.target_language);
            }
            Ok(())
        }
        Command::History {
            learner,
            skip,
            limit,
        } => {
            let store = open_store(&settings)?;
            let attempts = store.attempts(&learner, skip, limit)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&attempts)?);
            } else if attempts.is_empty() {
                println!("No attempts recorded for {learner}");
            } else {
                for attempt in &attempts {
                    println!(
                        "{}  item {:<5} {:>5.1}  {} ({})",
                        attempt.created_at.format("%Y-%m-%d %H:%M"),
                        attempt.lesson_item_id,
                        attempt.score,
                        attempt.target_text,
                        attempt.language
                    );
                }
            }
            Ok(())
        }
        Command::Leaderboard { limit } => {
            let store = open_store(&settings)?;
            let leaders = store.leaderboard(limit)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&leaders)?);
            } else {
                for (rank, progress) in leaders.iter().enumerate() {
                    println!(
                        "{:>3}. {:<20} {:>6} xp  streak {}",
                        rank + 1,
                        progress.learner_id,
                        progress.xp,
                        progress.streak
                    );
                }
            }
            Ok(())
        }
    }
}

fn run_transcribe(
    audio_path: &Path,
    target: &str,
    language: &str,
    engine: ScoringEngine,
    settings: &Settings,
) -> Result<SpeechAssessment, Box<dyn std::error::Error>> {
    let bytes = fs::read(audio_path)
        .map_err(|e| format!("Failed to read {}: {e}", audio_path.display()))?;
    let file_name = audio_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("audio.wav");
    let clip = AudioClip::from_file_name(bytes, file_name);

    let transcriber = SpitchTranscriber::new(settings.transcription.clone())?;
    let use_case = ScoreSpeechUseCase::new(Box::new(transcriber), engine);
    use_case.execute(&clip, target, language)
}

fn run_batch(
    input: &Path,
    output: Option<&Path>,
    workers: usize,
    engine: ScoringEngine,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)
        .map_err(|e| format!("Failed to read {}: {e}", input.display()))?;
    let requests: Vec<ScoreRequest> = serde_json::from_str(&json)
        .map_err(|e| format!("Invalid batch file {}: {e}", input.display()))?;

    let executor: Box<dyn BatchExecutor> = if workers > 1 {
        Box::new(ThreadedBatchExecutor::new(workers))
    } else {
        Box::new(SequentialBatchExecutor)
    };
    let mut logger = LoggingPipelineLogger::default();
    let results = executor.execute(Arc::new(engine), requests, &mut logger)?;
    logger.summary();

    let rendered = serde_json::to_string_pretty(&results)?;
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            log::info!("Wrote {} results to {}", results.len(), path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn build_engine(
    alignment: Option<&str>,
    settings: &Settings,
) -> Result<ScoringEngine, Box<dyn std::error::Error>> {
    let strategy = match alignment {
        Some(name) => parse_alignment(name)?,
        None => settings.alignment,
    };
    log::debug!("Using {strategy} alignment");
    Ok(ScoringEngine::with_strategy(strategy))
}

fn open_store(settings: &Settings) -> Result<JsonProgressStore, Box<dyn std::error::Error>> {
    let path = settings
        .progress_store_path()
        .ok_or("Could not determine where to keep learner progress; set PRONOUNCE_STORE")?;
    Ok(JsonProgressStore::open(path)?)
}

fn load_catalog(settings: &Settings) -> Result<LessonCatalog, Box<dyn std::error::Error>> {
    Ok(match &settings.lessons_path {
        Some(path) => JsonLessonSource::load(path)?,
        None => JsonLessonSource::builtin()?,
    })
}

fn language_or_default(language: Option<String>, settings: &Settings) -> String {
    language.unwrap_or_else(|| settings.default_language.clone())
}

/// Request for one attempt. Without `--target` the lesson item supplies
/// the phrase and language. Otherwise the language comes from `--language`,
/// then the learner's choice, then settings.
fn build_request(
    target: Option<String>,
    item: Option<u64>,
    transcript: String,
    scoring: &ScoringArgs,
    preferred: Option<Language>,
    settings: &Settings,
) -> Result<ScoreRequest, Box<dyn std::error::Error>> {
    let mut request = match (target, item) {
        (Some(target), _) => {
            let fallback = preferred.map(|l| l.tag().to_string());
            let language = language_or_default(fallback, settings);
            ScoreRequest::new(target, transcript, scoring.confidence, language)
        }
        (None, Some(id)) => load_catalog(settings)?
            .practice_request(id, &transcript, scoring.confidence)
            .ok_or_else(|| format!("Lesson item {id} not found"))?,
        (None, None) => return Err("Give a target phrase or a lesson item".into()),
    };
    if let Some(language) = &scoring.language {
        request.language = language.clone();
    }
    Ok(request)
}

fn parse_language(tag: &str) -> Result<Language, Box<dyn std::error::Error>> {
    Language::from_tag(tag)
        .or_else(|| Language::from_code(tag))
        .ok_or_else(|| {
            format!("Language must be one of: english, yoruba, igbo, hausa, got '{tag}'").into()
        })
}

fn parse_level(tag: &str) -> Result<LessonLevel, Box<dyn std::error::Error>> {
    LessonLevel::from_tag(tag).ok_or_else(|| {
        format!("Level must be beginner, intermediate or advanced, got '{tag}'").into()
    })
}

fn parse_alignment(name: &str) -> Result<AlignmentStrategy, Box<dyn std::error::Error>> {
    AlignmentStrategy::from_name(name).ok_or_else(|| {
        format!("Alignment must be 'positional' or 'sequence', got '{name}'").into()
    })
}

fn validate(command: &Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Score { scoring, .. } | Command::Record { scoring, .. } => {
            validate_scoring(scoring)?;
        }
        Command::Transcribe {
            audio,
            language,
            alignment,
            ..
        } => {
            if !audio.exists() {
                return Err(format!("Audio file not found: {}", audio.display()).into());
            }
            if let Some(tag) = language {
                if Language::from_tag(tag).is_none() {
                    return Err(format!(
                        "Language must be one of: english, yoruba, igbo, hausa, got '{tag}'"
                    )
                    .into());
                }
            }
            if let Some(name) = alignment {
                parse_alignment(name)?;
            }
        }
        Command::Batch {
            input,
            workers,
            alignment,
            ..
        } => {
            if !input.exists() {
                return Err(format!("Input file not found: {}", input.display()).into());
            }
            if *workers == Some(0) {
                return Err("Workers must be at least 1".into());
            }
            if let Some(name) = alignment {
                parse_alignment(name)?;
            }
        }
        Command::Lessons {
            language, level, ..
        } => {
            if let Some(tag) = language {
                parse_language(tag)?;
            }
            if let Some(tag) = level {
                parse_level(tag)?;
            }
        }
        Command::Prefs {
            language: Some(tag),
            ..
        } => {
            parse_language(tag)?;
        }
        Command::Prefs { .. } | Command::Lesson { .. } => {}
        Command::History { limit, .. } | Command::Leaderboard { limit } => {
            validate_limit(*limit)?;
        }
    }
    Ok(())
}

fn validate_scoring(scoring: &ScoringArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !(0.0..=1.0).contains(&scoring.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            scoring.confidence
        )
        .into());
    }
    if let Some(name) = &scoring.alignment {
        parse_alignment(name)?;
    }
    Ok(())
}

fn validate_limit(limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(format!("Limit must be between 1 and {MAX_PAGE_LIMIT}, got {limit}").into());
    }
    Ok(())
}

fn print_result(result: &ScoreResult, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }
    println!("Score: {:.1}", result.score);
    for feedback in &result.word_feedback {
        let marker = match feedback.status {
            WordStatus::Correct => "✓",
            WordStatus::Close => "~",
            WordStatus::Wrong => "✗",
        };
        if feedback.suggestion.is_empty() {
            println!("  {marker} {}", feedback.word);
        } else {
            println!("  {marker} {:<16} {}", feedback.word, feedback.suggestion);
        }
    }
    println!("{}", result.suggestions);
    Ok(())
}

fn print_assessment(
    assessment: &SpeechAssessment,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(assessment)?);
        return Ok(());
    }
    println!(
        "Heard: \"{}\" (confidence {:.2})",
        assessment.transcription.transcript, assessment.transcription.confidence
    );
    print_result(&assessment.result, false)
}

fn print_outcome(outcome: &AttemptOutcome, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }
    print_result(&outcome.result, false)?;
    println!(
        "{}: {} xp, {}-day streak",
        outcome.progress.learner_id, outcome.progress.xp, outcome.progress.streak
    );
    Ok(())
}
