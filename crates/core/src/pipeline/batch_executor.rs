use std::sync::Arc;

use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::scoring::domain::score_result::{ScoreRequest, ScoreResult};
use crate::scoring::domain::scoring_engine::ScoringEngine;

/// Abstracts how a batch of score requests is executed.
///
/// This is a port (application-layer interface). Infrastructure provides
/// concrete implementations (single-threaded, worker pool). Results come
/// back in request order regardless of how the work was scheduled.
pub trait BatchExecutor: Send {
    fn execute(
        &self,
        engine: Arc<ScoringEngine>,
        requests: Vec<ScoreRequest>,
        logger: &mut dyn PipelineLogger,
    ) -> Result<Vec<ScoreResult>, Box<dyn std::error::Error>>;
}

/// Reports one scored request to the logger.
pub(crate) fn report_result(
    logger: &mut dyn PipelineLogger,
    result: &ScoreResult,
    duration_ms: f64,
    done: usize,
    total: usize,
) {
    logger.scored(result, duration_ms);
    logger.progress(done, total);
}
