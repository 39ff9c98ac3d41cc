use std::sync::Arc;
use std::time::Instant;

use crate::pipeline::batch_executor::{report_result, BatchExecutor};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::scoring::domain::score_result::{ScoreRequest, ScoreResult};
use crate::scoring::domain::scoring_engine::ScoringEngine;

/// Scores every request on the calling thread.
pub struct SequentialBatchExecutor;

impl BatchExecutor for SequentialBatchExecutor {
    fn execute(
        &self,
        engine: Arc<ScoringEngine>,
        requests: Vec<ScoreRequest>,
        logger: &mut dyn PipelineLogger,
    ) -> Result<Vec<ScoreResult>, Box<dyn std::error::Error>> {
        let total = requests.len();
        let mut results = Vec::with_capacity(total);

        for (i, request) in requests.iter().enumerate() {
            let start = Instant::now();
            let result = engine.score(request);
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
            report_result(logger, &result, elapsed_ms, i + 1, total);
            results.push(result);
        }

        Ok(results)
    }
}
