use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use crate::pipeline::batch_executor::{report_result, BatchExecutor};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::scoring::domain::score_result::{ScoreRequest, ScoreResult};
use crate::scoring::domain::scoring_engine::ScoringEngine;

const DEFAULT_CHANNEL_CAPACITY: usize = 64;

type Job = (usize, ScoreRequest);
type Scored = (usize, ScoreResult, f64);

/// Scores a batch on a pool of worker threads.
///
/// Layout: `feeder → workers[n] → main [reorder/report]`
///
/// The engine is stateless, so workers share one instance. Results arrive
/// out of order and are slotted back into request order on the main thread,
/// which also owns the logger.
pub struct ThreadedBatchExecutor {
    workers: usize,
    channel_capacity: usize,
}

impl ThreadedBatchExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for ThreadedBatchExecutor {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::new(workers)
    }
}

impl BatchExecutor for ThreadedBatchExecutor {
    fn execute(
        &self,
        engine: Arc<ScoringEngine>,
        requests: Vec<ScoreRequest>,
        logger: &mut dyn PipelineLogger,
    ) -> Result<Vec<ScoreResult>, Box<dyn std::error::Error>> {
        let total = requests.len();
        if total == 0 {
            return Ok(Vec::new());
        }
        let cap = self.channel_capacity;
        let worker_count = self.workers.min(total);
        log::info!("Scoring {total} attempts on {worker_count} worker threads");

        let (job_tx, job_rx) = crossbeam_channel::bounded::<Job>(cap);
        let (scored_tx, scored_rx) = crossbeam_channel::bounded::<Scored>(cap);

        let feeder_handle = spawn_feeder(requests, job_tx);
        let worker_handles: Vec<JoinHandle<()>> = (0..worker_count)
            .map(|_| spawn_worker(engine.clone(), job_rx.clone(), scored_tx.clone()))
            .collect();
        drop(job_rx);
        drop(scored_tx);

        let mut slots: Vec<Option<ScoreResult>> = vec![None; total];
        let mut done = 0;
        for (index, result, elapsed_ms) in scored_rx {
            done += 1;
            report_result(logger, &result, elapsed_ms, done, total);
            slots[index] = Some(result);
        }

        join_threads(feeder_handle, worker_handles)?;

        slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| "batch workers stopped before scoring every request".into())
    }
}

fn spawn_feeder(
    requests: Vec<ScoreRequest>,
    job_tx: crossbeam_channel::Sender<Job>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for job in requests.into_iter().enumerate() {
            if job_tx.send(job).is_err() {
                break;
            }
        }
    })
}

fn spawn_worker(
    engine: Arc<ScoringEngine>,
    job_rx: crossbeam_channel::Receiver<Job>,
    scored_tx: crossbeam_channel::Sender<Scored>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for (index, request) in job_rx {
            let start = Instant::now();
            let result = engine.score(&request);
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
            if scored_tx.send((index, result, elapsed_ms)).is_err() {
                break;
            }
        }
    })
}

fn join_threads(
    feeder_handle: JoinHandle<()>,
    worker_handles: Vec<JoinHandle<()>>,
) -> Result<(), Box<dyn std::error::Error>> {
    if feeder_handle.join().is_err() {
        return Err("batch feeder thread panicked".into());
    }
    for handle in worker_handles {
        if handle.join().is_err() {
            return Err("batch worker thread panicked".into());
        }
    }
    Ok(())
}
