//! In-process cluster: one master on the calling thread, one thread per worker.

use crate::error::{QueensError, Result};
use crate::parallel::channel::create_channels;
use crate::parallel::config::ClusterConfig;
use crate::parallel::master::{Master, MasterReport};
use crate::parallel::messages::ProblemParams;
use crate::parallel::worker::{Worker, WorkerReport};
use std::thread::JoinHandle;
use tracing::{info, warn};

/// Result of a cluster run.
#[derive(Debug)]
pub struct ClusterResult {
    pub master: MasterReport,
    /// One report per worker, in rank order.
    pub workers: Vec<WorkerReport>,
}

impl ClusterResult {
    pub fn solution_count(&self) -> usize {
        self.master.solution_count()
    }
}

/// Enumerate every solution for `params` with a master and
/// `config.num_workers` workers.
pub fn run_cluster(params: ProblemParams, config: &ClusterConfig) -> Result<ClusterResult> {
    params.validate()?;
    let num_workers = config.num_workers.max(1);
    info!(%params, workers = num_workers, wait = %config.wait_strategy, "starting cluster");

    let (master_link, worker_links) = create_channels(num_workers);

    let handles: Vec<_> = worker_links
        .into_iter()
        .map(|link| {
            let wait_strategy = config.wait_strategy;
            std::thread::spawn(move || Worker::new(link, wait_strategy).run())
        })
        .collect();

    // Workers that never got work may send their initial readiness after the
    // master returns, so the endpoints stay open until they have exited.
    let outcome = Master::new(&master_link, params).run();

    let master = match outcome {
        Ok(report) => report,
        Err(e) => {
            // Unblock the workers before joining them.
            drop(master_link);
            if let Err(worker_error) = join_workers(handles) {
                warn!(error = %worker_error, "worker failed after master error");
            }
            return Err(e);
        }
    };

    let workers = join_workers(handles)?;
    Ok(ClusterResult { master, workers })
}

fn join_workers(handles: Vec<JoinHandle<Result<WorkerReport>>>) -> Result<Vec<WorkerReport>> {
    let mut reports = Vec::with_capacity(handles.len());
    let mut first_error = None;

    for (index, handle) in handles.into_iter().enumerate() {
        let rank = index + 1;
        match handle.join() {
            Ok(Ok(report)) => reports.push(report),
            Ok(Err(e)) => {
                warn!(rank, error = %e, "worker failed");
                first_error.get_or_insert(e);
            }
            Err(_) => {
                first_error.get_or_insert(QueensError::WorkerPanicked { rank });
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(reports),
    }
}
