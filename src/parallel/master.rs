//! Master coordinator.
//!
//! The master enumerates rows `[0, k)` itself. Every partial solution the
//! enumerator produces becomes a work unit: the master waits for any worker
//! to announce it is ready (collecting that worker's previous batch if it
//! has one), then hands the unit to that worker. Once its own enumeration
//! is exhausted it drains the outstanding results and terminates every
//! worker.

use crate::board::Column;
use crate::error::{QueensError, Result};
use crate::parallel::channel::MasterLink;
use crate::parallel::messages::{ProblemParams, Rank, Readiness};
use crate::search::{search_levels, SolutionStore};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Lifecycle of a master run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterState {
    /// Own enumeration running; each partial solution is dispatched.
    Dispatching,
    /// Enumeration exhausted; waiting for busy workers to report.
    Draining,
    /// Sending the termination signal to every worker.
    Terminating,
    Done,
}

/// What the master saw of one worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerTally {
    pub rank: Rank,
    /// Work units handed to this worker.
    pub work_units: u64,
    /// Complete solutions received from this worker.
    pub solutions: u64,
}

/// Outcome of a master run.
#[derive(Debug, Clone)]
pub struct MasterReport {
    pub params: ProblemParams,
    /// Every received batch, concatenated in the order it arrived.
    pub solutions: SolutionStore,
    pub work_units_dispatched: u64,
    pub terminations_sent: usize,
    /// Workers still holding a work unit when the run ended. Always 0 for a
    /// completed run.
    pub liveness_at_exit: usize,
    pub tallies: Vec<WorkerTally>,
    pub elapsed_time: Duration,
}

impl MasterReport {
    pub fn solution_count(&self) -> usize {
        self.solutions.len()
    }
}

#[derive(Debug, Default)]
struct WorkerSlot {
    greeted: bool,
    busy: bool,
    tally: WorkerTally,
}

/// Coordinator for one run over a [`MasterLink`].
pub struct Master<L: MasterLink> {
    link: L,
    params: ProblemParams,
    state: MasterState,
    workers: BTreeMap<Rank, WorkerSlot>,
    /// Workers currently holding a work unit.
    liveness: usize,
    dispatched: u64,
    solutions: SolutionStore,
}

impl<L: MasterLink> Master<L> {
    pub fn new(link: L, params: ProblemParams) -> Self {
        let workers = link
            .worker_ranks()
            .into_iter()
            .map(|rank| {
                let slot = WorkerSlot {
                    tally: WorkerTally {
                        rank,
                        ..Default::default()
                    },
                    ..Default::default()
                };
                (rank, slot)
            })
            .collect();

        Self {
            link,
            params,
            state: MasterState::Dispatching,
            workers,
            liveness: 0,
            dispatched: 0,
            solutions: SolutionStore::new(params.n),
        }
    }

    /// Run the whole protocol and return the aggregated solutions.
    ///
    /// Parameters are validated before anything is broadcast. A worker that
    /// never reports stalls this call indefinitely.
    pub fn run(mut self) -> Result<MasterReport> {
        let started = Instant::now();
        let params = self.params;

        params.validate()?;
        if self.workers.is_empty() && !params.is_degenerate() {
            return Err(QueensError::InvalidParams(
                "at least one worker is required when k < n".into(),
            ));
        }

        for &rank in self.workers.keys() {
            self.link.send_params(rank, params)?;
        }
        info!(%params, workers = self.workers.len(), "parameters broadcast");

        self.enter(MasterState::Dispatching);
        let mut board: Vec<Column> = vec![0; params.n];
        if params.is_degenerate() {
            search_levels(&mut board, 0, params.n, &mut self.solutions)?;
        } else {
            let mut dispatch = |partial: &[Column]| self.dispatch(partial);
            search_levels(&mut board, 0, params.k, &mut dispatch)?;
        }

        self.enter(MasterState::Draining);
        while self.liveness > 0 {
            self.receive_report()?;
        }

        for &rank in self.workers.keys() {
            reject_pending_batch(&self.link, rank)?;
        }

        self.enter(MasterState::Terminating);
        let mut terminations_sent = 0;
        for &rank in self.workers.keys() {
            self.link.send_terminate(rank)?;
            terminations_sent += 1;
        }

        self.enter(MasterState::Done);
        let report = MasterReport {
            params,
            work_units_dispatched: self.dispatched,
            terminations_sent,
            liveness_at_exit: self.liveness,
            tallies: self.workers.into_values().map(|slot| slot.tally).collect(),
            solutions: self.solutions,
            elapsed_time: started.elapsed(),
        };
        info!(
            solutions = report.solution_count(),
            work_units = report.work_units_dispatched,
            elapsed_ms = report.elapsed_time.as_millis() as u64,
            "run complete"
        );
        Ok(report)
    }

    fn enter(&mut self, state: MasterState) {
        debug!(from = ?self.state, to = ?state, liveness = self.liveness, "master state");
        self.state = state;
    }

    /// Hand one partial solution to whichever worker is ready first.
    fn dispatch(&mut self, partial: &[Column]) -> Result<()> {
        let rank = self.receive_report()?;
        self.link.send_work(rank, partial)?;

        let slot = self
            .workers
            .get_mut(&rank)
            .ok_or_else(|| QueensError::protocol(rank, "no worker with this rank"))?;
        slot.busy = true;
        slot.tally.work_units += 1;
        self.liveness += 1;
        self.dispatched += 1;
        debug!(rank, ?partial, liveness = self.liveness, "work unit dispatched");
        Ok(())
    }

    /// Wait for one readiness signal, collect the batch it announces, and
    /// return the now idle worker's rank.
    fn receive_report(&mut self) -> Result<Rank> {
        let (rank, readiness) = self.link.recv_readiness()?;
        let n = self.params.n;
        let slot = self
            .workers
            .get_mut(&rank)
            .ok_or_else(|| QueensError::protocol(rank, "readiness from unknown rank"))?;

        if readiness.completes_work() {
            if !slot.busy {
                return Err(QueensError::protocol(
                    rank,
                    format!("{} without an outstanding work unit", readiness),
                ));
            }
        } else if slot.greeted {
            return Err(QueensError::protocol(rank, "repeated initial readiness"));
        }

        let batch = match readiness {
            Readiness::SolutionReady => Some(self.link.recv_batch(rank)?),
            _ => None,
        };
        reject_pending_batch(&self.link, rank)?;

        if let Some(batch) = batch {
            check_batch(rank, &batch, n)?;
            slot.tally.solutions += (batch.len() / n) as u64;
            self.solutions.extend_batch(&batch);
        }
        if readiness.completes_work() {
            slot.busy = false;
            self.liveness -= 1;
        } else {
            slot.greeted = true;
        }

        debug!(rank, %readiness, liveness = self.liveness, "worker ready");
        Ok(rank)
    }
}

/// Fail if `rank` has a batch queued that no `SolutionReady` announced.
fn reject_pending_batch<L: MasterLink>(link: &L, rank: Rank) -> Result<()> {
    match link.pending_batch(rank)? {
        Some(batch) => Err(QueensError::protocol(
            rank,
            format!("batch of {} columns without solution-ready", batch.len()),
        )),
        None => Ok(()),
    }
}

/// A batch must hold whole boards of `n` columns, each column in `[0, n)`.
fn check_batch(rank: Rank, batch: &[Column], n: usize) -> Result<()> {
    if batch.len() % n != 0 {
        return Err(QueensError::protocol(
            rank,
            format!("batch of {} columns is not a multiple of {}", batch.len(), n),
        ));
    }
    if let Some(&col) = batch.iter().find(|&&col| col as usize >= n) {
        return Err(QueensError::protocol(
            rank,
            format!("column {} out of range for n = {}", col, n),
        ));
    }
    Ok(())
}
