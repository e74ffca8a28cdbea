//! Worker agent.
//!
//! A worker receives the problem parameters once, announces itself, then
//! completes partial solutions from the master until it is told to stop.
//! Every completed work unit is answered with exactly one readiness signal,
//! followed by a result batch only when solutions were found.

use crate::board::{is_valid_assignment, Column};
use crate::error::{QueensError, Result};
use crate::parallel::channel::WorkerLink;
use crate::parallel::config::WaitStrategy;
use crate::parallel::messages::{Control, Incoming, ProblemParams, Rank, Readiness, MASTER_RANK};
use crate::search::{Enumerator, SearchStatistics, SolutionStore};
use std::thread;
use tracing::{debug, trace};

/// Lifecycle of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    AwaitingParams,
    Idle,
    Computing,
    Terminated,
}

/// Summary of everything one worker did.
#[derive(Debug, Clone, Default)]
pub struct WorkerReport {
    pub rank: Rank,
    /// Parameters received from the master, if any arrived.
    pub params: Option<ProblemParams>,
    pub work_units: u64,
    pub solutions_found: u64,
    /// Batches sent, i.e. work units that produced at least one solution.
    pub batches_sent: u64,
    /// Empty polls while idle. Always 0 with [`WaitStrategy::Blocking`].
    pub idle_polls: u64,
    pub statistics: SearchStatistics,
}

/// A worker bound to one [`WorkerLink`].
pub struct Worker<L: WorkerLink> {
    link: L,
    wait_strategy: WaitStrategy,
    state: WorkerState,
    enumerator: Enumerator,
    report: WorkerReport,
}

impl<L: WorkerLink> Worker<L> {
    pub fn new(link: L, wait_strategy: WaitStrategy) -> Self {
        let report = WorkerReport {
            rank: link.rank(),
            ..Default::default()
        };
        Self {
            link,
            wait_strategy,
            state: WorkerState::AwaitingParams,
            enumerator: Enumerator::new(),
            report,
        }
    }

    /// Serve work units until the termination signal arrives.
    ///
    /// On a fatal error the master is sent an abort before this returns.
    pub fn run(mut self) -> Result<WorkerReport> {
        match self.serve() {
            Ok(()) => Ok(self.report),
            Err(e) => {
                if !matches!(e, QueensError::Disconnected { .. }) {
                    // The master may already be gone; the error is returned either way.
                    let _ = self.link.send_abort(&e.to_string());
                }
                Err(e)
            }
        }
    }

    fn serve(&mut self) -> Result<()> {
        let params = match self.link.recv_incoming()? {
            Incoming::Control(Control::Params(params)) => params,
            Incoming::Control(Control::Terminate) => {
                debug!(rank = self.report.rank, "terminated before parameters");
                self.enter(WorkerState::Terminated);
                return Ok(());
            }
            Incoming::Work(_) => {
                return Err(QueensError::protocol(
                    MASTER_RANK,
                    "work unit arrived before parameters",
                ))
            }
        };
        params.validate()?;
        self.report.params = Some(params);

        let mut board: Vec<Column> = vec![0; params.n];
        let mut store = SolutionStore::new(params.n);

        self.link.send_readiness(Readiness::Initial)?;
        self.enter(WorkerState::Idle);

        loop {
            match self.wait_next()? {
                Incoming::Work(partial) => {
                    self.enter(WorkerState::Computing);
                    self.complete(params, &partial, &mut board, &mut store)?;
                    self.enter(WorkerState::Idle);
                }
                Incoming::Control(Control::Terminate) => break,
                Incoming::Control(Control::Params(_)) => {
                    return Err(QueensError::protocol(MASTER_RANK, "parameters sent twice"));
                }
            }
        }

        self.enter(WorkerState::Terminated);
        self.report.statistics = self.enumerator.statistics();
        Ok(())
    }

    fn enter(&mut self, state: WorkerState) {
        trace!(rank = self.report.rank, from = ?self.state, to = ?state, "worker state");
        self.state = state;
    }

    /// Next thing the idle worker has to act on.
    fn wait_next(&mut self) -> Result<Incoming> {
        match self.wait_strategy {
            WaitStrategy::Blocking => self.link.recv_incoming(),
            WaitStrategy::Polling { interval } => loop {
                // Termination is checked on every pass, before new work.
                if let Some(control) = self.link.try_recv_control()? {
                    return Ok(Incoming::Control(control));
                }
                if let Some(partial) = self.link.try_recv_work()? {
                    return Ok(Incoming::Work(partial));
                }
                self.report.idle_polls += 1;
                thread::sleep(interval);
            },
        }
    }

    /// Run rows `[k, n)` on top of `partial` and report the result.
    fn complete(
        &mut self,
        params: ProblemParams,
        partial: &[Column],
        board: &mut [Column],
        store: &mut SolutionStore,
    ) -> Result<()> {
        if partial.len() != params.k {
            return Err(QueensError::protocol(
                MASTER_RANK,
                format!(
                    "partial solution has {} rows, expected {}",
                    partial.len(),
                    params.k
                ),
            ));
        }
        if !is_valid_assignment(partial, params.n) {
            return Err(QueensError::protocol(
                MASTER_RANK,
                format!("partial solution {:?} is not a valid placement", partial),
            ));
        }

        board[..params.k].copy_from_slice(partial);
        let stats = self
            .enumerator
            .search(board, params.k, params.n, store)?;
        let batch = store.take_batch();

        self.report.work_units += 1;
        self.report.solutions_found += stats.solutions_found;
        debug!(
            rank = self.report.rank,
            ?partial,
            solutions = stats.solutions_found,
            "work unit complete"
        );

        if batch.is_empty() {
            self.link.send_readiness(Readiness::NoSolutionReady)
        } else {
            self.link.send_readiness(Readiness::SolutionReady)?;
            self.link.send_batch(batch)?;
            self.report.batches_sent += 1;
            Ok(())
        }
    }
}
