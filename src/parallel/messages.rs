//! Message types exchanged between the master and its workers.

use crate::board::Column;
use crate::error::{QueensError, Result};
use std::fmt;

/// Participant index. The master is always rank 0, workers are `1..=W`.
pub type Rank = usize;

/// Rank of the coordinating process.
pub const MASTER_RANK: Rank = 0;

/// Board size and split level, broadcast once before any work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemParams {
    /// Board size `N`.
    pub n: usize,
    /// Split level `k`: rows `[0, k)` are enumerated by the master.
    pub k: usize,
}

impl ProblemParams {
    pub fn new(n: usize, k: usize) -> Self {
        Self { n, k }
    }

    /// Reject `N == 0` and `k > N`.
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(QueensError::InvalidParams(
                "board size must be at least 1".into(),
            ));
        }
        if self.k > self.n {
            return Err(QueensError::InvalidParams(format!(
                "split level {} exceeds board size {}",
                self.k, self.n
            )));
        }
        Ok(())
    }

    /// True when the master's own enumeration already reaches full boards.
    pub fn is_degenerate(&self) -> bool {
        self.k == self.n
    }
}

impl fmt::Display for ProblemParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={} k={}", self.n, self.k)
    }
}

/// Worker announcement that it is free, and whether a batch follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// First request for work; no batch follows.
    Initial,
    /// The previous work unit produced solutions; a batch follows.
    SolutionReady,
    /// The previous work unit produced nothing; no batch follows.
    NoSolutionReady,
}

impl Readiness {
    /// Whether this signal closes out a dispatched work unit.
    pub fn completes_work(self) -> bool {
        !matches!(self, Readiness::Initial)
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readiness::Initial => write!(f, "initial"),
            Readiness::SolutionReady => write!(f, "solution-ready"),
            Readiness::NoSolutionReady => write!(f, "no-solution-ready"),
        }
    }
}

/// Control-channel message from master to a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Params(ProblemParams),
    Terminate,
}

/// Whatever reaches an idle worker first: a control message or a work unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    Control(Control),
    /// A partial solution, expected to hold exactly `k` columns.
    Work(Vec<Column>),
}
