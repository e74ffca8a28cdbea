//! Configuration for a master/worker run.

use std::fmt;
use std::time::Duration;

/// Default sleep between polls when workers busy-wait.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_micros(50);

/// How an idle worker waits for "new work" versus "terminate".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitStrategy {
    /// Block on both channels at once.
    #[default]
    Blocking,
    /// Check the termination channel, then the work channel, then sleep for
    /// `interval`. Costs CPU while idle.
    Polling { interval: Duration },
}

impl WaitStrategy {
    pub fn polling() -> Self {
        WaitStrategy::Polling {
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl fmt::Display for WaitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitStrategy::Blocking => write!(f, "blocking"),
            WaitStrategy::Polling { .. } => write!(f, "polling"),
        }
    }
}

/// Configuration for an in-process master/worker cluster.
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Number of worker threads to spawn (the master runs on the caller's thread).
    pub num_workers: usize,
    /// How idle workers wait for their next message.
    pub wait_strategy: WaitStrategy,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get().max(1),
            wait_strategy: WaitStrategy::default(),
        }
    }
}

impl ClusterConfig {
    /// Set the number of workers (at least 1).
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    pub fn with_wait_strategy(mut self, wait_strategy: WaitStrategy) -> Self {
        self.wait_strategy = wait_strategy;
        self
    }

    /// Switch to polling with the given interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.wait_strategy = WaitStrategy::Polling { interval };
        self
    }
}
