//! Master/worker distribution of the search.
//!
//! The master enumerates the first `k` rows and turns every partial
//! solution into a work unit; workers complete the remaining rows and send
//! their solutions back.
//!
//! # Protocol
//!
//! 1. The master sends `(n, k)` to every worker.
//! 2. Each worker answers with an *initial* readiness signal.
//! 3. For every partial solution, the master waits for any readiness
//!    signal, collects the batch that follows a *solution-ready* signal,
//!    and sends the partial solution to that worker.
//! 4. When its own enumeration is exhausted, the master keeps collecting
//!    until no worker holds a work unit, then sends *terminate* to every
//!    worker exactly once.
//!
//! # Example
//!
//! ```no_run
//! use nqueens_mw::parallel::{run_cluster, ClusterConfig, ProblemParams};
//!
//! let config = ClusterConfig::default().with_workers(4);
//! let result = run_cluster(ProblemParams::new(10, 3), &config)?;
//! assert_eq!(result.solution_count(), 724);
//! # Ok::<(), nqueens_mw::QueensError>(())
//! ```

pub mod channel;
pub mod cluster;
pub mod config;
pub mod master;
pub mod messages;
pub mod worker;

pub use channel::{create_channels, ChannelMasterLink, ChannelWorkerLink, MasterLink, WorkerLink};
pub use cluster::{run_cluster, ClusterResult};
pub use config::{ClusterConfig, WaitStrategy};
pub use master::{Master, MasterReport, MasterState, WorkerTally};
pub use messages::{Control, Incoming, ProblemParams, Rank, Readiness, MASTER_RANK};
pub use worker::{Worker, WorkerReport, WorkerState};
