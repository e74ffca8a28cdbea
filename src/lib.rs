//! Master/worker N-Queens enumeration.
//!
//! The crate has two layers:
//! - [`search`]: a level-bounded backtracking enumerator that delivers
//!   every non-attacking placement of a row range to a solution sink
//! - [`parallel`]: a master/worker protocol that runs the enumerator over
//!   the first `k` rows on the master and farms each partial solution out
//!   to a pool of workers

pub mod board;
pub mod error;
pub mod parallel;
pub mod search;

pub use error::{QueensError, Result};
