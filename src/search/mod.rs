//! Sequential search over N-Queens boards.
//!
//! - [`enumerator`]: level-bounded backtracking shared by master and workers
//! - [`sink`]: where found solutions go
//! - [`result`]: per-run statistics

pub mod enumerator;
pub mod result;
pub mod sink;

pub use enumerator::{search_levels, Enumerator};
pub use result::SearchStatistics;
pub use sink::{SolutionSink, SolutionStore};

use crate::error::{QueensError, Result};

/// All solutions of the `n`×`n` problem, computed in the calling thread, in
/// lexicographic order.
pub fn solve(n: usize) -> Result<SolutionStore> {
    if n == 0 {
        return Err(QueensError::InvalidParams(
            "board size must be at least 1".into(),
        ));
    }
    let mut board = vec![0; n];
    let mut store = SolutionStore::new(n);
    search_levels(&mut board, 0, n, &mut store)?;
    Ok(store)
}
