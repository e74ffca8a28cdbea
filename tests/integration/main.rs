//! Integration tests for the master/worker enumerator.

mod cli_test;
mod cluster_test;
mod properties_test;

use nqueens_mw::board::Column;
use nqueens_mw::search::SolutionStore;
use std::collections::BTreeSet;

/// Solutions of a store as a set of boards.
pub fn solution_set(store: &SolutionStore) -> BTreeSet<Vec<Column>> {
    store.iter().map(|s| s.to_vec()).collect()
}
