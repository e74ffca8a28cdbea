use crate::solution_set;
use nqueens_mw::board::{is_valid_assignment, known_solution_count, Column};
use nqueens_mw::parallel::{run_cluster, ClusterConfig, ProblemParams, WaitStrategy};
use nqueens_mw::search::solve;
use std::collections::BTreeSet;
use std::time::Duration;

fn cluster(n: usize, k: usize, workers: usize) -> nqueens_mw::parallel::ClusterResult {
    let config = ClusterConfig::default().with_workers(workers);
    run_cluster(ProblemParams::new(n, k), &config).expect("cluster run failed")
}

#[test]
fn test_four_queens_split_at_one() {
    let result = cluster(4, 1, 2);

    let expected: BTreeSet<Vec<Column>> =
        [vec![1, 3, 0, 2], vec![2, 0, 3, 1]].into_iter().collect();
    assert_eq!(solution_set(&result.master.solutions), expected);
    assert_eq!(result.master.work_units_dispatched, 4);
}

#[test]
fn test_matches_sequential_across_splits_and_pools() {
    for n in 1..=8 {
        let sequential = solution_set(&solve(n).unwrap());
        for k in 0..=n {
            for workers in [1, 2, 5] {
                let result = cluster(n, k, workers);
                assert_eq!(
                    solution_set(&result.master.solutions),
                    sequential,
                    "n={} k={} workers={}",
                    n,
                    k,
                    workers
                );
                assert_eq!(result.solution_count(), sequential.len());
            }
        }
    }
}

#[test]
fn test_liveness_and_termination_accounting() {
    let result = cluster(8, 3, 4);

    assert_eq!(result.master.liveness_at_exit, 0);
    assert_eq!(result.master.terminations_sent, 4);
    assert_eq!(result.workers.len(), 4);

    let served: u64 = result.master.tallies.iter().map(|t| t.work_units).sum();
    let processed: u64 = result.workers.iter().map(|w| w.work_units).sum();
    assert_eq!(served, result.master.work_units_dispatched);
    assert_eq!(processed, served);

    let received: u64 = result.master.tallies.iter().map(|t| t.solutions).sum();
    assert_eq!(received, 92);
}

#[test]
fn test_batches_are_whole_disjoint_boards() {
    let result = cluster(9, 2, 3);
    let store = &result.master.solutions;

    assert_eq!(store.as_flat().len() % 9, 0);
    assert!(store.iter().all(|s| is_valid_assignment(s, 9)));
    assert_eq!(solution_set(store).len(), store.len());
    assert_eq!(store.len() as u64, known_solution_count(9).unwrap());
}

#[test]
fn test_split_zero_delegates_everything() {
    let result = cluster(6, 0, 3);

    assert_eq!(result.master.work_units_dispatched, 1);
    assert_eq!(result.solution_count(), 4);
    let busy: Vec<_> = result.workers.iter().filter(|w| w.work_units > 0).collect();
    assert_eq!(busy.len(), 1);
    assert_eq!(busy[0].solutions_found, 4);
}

#[test]
fn test_split_at_board_size_needs_no_work_units() {
    let result = cluster(6, 6, 2);

    assert_eq!(result.master.work_units_dispatched, 0);
    assert_eq!(result.solution_count(), 4);
    assert_eq!(result.master.terminations_sent, 2);
    assert!(result.workers.iter().all(|w| w.work_units == 0));
}

#[test]
fn test_polling_workers() {
    let config = ClusterConfig::default()
        .with_workers(3)
        .with_poll_interval(Duration::from_micros(10));
    assert_eq!(config.wait_strategy.to_string(), "polling");

    let result = run_cluster(ProblemParams::new(7, 2), &config).unwrap();
    assert_eq!(result.solution_count(), 40);
    assert_eq!(result.master.liveness_at_exit, 0);
}

#[test]
fn test_more_workers_than_work_units() {
    let config = ClusterConfig::default()
        .with_workers(8)
        .with_wait_strategy(WaitStrategy::Blocking);

    let result = run_cluster(ProblemParams::new(5, 1), &config).unwrap();
    assert_eq!(result.solution_count(), 10);
    assert_eq!(result.master.terminations_sent, 8);
}
