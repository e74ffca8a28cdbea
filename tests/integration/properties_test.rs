//! Property: any split level and pool size finds exactly the sequential
//! solution set.

use crate::solution_set;
use nqueens_mw::parallel::{run_cluster, ClusterConfig, ProblemParams, WaitStrategy};
use nqueens_mw::search::solve;
use proptest::prelude::*;

fn params_strategy() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=7).prop_flat_map(|n| (Just(n), 0..=n))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_cluster_equals_sequential(
        (n, k) in params_strategy(),
        workers in 1usize..=4,
        polling in any::<bool>(),
    ) {
        let wait_strategy = if polling { WaitStrategy::polling() } else { WaitStrategy::Blocking };
        let config = ClusterConfig::default()
            .with_workers(workers)
            .with_wait_strategy(wait_strategy);

        let result = run_cluster(ProblemParams::new(n, k), &config).unwrap();
        let sequential = solve(n).unwrap();

        prop_assert_eq!(solution_set(&result.master.solutions), solution_set(&sequential));
        prop_assert_eq!(result.solution_count(), sequential.len());
        prop_assert_eq!(result.master.liveness_at_exit, 0);
        prop_assert_eq!(result.master.terminations_sent, workers);
    }
}
