//! Property-based tests for random connection and resizing.
//!
//! Every generated network is checked against the link invariants after each
//! mutation, and the returned link count is reconciled with the stored
//! degrees.

use proptest::prelude::*;

use crate::{CandidateSampling, NetworkBuilder, test_utils::suite_proptest_config};

fn sampling_strategy() -> impl Strategy<Value = CandidateSampling> {
    prop_oneof![
        Just(CandidateSampling::WithoutReplacement),
        Just(CandidateSampling::WithReplacement),
    ]
}

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn random_connect_preserves_link_invariants(
        nodes in 0_usize..60,
        mean in 0.0_f64..6.0,
        seed in any::<u64>(),
        sampling in sampling_strategy(),
    ) {
        let mut network = NetworkBuilder::new()
            .with_nodes(nodes)
            .with_seed(seed)
            .with_candidate_sampling(sampling)
            .build()
            .expect("configuration is valid");

        let created = network.random_connect(mean).expect("connect must succeed");

        prop_assert_eq!(network.check_invariants(), Ok(()));
        prop_assert_eq!(created, network.link_count());
        let degree_sum: usize = (0..nodes)
            .map(|node| network.degree(node).expect("node exists"))
            .sum();
        prop_assert_eq!(degree_sum, created * 2);
        prop_assert!(network.links().all(|(origin, target)| origin != target));
    }

    #[test]
    fn second_random_connect_replaces_topology(
        nodes in 1_usize..40,
        first_mean in 0.0_f64..6.0,
        second_mean in 0.0_f64..6.0,
        seed in any::<u64>(),
    ) {
        let mut network = NetworkBuilder::new()
            .with_nodes(nodes)
            .with_seed(seed)
            .build()
            .expect("configuration is valid");

        network.random_connect(first_mean).expect("first connect must succeed");
        let second = network.random_connect(second_mean).expect("second connect must succeed");

        prop_assert_eq!(second, network.link_count());
        prop_assert_eq!(network.check_invariants(), Ok(()));
    }

    #[test]
    fn resize_never_leaves_dangling_links(
        nodes in 1_usize..50,
        new_size in 0_usize..70,
        mean in 0.0_f64..6.0,
        seed in any::<u64>(),
    ) {
        let mut network = NetworkBuilder::new()
            .with_nodes(nodes)
            .with_seed(seed)
            .build()
            .expect("configuration is valid");
        network.random_connect(mean).expect("connect must succeed");

        network.resize(new_size).expect("resize must succeed");

        prop_assert_eq!(network.size(), new_size);
        prop_assert_eq!(network.check_invariants(), Ok(()));
        prop_assert!(network
            .links()
            .all(|(origin, target)| origin < new_size && target < new_size));
        prop_assert!(network.values().iter().all(|value| value.is_finite()));
    }
}
