//! Tests for the public `Network` API.

mod common;

use common::FixedSource;
use nodenet_core::{
    CandidateSampling, LinkInvariantViolation, MAX_POISSON_MEAN, Network, NetworkBuilder,
    NetworkError, RngSource,
};
use rstest::{fixture, rstest};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use nodenet_test_support::tracing::RecordingLayer;

#[fixture]
fn seeded() -> Network<RngSource> {
    NetworkBuilder::new()
        .with_nodes(200)
        .with_seed(0x5EED)
        .build()
        .expect("configuration is valid")
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(37)]
fn resize_sets_size_and_draws_finite_values(#[case] nodes: usize) {
    let mut network = Network::new(RngSource::from_seed(4));
    network.resize(nodes).expect("resize must succeed");
    assert_eq!(network.size(), nodes);
    assert_eq!(network.values().len(), nodes);
    assert!(network.values().iter().all(|value| value.is_finite()));
}

#[test]
fn resized_values_follow_standard_normal() {
    const NODES: usize = 20_000;
    let network = NetworkBuilder::new()
        .with_nodes(NODES)
        .with_seed(2024)
        .build()
        .expect("configuration is valid");

    let count = NODES as f64;
    let mean = network.values().iter().sum::<f64>() / count;
    let variance = network
        .values()
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (count - 1.0);

    assert!(mean.abs() < 0.05, "sample mean {mean} is not close to 0");
    assert!(
        (variance - 1.0).abs() < 0.05,
        "sample variance {variance} is not close to 1"
    );
}

#[rstest]
fn shrinking_after_random_connect_leaves_no_dangling_links(mut seeded: Network<RngSource>) {
    seeded.random_connect(4.0).expect("connect must succeed");
    assert!(seeded.link_count() > 0);

    seeded.resize(60).expect("resize must succeed");

    assert_eq!(seeded.size(), 60);
    assert!(seeded.links().all(|(origin, target)| origin < 60 && target < 60));
    assert_eq!(seeded.check_invariants(), Ok(()));
}

#[rstest]
fn self_links_always_fail(mut seeded: Network<RngSource>) {
    for node in [0, 17, 199] {
        let before = seeded.degree(node).expect("node exists");
        let err = seeded
            .add_link(node, node)
            .expect_err("self-links must be rejected");
        assert_eq!(err, NetworkError::SelfLink { node });
        assert_eq!(seeded.degree(node), Ok(before));
    }
}

#[rstest]
fn valid_links_are_visible_from_both_ends(mut seeded: Network<RngSource>) {
    seeded.add_link(3, 150).expect("valid link");

    assert!(seeded.degree(3).expect("node exists") >= 1);
    assert!(seeded.degree(150).expect("node exists") >= 1);
    assert!(seeded.neighbors(3).contains(&150));
    assert!(seeded.neighbors(150).contains(&3));
}

#[test]
fn set_values_reports_written_count() {
    let mut network = NetworkBuilder::new()
        .with_nodes(5)
        .with_seed(1)
        .build()
        .expect("configuration is valid");
    let before = network.values().to_vec();

    assert_eq!(network.set_values(&[10.0, 20.0]), 2);

    assert_eq!(network.value(0), Ok(10.0));
    assert_eq!(network.value(1), Ok(20.0));
    assert_eq!(network.values().get(2..), before.get(2..));

    let mut small = NetworkBuilder::new()
        .with_nodes(3)
        .with_seed(1)
        .build()
        .expect("configuration is valid");
    assert_eq!(
        small.set_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]),
        3
    );
    assert_eq!(small.values(), &[1.0, 2.0, 3.0]);
}

#[test]
fn sorted_values_descend() {
    let mut network = NetworkBuilder::new()
        .with_nodes(3)
        .with_seed(8)
        .build()
        .expect("configuration is valid");
    network.set_values(&[3.0, -1.0, 2.0]);
    assert_eq!(network.sorted_values(), vec![3.0, 2.0, -1.0]);
}

#[rstest]
#[case(CandidateSampling::WithoutReplacement)]
#[case(CandidateSampling::WithReplacement)]
fn random_connect_counts_one_per_link(#[case] sampling: CandidateSampling) {
    let mut network = NetworkBuilder::new()
        .with_nodes(300)
        .with_seed(77)
        .with_candidate_sampling(sampling)
        .build()
        .expect("configuration is valid");

    let created = network.random_connect(2.5).expect("connect must succeed");

    let degree_sum: usize = (0..network.size())
        .map(|node| network.degree(node).expect("node exists"))
        .sum();
    assert_eq!(degree_sum, created * 2);
    assert!(network.links().all(|(origin, target)| origin != target));
    assert!(network
        .links()
        .all(|(origin, target)| origin < network.size() && target < network.size()));
}

#[test]
fn random_connect_tracks_requested_mean() {
    const NODES: usize = 2_000;
    const MEAN: f64 = 3.0;
    let mut network = NetworkBuilder::new()
        .with_nodes(NODES)
        .with_seed(31)
        .build()
        .expect("configuration is valid");

    let created = network.random_connect(MEAN).expect("connect must succeed") as f64;

    let expected = NODES as f64 * MEAN;
    assert!(
        (created - expected).abs() < expected * 0.05,
        "created {created} links, expected about {expected}"
    );
}

#[test]
fn random_connect_with_injected_source_builds_a_star() {
    let mut network = NetworkBuilder::new()
        .with_nodes(4)
        .build_with_source(FixedSource::new(1))
        .expect("configuration is valid");

    let created = network.random_connect(1.0).expect("connect must succeed");

    // Candidates run in reverse order, so every node picks node 3 first.
    assert_eq!(created, 3);
    assert_eq!(network.neighbors(3), &[0, 1, 2]);
    assert_eq!(network.degree(3), Ok(3));
    assert_eq!(network.values(), &[0.0; 4]);
}

#[rstest]
fn second_random_connect_discards_first_topology(mut seeded: Network<RngSource>) {
    seeded.random_connect(3.0).expect("first connect must succeed");
    let second = seeded.random_connect(0.0).expect("second connect must succeed");

    assert_eq!(second, 0);
    assert_eq!(seeded.link_count(), 0);
    assert!(
        (0..seeded.size()).all(|node| seeded.degree(node) == Ok(0)),
        "no link from the first call may survive"
    );
}

#[test]
fn single_node_network_connects_for_any_seed() {
    for seed in 0..20 {
        let mut network = NetworkBuilder::new()
            .with_nodes(1)
            .with_seed(seed)
            .build()
            .expect("configuration is valid");
        assert_eq!(network.random_connect(10.0), Ok(0), "seed {seed}");
    }
}

#[rstest]
#[case(2, 20.0)]
#[case(3, 50.0)]
#[case(5, 1_000.0)]
fn small_network_with_large_mean_connects(#[case] nodes: usize, #[case] mean: f64) {
    for seed in 0..10 {
        let mut network = NetworkBuilder::new()
            .with_nodes(nodes)
            .with_seed(seed)
            .build()
            .expect("configuration is valid");
        let created = network
            .random_connect(mean)
            .expect("degrees fall back to the truncated distribution");
        assert_eq!(created, network.link_count());
        assert_eq!(network.check_invariants(), Ok(()));
    }
}

#[rstest]
#[case(1e308)]
#[case(f64::MAX)]
#[case(MAX_POISSON_MEAN * 2.0)]
fn random_connect_rejects_unsamplable_means(
    mut seeded: Network<RngSource>,
    #[case] mean: f64,
) {
    seeded.add_link(0, 1).expect("valid link");

    let err = seeded
        .random_connect(mean)
        .expect_err("mean beyond the Poisson bound must be rejected");

    assert_eq!(err, NetworkError::InvalidMeanDegree { mean });
    assert_eq!(seeded.link_count(), 1);
}

#[rstest]
fn out_of_range_degree_defaults_to_zero(seeded: Network<RngSource>) {
    let err = seeded.degree(200).expect_err("index 200 is out of range");
    assert_eq!(err, NetworkError::OutOfRange { index: 200, size: 200 });
    assert_eq!(seeded.degree(200).unwrap_or_default(), 0);
}

#[test]
fn check_invariants_passes_on_fresh_network() {
    let network = Network::new(RngSource::from_seed(0));
    let result: Result<(), LinkInvariantViolation> = network.check_invariants();
    assert_eq!(result, Ok(()));
}

#[rstest]
fn resize_and_connect_emit_spans(mut seeded: Network<RngSource>) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        seeded.resize(120)?;
        seeded.random_connect(2.5)
    })
    .expect("operations must succeed");

    let resize = layer.span("core.resize").expect("core.resize span must exist");
    assert_eq!(resize.field("new_size"), Some("120"));
    assert_eq!(resize.field("old_size"), Some("200"));
    assert_eq!(resize.field("policy"), Some("Resample"));

    let connect = layer
        .span("core.random_connect")
        .expect("core.random_connect span must exist");
    assert_eq!(connect.field("nodes"), Some("120"));
    assert_eq!(connect.field("mean_degree"), Some("2.5"));
    assert_eq!(connect.field("sampling"), Some("WithoutReplacement"));

    assert!(
        layer
            .events_at(Level::INFO)
            .iter()
            .any(|event| event.message() == Some("random connection completed"))
    );
}

#[rstest]
fn out_of_range_queries_emit_warnings(seeded: Network<RngSource>) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let value = tracing::subscriber::with_default(subscriber, || seeded.value(999));
    assert!(value.is_err());

    let warnings = layer.events_at(Level::WARN);
    let warning = warnings.first().expect("out-of-range query must warn");
    assert_eq!(warning.field("index"), Some("999"));
    assert_eq!(warning.field("size"), Some("200"));
}

#[rstest]
fn out_of_range_neighbors_warn_and_return_empty(seeded: Network<RngSource>) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let neighbors =
        tracing::subscriber::with_default(subscriber, || seeded.neighbors(500).to_vec());
    assert!(neighbors.is_empty());

    let warnings = layer.events_at(Level::WARN);
    let warning = warnings.first().expect("out-of-range neighbours must warn");
    assert_eq!(warning.message(), Some("node index out of range"));
    assert_eq!(warning.field("index"), Some("500"));
    assert_eq!(warning.field("size"), Some("200"));
}

#[rstest]
fn in_range_neighbors_do_not_warn(mut seeded: Network<RngSource>) {
    seeded.add_link(4, 5).expect("valid link");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        assert_eq!(seeded.neighbors(4), &[5]);
        assert!(seeded.neighbors(6).is_empty());
    });

    assert!(layer.events_at(Level::WARN).is_empty());
}
