//! Builder utilities for configuring [`Network`] instances.
//!
//! Exposes the resize and candidate-sampling policies and the validation
//! applied before a network is constructed.

use std::num::NonZeroUsize;

use crate::{
    Result,
    error::NetworkError,
    generator::Generator,
    network::Network,
    random::{RandomSource, RngSource},
};

/// Default number of Poisson draws attempted per node before
/// [`Network::random_connect`] samples the truncated distribution directly.
pub const DEFAULT_MAX_DEGREE_DRAWS: usize = 10_000;

/// Controls which node values survive [`Network::resize`].
///
/// # Examples
/// ```
/// use nodenet_core::ResizePolicy;
///
/// assert_eq!(ResizePolicy::default(), ResizePolicy::Resample);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Every value, including those of retained nodes, is drawn afresh from
    /// the standard normal distribution.
    #[default]
    Resample,
    /// Retained nodes keep their values; only new nodes are drawn.
    PreserveExisting,
}

/// Controls how [`Network::random_connect`] picks link candidates for a node.
///
/// # Examples
/// ```
/// use nodenet_core::CandidateSampling;
///
/// assert_eq!(CandidateSampling::default(), CandidateSampling::WithoutReplacement);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CandidateSampling {
    /// Candidates are a random permutation of every node index, so a node
    /// never picks the same candidate twice in one round.
    #[default]
    WithoutReplacement,
    /// Candidates are independent uniform draws over every node index and
    /// may repeat within one round.
    WithReplacement,
}

/// Configures and constructs [`Network`] instances.
///
/// # Examples
/// ```
/// use nodenet_core::{NetworkBuilder, ResizePolicy};
///
/// let network = NetworkBuilder::new()
///     .with_nodes(8)
///     .with_seed(42)
///     .with_resize_policy(ResizePolicy::PreserveExisting)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(network.size(), 8);
/// assert_eq!(network.resize_policy(), ResizePolicy::PreserveExisting);
/// ```
#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    nodes: usize,
    seed: Option<u64>,
    resize_policy: ResizePolicy,
    candidate_sampling: CandidateSampling,
    max_degree_draws: usize,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self {
            nodes: 0,
            seed: None,
            resize_policy: ResizePolicy::default(),
            candidate_sampling: CandidateSampling::default(),
            max_degree_draws: DEFAULT_MAX_DEGREE_DRAWS,
        }
    }
}

impl NetworkBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use nodenet_core::{CandidateSampling, NetworkBuilder, ResizePolicy};
    ///
    /// let builder = NetworkBuilder::new();
    /// assert_eq!(builder.nodes(), 0);
    /// assert_eq!(builder.seed(), None);
    /// assert_eq!(builder.resize_policy(), ResizePolicy::Resample);
    /// assert_eq!(builder.candidate_sampling(), CandidateSampling::WithoutReplacement);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial node count. Values are drawn when the network is
    /// built.
    #[must_use]
    pub fn with_nodes(mut self, nodes: usize) -> Self {
        self.nodes = nodes;
        self
    }

    /// Returns the configured initial node count.
    #[must_use]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Seeds the default [`RngSource`] so construction is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Selects the policy applied by [`Network::resize`].
    #[must_use]
    pub fn with_resize_policy(mut self, policy: ResizePolicy) -> Self {
        self.resize_policy = policy;
        self
    }

    /// Returns the configured resize policy.
    #[must_use]
    pub fn resize_policy(&self) -> ResizePolicy {
        self.resize_policy
    }

    /// Selects how [`Network::random_connect`] draws link candidates.
    #[must_use]
    pub fn with_candidate_sampling(mut self, sampling: CandidateSampling) -> Self {
        self.candidate_sampling = sampling;
        self
    }

    /// Returns the configured candidate sampling strategy.
    #[must_use]
    pub fn candidate_sampling(&self) -> CandidateSampling {
        self.candidate_sampling
    }

    /// Caps the Poisson redraws attempted per node during random connection.
    /// Past the cap the degree is drawn from the Poisson distribution
    /// truncated to `0..size`.
    #[must_use]
    pub fn with_max_degree_draws(mut self, draws: usize) -> Self {
        self.max_degree_draws = draws;
        self
    }

    /// Returns the configured redraw cap.
    #[must_use]
    pub fn max_degree_draws(&self) -> usize {
        self.max_degree_draws
    }

    /// Validates the configuration and constructs a [`Network`] backed by the
    /// default [`RngSource`], seeded from entropy unless a seed was given.
    ///
    /// # Errors
    /// Returns [`NetworkError::InvalidConfiguration`] when the redraw cap is
    /// zero, or [`NetworkError::Sampling`] if drawing the initial values
    /// fails.
    ///
    /// # Examples
    /// ```
    /// use nodenet_core::NetworkBuilder;
    ///
    /// let network = NetworkBuilder::new().with_nodes(3).with_seed(1).build()?;
    /// assert_eq!(network.size(), 3);
    /// # Ok::<(), nodenet_core::NetworkError>(())
    /// ```
    pub fn build(self) -> Result<Network<RngSource>> {
        let source = self
            .seed
            .map_or_else(RngSource::from_entropy, RngSource::from_seed);
        self.build_with_source(source)
    }

    /// Validates the configuration and constructs a [`Network`] drawing from
    /// `source`.
    ///
    /// # Errors
    /// Returns [`NetworkError::InvalidConfiguration`] when the redraw cap is
    /// zero, or [`NetworkError::Sampling`] if drawing the initial values
    /// fails.
    pub fn build_with_source<R: RandomSource>(self, source: R) -> Result<Network<R>> {
        let max_degree_draws = NonZeroUsize::new(self.max_degree_draws).ok_or_else(|| {
            NetworkError::InvalidConfiguration {
                reason: "max_degree_draws must be at least 1".to_owned(),
            }
        })?;
        let generator = Generator::new(self.candidate_sampling, max_degree_draws);
        let mut network = Network::from_parts(source, self.resize_policy, generator);
        if self.nodes > 0 {
            network.resize(self.nodes)?;
        }
        Ok(network)
    }
}
