//! The [`Network`] container: node values, the link relation, and the random
//! connectivity generator layered on top of them.

use tracing::{debug, instrument, warn};

use crate::{
    Result,
    builder::{CandidateSampling, ResizePolicy},
    error::NetworkError,
    generator::Generator,
    invariants::{LinkInvariantViolation, check_links},
    links::LinkTable,
    nodes::NodeStore,
    random::RandomSource,
};

/// Undirected multigraph whose nodes carry `f64` values.
///
/// Nodes are identified by their position `0..size()`. Every link references
/// two distinct existing nodes, and each undirected link is visible from both
/// endpoints.
///
/// # Examples
/// ```
/// use nodenet_core::NetworkBuilder;
///
/// let mut network = NetworkBuilder::new().with_nodes(4).with_seed(3).build()?;
/// network.add_link(0, 1)?;
/// network.add_link(1, 2)?;
/// assert_eq!(network.degree(1)?, 2);
/// assert_eq!(network.neighbors(1), &[0, 2]);
///
/// assert_eq!(network.set_values(&[4.0, 1.0, 3.0, 2.0]), 4);
/// assert_eq!(network.sorted_values(), vec![4.0, 3.0, 2.0, 1.0]);
/// # Ok::<(), nodenet_core::NetworkError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Network<R> {
    nodes: NodeStore,
    links: LinkTable,
    source: R,
    resize_policy: ResizePolicy,
    generator: Generator,
}

impl<R> Network<R> {
    /// Creates an empty network drawing from `source` with default policies.
    ///
    /// # Examples
    /// ```
    /// use nodenet_core::{Network, RngSource};
    ///
    /// let network = Network::new(RngSource::from_seed(0));
    /// assert!(network.is_empty());
    /// ```
    #[must_use]
    pub fn new(source: R) -> Self {
        Self::from_parts(source, ResizePolicy::default(), Generator::default())
    }

    pub(crate) fn from_parts(source: R, resize_policy: ResizePolicy, generator: Generator) -> Self {
        Self {
            nodes: NodeStore::default(),
            links: LinkTable::default(),
            source,
            resize_policy,
            generator,
        }
    }

    /// Returns the current node count.
    #[must_use]
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the network has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns the node values in index order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        self.nodes.as_slice()
    }

    /// Returns the value of node `index`.
    ///
    /// # Errors
    /// Returns [`NetworkError::OutOfRange`] when `index >= size()`. Callers
    /// wanting the `0.0` sentinel can use `unwrap_or_default()`.
    pub fn value(&self, index: usize) -> Result<f64> {
        self.nodes
            .get(index)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Overwrites the first `min(new_values.len(), size())` values and returns
    /// how many were written. The node count never changes.
    ///
    /// # Examples
    /// ```
    /// use nodenet_core::NetworkBuilder;
    ///
    /// let mut network = NetworkBuilder::new().with_nodes(5).with_seed(1).build()?;
    /// let untouched = network.values()[2..].to_vec();
    /// assert_eq!(network.set_values(&[10.0, 20.0]), 2);
    /// assert_eq!(&network.values()[..2], &[10.0, 20.0]);
    /// assert_eq!(&network.values()[2..], untouched.as_slice());
    /// # Ok::<(), nodenet_core::NetworkError>(())
    /// ```
    pub fn set_values(&mut self, new_values: &[f64]) -> usize {
        let written = self.nodes.overwrite(new_values);
        debug!(supplied = new_values.len(), written, "node values overwritten");
        written
    }

    /// Returns every node value in descending order.
    #[must_use]
    pub fn sorted_values(&self) -> Vec<f64> {
        self.nodes.sorted_descending()
    }

    /// Links `origin` and `target`, storing both directions.
    ///
    /// Parallel links are permitted: linking the same pair twice raises both
    /// degrees by two.
    ///
    /// # Errors
    /// Returns [`NetworkError::SelfLink`] when `origin == target`, and
    /// [`NetworkError::LinkOutOfRange`] when either endpoint is not below
    /// `size()`. The network is unchanged on error.
    pub fn add_link(&mut self, origin: usize, target: usize) -> Result<()> {
        validate_link(origin, target, self.size())
            .inspect_err(|err| warn!(origin, target, %err, "link rejected"))?;
        self.links.insert(origin, target);
        Ok(())
    }

    /// Returns the number of link entries held by node `index`, counting
    /// parallel links.
    ///
    /// # Errors
    /// Returns [`NetworkError::OutOfRange`] when `index >= size()`. Callers
    /// wanting the `0` default can use `unwrap_or_default()`.
    pub fn degree(&self, index: usize) -> Result<usize> {
        self.links
            .degree(index)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Returns the neighbours of node `index` in insertion order, repeating
    /// targets of parallel links. Unknown nodes have no neighbours; asking for
    /// one logs the same warning as [`Network::value`] and [`Network::degree`].
    #[must_use]
    pub fn neighbors(&self, index: usize) -> &[usize] {
        if index >= self.size() {
            self.warn_out_of_range(index);
        }
        self.links.neighbours(index)
    }

    /// Returns the number of undirected links.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.entry_count() / 2
    }

    /// Iterates over directed link entries `(origin, target)`; each undirected
    /// link appears once per direction.
    pub fn links(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.links.iter()
    }

    /// Removes every link while keeping the nodes and their values.
    pub fn clear_links(&mut self) {
        self.links.clear();
    }

    /// Returns the realised mean degree, or `None` for an empty network.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "mean degree is reported as a floating-point ratio"
    )]
    pub fn mean_degree(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.links.entry_count() as f64 / self.size() as f64)
    }

    /// Returns a histogram whose entry `d` counts the nodes of degree `d`.
    /// The histogram is empty for an empty network.
    #[must_use]
    pub fn degree_distribution(&self) -> Vec<usize> {
        let degrees: Vec<usize> = (0..self.size())
            .map(|node| self.links.neighbours(node).len())
            .collect();
        let Some(&max_degree) = degrees.iter().max() else {
            return Vec::new();
        };
        let mut histogram = vec![0; max_degree + 1];
        for degree in degrees {
            if let Some(count) = histogram.get_mut(degree) {
                *count += 1;
            }
        }
        histogram
    }

    /// Verifies the range, self-loop and symmetry invariants of the link
    /// relation.
    ///
    /// # Errors
    /// Returns the first [`LinkInvariantViolation`] found.
    pub fn check_invariants(&self) -> core::result::Result<(), LinkInvariantViolation> {
        check_links(&self.links, self.size())
    }

    /// Returns the policy applied by [`Network::resize`].
    #[must_use]
    pub fn resize_policy(&self) -> ResizePolicy {
        self.resize_policy
    }

    /// Returns the candidate sampling strategy used by
    /// [`Network::random_connect`].
    #[must_use]
    pub fn candidate_sampling(&self) -> CandidateSampling {
        self.generator.sampling()
    }

    /// Returns the random source backing this network.
    #[must_use]
    pub fn source(&self) -> &R {
        &self.source
    }

    fn out_of_range(&self, index: usize) -> NetworkError {
        self.warn_out_of_range(index);
        NetworkError::OutOfRange {
            index,
            size: self.size(),
        }
    }

    fn warn_out_of_range(&self, index: usize) {
        warn!(index, size = self.size(), "node index out of range");
    }
}

impl<R: RandomSource> Network<R> {
    /// Sets the node count to `new_size`, drawing values from the standard
    /// normal distribution and purging links to removed nodes.
    ///
    /// Under [`ResizePolicy::Resample`] every value is redrawn, including
    /// those of nodes that existed before; under
    /// [`ResizePolicy::PreserveExisting`] only new nodes are drawn. Links
    /// between surviving nodes are kept either way.
    ///
    /// # Errors
    /// Returns [`NetworkError::Sampling`] when the random source fails. The
    /// network is unchanged on error.
    #[instrument(
        name = "core.resize",
        err,
        skip(self),
        fields(old_size = self.size(), policy = ?self.resize_policy),
    )]
    pub fn resize(&mut self, new_size: usize) -> Result<()> {
        let retain = match self.resize_policy {
            ResizePolicy::Resample => 0,
            ResizePolicy::PreserveExisting => self.size(),
        };
        self.nodes.redraw(new_size, retain, &mut self.source)?;
        let purged = self.links.set_node_count(new_size);
        debug!(purged, "link entries purged by resize");
        Ok(())
    }

    /// Replaces every link with a random graph whose per-node target degree is
    /// Poisson-distributed with mean `mean_degree`.
    ///
    /// For each node in index order a target degree below `size()` is drawn,
    /// then that many candidates are taken from a random candidate sequence
    /// and linked to the node. Self-pairings are skipped; candidates already
    /// linked to the node produce parallel links. Returns the number of links
    /// created.
    ///
    /// # Errors
    /// Returns [`NetworkError::InvalidMeanDegree`] for negative or non-finite
    /// means and for means above [`crate::MAX_POISSON_MEAN`], and
    /// [`NetworkError::Sampling`] when the random source fails. Links created
    /// before a failure are kept.
    ///
    /// # Examples
    /// ```
    /// use nodenet_core::NetworkBuilder;
    ///
    /// let mut network = NetworkBuilder::new().with_nodes(50).with_seed(5).build()?;
    /// let created = network.random_connect(3.0)?;
    /// assert_eq!(created, network.link_count());
    /// assert!(network.check_invariants().is_ok());
    /// # Ok::<(), nodenet_core::NetworkError>(())
    /// ```
    #[instrument(
        name = "core.random_connect",
        err,
        skip(self),
        fields(nodes = self.size(), sampling = ?self.generator.sampling()),
    )]
    pub fn random_connect(&mut self, mean_degree: f64) -> Result<usize> {
        self.generator
            .connect(&mut self.links, &mut self.source, mean_degree)
    }
}

/// Checks that `origin` and `target` are distinct nodes below `size`.
pub(crate) fn validate_link(origin: usize, target: usize, size: usize) -> Result<()> {
    if origin == target {
        return Err(NetworkError::SelfLink { node: origin });
    }
    if origin >= size || target >= size {
        return Err(NetworkError::LinkOutOfRange {
            origin,
            target,
            size,
        });
    }
    Ok(())
}
