//! Engine configuration.

/// How the free proposers are extracted.
///
/// The final matching of the strict engine does not depend on this choice;
/// it only changes the order of intermediate proposals. The blocked and
/// tied engines can produce different (still valid) results under
/// different orders, so the choice is pinned per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FreeOrder {
    /// First in, first out. Rejected proposers rejoin at the back.
    Fifo,
    /// Arbitrary extraction driven by the configured seed.
    Unordered,
}

/// What happens to a proposal made to a free reviewer across an excluded pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExclusionPolicy {
    /// The proposal is dropped and the proposer does not rejoin the free
    /// pool, even with candidates left.
    #[default]
    Drop,
    /// The proposer rejoins the free pool and moves on to its next candidate.
    Requeue,
}

/// Configuration for the matching engines.
///
/// # Examples
///
/// ```
/// use u_matching::engine::{ExclusionPolicy, FreeOrder, MatchingConfig};
///
/// let config = MatchingConfig::default()
///     .with_free_order(FreeOrder::Fifo)
///     .with_exclusion_policy(ExclusionPolicy::Requeue)
///     .with_seed(7);
/// assert_eq!(config.free_order, Some(FreeOrder::Fifo));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchingConfig {
    /// Free-pool extraction order. `None` keeps each engine's default:
    /// unordered for strict and tied, FIFO for blocked.
    pub free_order: Option<FreeOrder>,

    /// Handling of excluded proposals to free reviewers (blocked engine only).
    pub exclusion_policy: ExclusionPolicy,

    /// Seed for unordered extraction (None uses a fixed default seed).
    pub seed: Option<u64>,

    /// Build rank tables in parallel (requires the `parallel` feature;
    /// ignored otherwise).
    pub parallel: bool,

    /// Maximum number of proposals before the run is aborted. 0 = no limit.
    ///
    /// Valid instances need at most `n * n` proposals.
    pub max_proposals: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            free_order: None,
            exclusion_policy: ExclusionPolicy::Drop,
            seed: None,
            parallel: false,
            max_proposals: 0,
        }
    }
}

impl MatchingConfig {
    /// Seed used when none is configured.
    pub const DEFAULT_SEED: u64 = 42;

    /// Overrides the free-pool extraction order.
    pub fn with_free_order(mut self, order: FreeOrder) -> Self {
        self.free_order = Some(order);
        self
    }

    /// Sets the exclusion policy for the blocked engine.
    pub fn with_exclusion_policy(mut self, policy: ExclusionPolicy) -> Self {
        self.exclusion_policy = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the proposal budget (0 disables it).
    pub fn with_max_proposals(mut self, n: usize) -> Self {
        self.max_proposals = n;
        self
    }

    /// Order to use for an engine whose default is `default`.
    pub fn order_or(&self, default: FreeOrder) -> FreeOrder {
        self.free_order.unwrap_or(default)
    }

    /// The configured seed, or [`Self::DEFAULT_SEED`].
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(Self::DEFAULT_SEED)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.parallel && !cfg!(feature = "parallel") {
            return Err("parallel rank building requires the `parallel` feature".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatchingConfig::default();
        assert!(config.free_order.is_none());
        assert_eq!(config.exclusion_policy, ExclusionPolicy::Drop);
        assert_eq!(config.effective_seed(), 42);
        assert_eq!(config.max_proposals, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = MatchingConfig::default()
            .with_free_order(FreeOrder::Unordered)
            .with_exclusion_policy(ExclusionPolicy::Requeue)
            .with_seed(9)
            .with_max_proposals(100);
        assert_eq!(config.order_or(FreeOrder::Fifo), FreeOrder::Unordered);
        assert_eq!(config.exclusion_policy, ExclusionPolicy::Requeue);
        assert_eq!(config.effective_seed(), 9);
        assert_eq!(config.max_proposals, 100);
    }

    #[test]
    fn test_order_falls_back_to_engine_default() {
        let config = MatchingConfig::default();
        assert_eq!(config.order_or(FreeOrder::Fifo), FreeOrder::Fifo);
        assert_eq!(config.order_or(FreeOrder::Unordered), FreeOrder::Unordered);
    }

    #[test]
    fn test_validate_parallel_needs_feature() {
        let config = MatchingConfig::default().with_parallel(true);
        assert_eq!(config.validate().is_ok(), cfg!(feature = "parallel"));
    }
}
