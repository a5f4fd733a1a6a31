//! Entry points for the three engines.
//!
//! # Algorithm
//!
//! 1. Validate input and build the dense instance (rank tables, lists)
//! 2. Seed the free pool with every proposer
//! 3. Until the pool is empty:
//!    a. Pop a proposer and advance its cursor
//!    b. Propose to the next candidate (or the next untried member of the open tier)
//!    c. Resolve acceptance or rejection by reviewer rank
//! 4. Convert the engagements into a [`Matching`]
//!
//! # Reference
//!
//! Gale, D. & Shapley, L. S. (1962). "College Admissions and the Stability of
//! Marriage", *American Mathematical Monthly* 69(1), 9-15.
//! Irving, R. W. (1994). "Stable marriage and indifference", *Discrete Applied
//! Mathematics* 48(3), 261-272.

use super::config::MatchingConfig;
use super::types::{Matching, MatchingResult, Variant};
use super::{blocked, strict, tied};
use crate::error::{MatchingError, Result};
use crate::instance::{BlockedPairs, StrictInstance, TiedInstance};
use crate::preferences::{ExclusionSet, PreferenceTable, TierTable};
use crate::roster::Agent;
use crate::LOG_TARGET;

/// Stable matching runner.
pub struct MatchingRunner;

impl MatchingRunner {
    /// Validates strict preferences and runs the strict engine.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_matching::engine::{MatchingConfig, MatchingRunner};
    /// use u_matching::PreferenceTable;
    ///
    /// let prefs = PreferenceTable::new()
    ///     .with("m", ["w"])
    ///     .with("w", ["m"]);
    /// let result =
    ///     MatchingRunner::run_strict(&["m"], &["w"], &prefs, &MatchingConfig::default()).unwrap();
    /// assert_eq!(result.matching.get(&"w"), Some(&"m"));
    /// assert_eq!(result.proposals, 1);
    /// ```
    pub fn run_strict<A: Agent>(
        proposers: &[A],
        reviewers: &[A],
        prefs: &PreferenceTable<A>,
        config: &MatchingConfig,
    ) -> Result<MatchingResult<A>> {
        check_config(config)?;
        let instance = StrictInstance::build(proposers, reviewers, prefs, config.parallel)?;
        Self::solve_strict(&instance, config)
    }

    /// Validates strict preferences and exclusions, then runs the blocked engine.
    pub fn run_blocked<A: Agent>(
        proposers: &[A],
        reviewers: &[A],
        prefs: &PreferenceTable<A>,
        excluded: &ExclusionSet<A>,
        config: &MatchingConfig,
    ) -> Result<MatchingResult<A>> {
        check_config(config)?;
        let instance = StrictInstance::build(proposers, reviewers, prefs, config.parallel)?;
        let pairs = BlockedPairs::resolve(&instance, excluded)?;
        Self::solve_blocked(&instance, &pairs, config)
    }

    /// Validates tiers and runs the tied engine.
    pub fn run_tied<A: Agent>(
        proposers: &[A],
        reviewers: &[A],
        tiers: &TierTable<A>,
        config: &MatchingConfig,
    ) -> Result<MatchingResult<A>> {
        check_config(config)?;
        let instance = TiedInstance::build(proposers, reviewers, tiers, config.parallel)?;
        Self::solve_tied(&instance, config)
    }

    /// Runs the strict engine on an already validated instance.
    pub fn solve_strict<A: Agent>(
        instance: &StrictInstance<A>,
        config: &MatchingConfig,
    ) -> Result<MatchingResult<A>> {
        let _span = tracing::debug_span!(
            target: LOG_TARGET,
            "stable_match",
            variant = %Variant::Strict,
            agents = instance.proposers().len(),
        )
        .entered();

        let state = strict::run(instance, config)?;
        let result = state.into_result(instance.proposers(), instance.reviewers(), Variant::Strict);
        log_summary(&result);
        Ok(result)
    }

    /// Runs the blocked engine on an already validated instance.
    pub fn solve_blocked<A: Agent>(
        instance: &StrictInstance<A>,
        excluded: &BlockedPairs,
        config: &MatchingConfig,
    ) -> Result<MatchingResult<A>> {
        let _span = tracing::debug_span!(
            target: LOG_TARGET,
            "stable_match",
            variant = %Variant::Blocked,
            agents = instance.proposers().len(),
            excluded = excluded.len(),
        )
        .entered();

        let state = blocked::run(instance, excluded, config)?;
        let result = state.into_result(instance.proposers(), instance.reviewers(), Variant::Blocked);
        log_summary(&result);
        Ok(result)
    }

    /// Runs the tied engine on an already validated instance.
    pub fn solve_tied<A: Agent>(
        instance: &TiedInstance<A>,
        config: &MatchingConfig,
    ) -> Result<MatchingResult<A>> {
        let _span = tracing::debug_span!(
            target: LOG_TARGET,
            "stable_match",
            variant = %Variant::Tied,
            agents = instance.proposers().len(),
        )
        .entered();

        let state = tied::run(instance, config)?;
        let result = state.into_result(instance.proposers(), instance.reviewers(), Variant::Tied);
        log_summary(&result);
        Ok(result)
    }
}

/// Stable matching over complete strict preferences.
///
/// `prefs` must hold a complete ranking of the opposite side for every
/// proposer and every reviewer. The result matches every reviewer.
///
/// # Examples
///
/// ```
/// use u_matching::{stable_match_strict, PreferenceTable};
///
/// let prefs = PreferenceTable::new()
///     .with("xavier", ["amy", "bertha"])
///     .with("yancey", ["amy", "bertha"])
///     .with("amy", ["yancey", "xavier"])
///     .with("bertha", ["xavier", "yancey"]);
/// let matching = stable_match_strict(&["xavier", "yancey"], &["amy", "bertha"], &prefs).unwrap();
/// assert_eq!(matching.get(&"amy"), Some(&"yancey"));
/// assert_eq!(matching.get(&"bertha"), Some(&"xavier"));
/// ```
pub fn stable_match_strict<A: Agent>(
    proposers: &[A],
    reviewers: &[A],
    prefs: &PreferenceTable<A>,
) -> Result<Matching<A>> {
    MatchingRunner::run_strict(proposers, reviewers, prefs, &MatchingConfig::default())
        .map(|r| r.matching)
}

/// Stable matching over strict preferences where `excluded` pairs never match.
///
/// Same preference contract as [`stable_match_strict`]. Some reviewers may
/// stay unmatched.
pub fn stable_match_blocked<A: Agent>(
    proposers: &[A],
    reviewers: &[A],
    prefs: &PreferenceTable<A>,
    excluded: &ExclusionSet<A>,
) -> Result<Matching<A>> {
    MatchingRunner::run_blocked(
        proposers,
        reviewers,
        prefs,
        excluded,
        &MatchingConfig::default(),
    )
    .map(|r| r.matching)
}

/// Weakly stable matching over tiered preferences.
///
/// Each agent's tiers must partition the opposite side.
pub fn stable_match_tied<A: Agent>(
    proposers: &[A],
    reviewers: &[A],
    tiers: &TierTable<A>,
) -> Result<Matching<A>> {
    MatchingRunner::run_tied(proposers, reviewers, tiers, &MatchingConfig::default())
        .map(|r| r.matching)
}

fn check_config(config: &MatchingConfig) -> Result<()> {
    config.validate().map_err(MatchingError::InvalidConfig)
}

fn log_summary<A: Agent>(result: &MatchingResult<A>) {
    tracing::debug!(
        target: LOG_TARGET,
        proposals = result.proposals,
        matched = result.matching.len(),
        unmatched = result.unmatched_proposers.len(),
        "matching complete",
    );
}
