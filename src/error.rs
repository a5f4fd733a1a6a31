//! Error types for input validation and engine execution.

use std::fmt;

use thiserror::Error;

use crate::roster::Side;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MatchingError>;

/// What is wrong with a tiered preference list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierFault {
    /// The candidate appears in more than one tier (or twice in one tier).
    Duplicate,
    /// The candidate is on the opposite side but in none of the tiers.
    Missing,
    /// The candidate is not an agent of the opposite side.
    Unknown,
    /// A tier with no members.
    Empty,
}

impl fmt::Display for TierFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TierFault::Duplicate => "listed more than once",
            TierFault::Missing => "missing from every tier",
            TierFault::Unknown => "not an agent of the opposite side",
            TierFault::Empty => "empty tier",
        };
        f.write_str(s)
    }
}

/// Errors raised before or during a matching run.
///
/// All input errors are detected by validation before the proposal loop
/// starts, so a failed call never leaves a half-built matching behind.
/// Agent identities are rendered with `Display`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchingError {
    /// The two sides have different sizes.
    #[error("side sizes differ: {proposers} proposers, {reviewers} reviewers")]
    SizeMismatch { proposers: usize, reviewers: usize },

    /// An identifier appears twice in one side's agent list.
    #[error("{side} `{agent}` is listed more than once")]
    DuplicateAgent { side: Side, agent: String },

    /// An agent has no entry in the preference table.
    #[error("{side} `{agent}` has no preference entry")]
    MissingPreferences { side: Side, agent: String },

    /// A strict preference list omits an opposite-side agent.
    #[error("preferences of `{agent}` omit `{missing}`")]
    IncompletePreference { agent: String, missing: String },

    /// A strict preference list names an agent that is not on the opposite side.
    #[error("preferences of `{agent}` name unknown candidate `{candidate}`")]
    UnknownCandidate { agent: String, candidate: String },

    /// A strict preference list repeats a candidate.
    #[error("preferences of `{agent}` list `{candidate}` more than once")]
    DuplicateCandidate { agent: String, candidate: String },

    /// A tiered preference list is not a partition of the opposite side.
    #[error("tiers of `{agent}` are malformed at `{candidate}`: {fault}")]
    MalformedTier {
        agent: String,
        candidate: String,
        fault: TierFault,
    },

    /// An excluded pair does not join a proposer with a reviewer.
    #[error("excluded pair (`{first}`, `{second}`) does not join a proposer and a reviewer")]
    InvalidExclusionPair { first: String, second: String },

    /// The engine configuration is inconsistent.
    #[error("invalid matching config: {0}")]
    InvalidConfig(String),

    /// The run made more proposals than the configured budget allows.
    #[error("proposal budget of {budget} exhausted")]
    ProposalBudgetExceeded { budget: usize },
}
