//! Stable matching between two equal-sized sets of agents.
//!
//! Provides deferred-acceptance (Gale-Shapley) engines for three
//! progressively richer preference models:
//!
//! - **Strict**: every agent ranks the whole opposite side in a total order.
//! - **Blocked**: strict preferences plus a set of excluded pairs that may
//!   never be matched.
//! - **Tied**: preferences given as ordered tiers of equally ranked
//!   candidates; the result is weakly stable.
//!
//! # Architecture
//!
//! Input tables ([`PreferenceTable`], [`TierTable`], [`ExclusionSet`]) are
//! validated once into dense, index-based instances ([`StrictInstance`],
//! [`TiedInstance`]). The engines in [`engine`] run on those instances and
//! cannot fail on valid input; every error is reported before the first
//! proposal. [`stability`] checks finished matchings.
//!
//! # Examples
//!
//! ```
//! use u_matching::{stable_match_blocked, ExclusionSet, PreferenceTable};
//!
//! let prefs = PreferenceTable::new()
//!     .with("xavier", ["amy", "bertha"])
//!     .with("yancey", ["bertha", "amy"])
//!     .with("amy", ["yancey", "xavier"])
//!     .with("bertha", ["xavier", "yancey"]);
//! let excluded = ExclusionSet::new().with("xavier", "bertha");
//!
//! let matching =
//!     stable_match_blocked(&["xavier", "yancey"], &["amy", "bertha"], &prefs, &excluded).unwrap();
//! assert!(!matching.contains(&"bertha", &"xavier"));
//! ```

pub mod engine;
pub mod error;
pub mod instance;
pub mod preferences;
pub mod rank;
pub mod roster;
pub mod stability;

pub use engine::{
    stable_match_blocked, stable_match_strict, stable_match_tied, Matching, MatchingConfig,
    MatchingResult, MatchingRunner,
};
pub use error::{MatchingError, Result, TierFault};
pub use instance::{BlockedPairs, StrictInstance, TiedInstance};
pub use preferences::{ExclusionSet, PreferenceTable, TierTable};
pub use rank::RankIndex;
pub use roster::{Agent, Roster, Side};

/// `tracing` target for all engine events.
pub(crate) const LOG_TARGET: &str = "u-matching";
