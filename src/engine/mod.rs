//! Deferred-acceptance matching engines.
//!
//! Three policies share one loop shape: a pool of free proposers, a
//! per-proposer [`ProposalCursor`], and reviewer ranks from a
//! [`RankIndex`](crate::rank::RankIndex).
//!
//! - **Strict**: one candidate per step; a reviewer trades up on a strictly
//!   better rank.
//! - **Blocked**: strict, plus excluded pairs that are mutually
//!   unacceptable (see [`ExclusionPolicy`]).
//! - **Tied**: one tier per step; the proposer tries every member of the
//!   tier before it counts as rejected, and after a displacement it resumes
//!   with the tier's next untried member.
//!
//! # Key Types
//!
//! - [`MatchingConfig`]: free-pool order, exclusion policy, seed, budget
//! - [`MatchingRunner`]: validates input and runs an engine
//! - [`MatchingResult`]: final [`Matching`] plus run statistics

mod blocked;
mod config;
mod cursor;
mod pool;
mod runner;
mod strict;
mod tied;
mod types;

pub use config::{ExclusionPolicy, FreeOrder, MatchingConfig};
pub use cursor::ProposalCursor;
pub use pool::FreePool;
pub use runner::{stable_match_blocked, stable_match_strict, stable_match_tied, MatchingRunner};
pub use types::{Matching, MatchingResult, Variant};
