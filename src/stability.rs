//! Stability checks for finished matchings.
//!
//! A pair (proposer, reviewer) *blocks* a matching when they are not
//! matched to each other and each strictly prefers the other to its current
//! partner. Being unmatched is worse than any ranked partner. For tiered
//! preferences, "strictly" means a better tier, which gives weak stability.

use crate::engine::Matching;
use crate::instance::{BlockedPairs, StrictInstance, TiedInstance};
use crate::rank::RankIndex;
use crate::roster::{Agent, Roster};

/// All blocking pairs of `matching`, as `(proposer, reviewer)`.
///
/// # Examples
///
/// ```
/// use u_matching::stability::blocking_pairs;
/// use u_matching::{Matching, PreferenceTable, StrictInstance};
///
/// let prefs = PreferenceTable::new()
///     .with("m1", ["w1", "w2"])
///     .with("m2", ["w1", "w2"])
///     .with("w1", ["m1", "m2"])
///     .with("w2", ["m1", "m2"]);
/// let instance = StrictInstance::new(&["m1", "m2"], &["w1", "w2"], &prefs).unwrap();
/// let swapped: Matching<&str> = vec![("w1", "m2"), ("w2", "m1")].into();
/// assert_eq!(blocking_pairs(&instance, &swapped), vec![("m1", "w1")]);
/// ```
pub fn blocking_pairs<A: Agent>(instance: &StrictInstance<A>, matching: &Matching<A>) -> Vec<(A, A)> {
    collect_blocking(
        instance.proposers(),
        instance.reviewers(),
        instance.proposer_ranks(),
        instance.reviewer_ranks(),
        matching,
        |_, _| false,
    )
}

/// Blocking pairs of `matching`, ignoring pairs that may never be matched.
pub fn blocking_pairs_excluding<A: Agent>(
    instance: &StrictInstance<A>,
    excluded: &BlockedPairs,
    matching: &Matching<A>,
) -> Vec<(A, A)> {
    collect_blocking(
        instance.proposers(),
        instance.reviewers(),
        instance.proposer_ranks(),
        instance.reviewer_ranks(),
        matching,
        |p, r| excluded.is_blocked(p, r),
    )
}

/// Pairs that strictly prefer each other (by tier) to their assignment.
pub fn weakly_blocking_pairs<A: Agent>(instance: &TiedInstance<A>, matching: &Matching<A>) -> Vec<(A, A)> {
    collect_blocking(
        instance.proposers(),
        instance.reviewers(),
        instance.proposer_ranks(),
        instance.reviewer_ranks(),
        matching,
        |_, _| false,
    )
}

/// Whether `matching` has no blocking pair.
pub fn is_stable<A: Agent>(instance: &StrictInstance<A>, matching: &Matching<A>) -> bool {
    blocking_pairs(instance, matching).is_empty()
}

/// Whether `matching` has no pair that strictly prefers each other.
pub fn is_weakly_stable<A: Agent>(instance: &TiedInstance<A>, matching: &Matching<A>) -> bool {
    weakly_blocking_pairs(instance, matching).is_empty()
}

fn collect_blocking<A, F>(
    proposers: &Roster<A>,
    reviewers: &Roster<A>,
    proposer_ranks: &RankIndex,
    reviewer_ranks: &RankIndex,
    matching: &Matching<A>,
    skip: F,
) -> Vec<(A, A)>
where
    A: Agent,
    F: Fn(usize, usize) -> bool,
{
    let mut proposer_partner = vec![None; proposers.len()];
    let mut reviewer_partner = vec![None; reviewers.len()];
    for (reviewer, proposer) in matching.iter() {
        if let (Some(r), Some(p)) = (reviewers.index_of(reviewer), proposers.index_of(proposer)) {
            reviewer_partner[r] = Some(p);
            proposer_partner[p] = Some(r);
        }
    }

    let mut pairs = Vec::new();
    for p in 0..proposers.len() {
        for r in 0..reviewers.len() {
            if proposer_partner[p] == Some(r) || skip(p, r) {
                continue;
            }
            let proposer_wants = match proposer_partner[p] {
                None => proposer_ranks.rank(p, r).is_some(),
                Some(current) => proposer_ranks.prefers(p, r, current),
            };
            let reviewer_wants = match reviewer_partner[r] {
                None => reviewer_ranks.rank(r, p).is_some(),
                Some(current) => reviewer_ranks.prefers(r, p, current),
            };
            if proposer_wants && reviewer_wants {
                pairs.push((proposers.agent(p).clone(), reviewers.agent(r).clone()));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::{ExclusionSet, PreferenceTable, TierTable};

    fn instance() -> StrictInstance<&'static str> {
        let prefs = PreferenceTable::new()
            .with("m1", ["w1", "w2"])
            .with("m2", ["w2", "w1"])
            .with("w1", ["m2", "m1"])
            .with("w2", ["m1", "m2"]);
        StrictInstance::new(&["m1", "m2"], &["w1", "w2"], &prefs).unwrap()
    }

    #[test]
    fn test_both_stable_matchings_pass() {
        let inst = instance();
        let proposer_optimal: Matching<&str> = vec![("w1", "m1"), ("w2", "m2")].into();
        let reviewer_optimal: Matching<&str> = vec![("w1", "m2"), ("w2", "m1")].into();
        assert!(is_stable(&inst, &proposer_optimal));
        assert!(is_stable(&inst, &reviewer_optimal));
    }

    #[test]
    fn test_empty_matching_is_blocked_everywhere() {
        let inst = instance();
        let pairs = blocking_pairs(&inst, &Matching::new());
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn test_excluded_pairs_never_block() {
        let inst = instance();
        let set = ExclusionSet::new().with("m1", "w1").with("m2", "w2");
        let excluded = BlockedPairs::resolve(&inst, &set).unwrap();
        let partial: Matching<&str> = vec![("w1", "m2")].into();
        // m1/w2 is the only acceptable pair outside the matching
        assert_eq!(
            blocking_pairs_excluding(&inst, &excluded, &partial),
            vec![("m1", "w2")]
        );
    }

    #[test]
    fn test_ties_do_not_block() {
        let tiers = TierTable::new()
            .with("m1", [vec!["w1", "w2"]])
            .with("m2", [vec!["w1", "w2"]])
            .with("w1", [vec!["m1", "m2"]])
            .with("w2", [vec!["m1"], vec!["m2"]]);
        let inst = TiedInstance::new(&["m1", "m2"], &["w1", "w2"], &tiers).unwrap();

        // w2 would rather have m1, but m1 is indifferent: weakly stable
        let m: Matching<&str> = vec![("w1", "m1"), ("w2", "m2")].into();
        assert!(is_weakly_stable(&inst, &m));
        assert!(weakly_blocking_pairs(&inst, &m).is_empty());
    }

    #[test]
    fn test_strict_tier_preference_blocks() {
        let tiers = TierTable::new()
            .with("m1", [vec!["w2"], vec!["w1"]])
            .with("m2", [vec!["w1", "w2"]])
            .with("w1", [vec!["m1", "m2"]])
            .with("w2", [vec!["m1"], vec!["m2"]]);
        let inst = TiedInstance::new(&["m1", "m2"], &["w1", "w2"], &tiers).unwrap();
        let m: Matching<&str> = vec![("w1", "m1"), ("w2", "m2")].into();
        assert_eq!(weakly_blocking_pairs(&inst, &m), vec![("m1", "w2")]);
    }
}
