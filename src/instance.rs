//! Validated, index-based problem instances.
//!
//! Construction performs every input check up front. A successfully built
//! instance is complete by construction: each proposer ranks every
//! reviewer and vice versa, so the engines can run without error paths.

use std::collections::HashSet;

use crate::error::{MatchingError, Result, TierFault};
use crate::preferences::{ExclusionSet, PreferenceTable, TierTable};
use crate::rank::RankIndex;
use crate::roster::{Agent, Roster, Side};

/// A validated strict-preference instance (used by the strict and blocked engines).
#[derive(Debug, Clone)]
pub struct StrictInstance<A: Agent> {
    proposers: Roster<A>,
    reviewers: Roster<A>,
    proposer_lists: Vec<Vec<usize>>,
    /// `[reviewer][proposer]`
    reviewer_ranks: RankIndex,
    /// `[proposer][reviewer]`
    proposer_ranks: RankIndex,
}

impl<A: Agent> StrictInstance<A> {
    /// Validates the inputs and builds the instance.
    ///
    /// # Errors
    /// [`DuplicateAgent`](MatchingError::DuplicateAgent),
    /// [`SizeMismatch`](MatchingError::SizeMismatch),
    /// [`MissingPreferences`](MatchingError::MissingPreferences),
    /// [`UnknownCandidate`](MatchingError::UnknownCandidate),
    /// [`DuplicateCandidate`](MatchingError::DuplicateCandidate), or
    /// [`IncompletePreference`](MatchingError::IncompletePreference).
    pub fn new(proposers: &[A], reviewers: &[A], prefs: &PreferenceTable<A>) -> Result<Self> {
        Self::build(proposers, reviewers, prefs, false)
    }

    pub(crate) fn build(
        proposers: &[A],
        reviewers: &[A],
        prefs: &PreferenceTable<A>,
        parallel: bool,
    ) -> Result<Self> {
        let (proposers, reviewers) = rosters(proposers, reviewers)?;
        let proposer_lists = side_lists(&proposers, &reviewers, prefs)?;
        let reviewer_lists = side_lists(&reviewers, &proposers, prefs)?;

        let reviewer_ranks = RankIndex::from_lists(&reviewer_lists, proposers.len(), parallel);
        let proposer_ranks = RankIndex::from_lists(&proposer_lists, reviewers.len(), parallel);

        Ok(Self {
            proposers,
            reviewers,
            proposer_lists,
            reviewer_ranks,
            proposer_ranks,
        })
    }

    pub fn proposers(&self) -> &Roster<A> {
        &self.proposers
    }

    pub fn reviewers(&self) -> &Roster<A> {
        &self.reviewers
    }

    /// Reviewer indices in proposer `p`'s order of preference.
    pub fn proposer_list(&self, p: usize) -> &[usize] {
        &self.proposer_lists[p]
    }

    /// Reviewer-side ranks, `[reviewer][proposer]`.
    pub fn reviewer_ranks(&self) -> &RankIndex {
        &self.reviewer_ranks
    }

    /// Proposer-side ranks, `[proposer][reviewer]`.
    pub fn proposer_ranks(&self) -> &RankIndex {
        &self.proposer_ranks
    }

    /// Rank that `reviewer` gives `proposer`, by identity.
    pub fn rank_of(&self, reviewer: &A, proposer: &A) -> Option<u32> {
        let r = self.reviewers.index_of(reviewer)?;
        let p = self.proposers.index_of(proposer)?;
        self.reviewer_ranks.rank(r, p)
    }
}

/// A validated tiered-preference instance.
#[derive(Debug, Clone)]
pub struct TiedInstance<A: Agent> {
    proposers: Roster<A>,
    reviewers: Roster<A>,
    proposer_tiers: Vec<Vec<Vec<usize>>>,
    reviewer_ranks: RankIndex,
    proposer_ranks: RankIndex,
}

impl<A: Agent> TiedInstance<A> {
    /// Validates the tiers and builds the instance.
    ///
    /// Each agent's tiers must partition the opposite side: no empty tier,
    /// no repeat, no unknown name, no omission. Any defect is reported as
    /// [`MalformedTier`](MatchingError::MalformedTier).
    pub fn new(proposers: &[A], reviewers: &[A], tiers: &TierTable<A>) -> Result<Self> {
        Self::build(proposers, reviewers, tiers, false)
    }

    pub(crate) fn build(
        proposers: &[A],
        reviewers: &[A],
        tiers: &TierTable<A>,
        parallel: bool,
    ) -> Result<Self> {
        let (proposers, reviewers) = rosters(proposers, reviewers)?;
        let proposer_tiers = side_tiers(&proposers, &reviewers, tiers)?;
        let reviewer_tiers = side_tiers(&reviewers, &proposers, tiers)?;

        let reviewer_ranks = RankIndex::from_tiers(&reviewer_tiers, proposers.len(), parallel);
        let proposer_ranks = RankIndex::from_tiers(&proposer_tiers, reviewers.len(), parallel);

        Ok(Self {
            proposers,
            reviewers,
            proposer_tiers,
            reviewer_ranks,
            proposer_ranks,
        })
    }

    pub fn proposers(&self) -> &Roster<A> {
        &self.proposers
    }

    pub fn reviewers(&self) -> &Roster<A> {
        &self.reviewers
    }

    /// Proposer `p`'s tiers of reviewer indices, best tier first.
    pub fn proposer_tiers(&self, p: usize) -> &[Vec<usize>] {
        &self.proposer_tiers[p]
    }

    /// Reviewer-side tier ranks, `[reviewer][proposer]`.
    pub fn reviewer_ranks(&self) -> &RankIndex {
        &self.reviewer_ranks
    }

    /// Proposer-side tier ranks, `[proposer][reviewer]`.
    pub fn proposer_ranks(&self) -> &RankIndex {
        &self.proposer_ranks
    }

    /// Tier rank that `reviewer` gives `proposer`, by identity.
    pub fn rank_of(&self, reviewer: &A, proposer: &A) -> Option<u32> {
        let r = self.reviewers.index_of(reviewer)?;
        let p = self.proposers.index_of(proposer)?;
        self.reviewer_ranks.rank(r, p)
    }
}

/// Excluded pairs resolved to `(proposer, reviewer)` indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedPairs {
    pairs: HashSet<(usize, usize)>,
}

impl BlockedPairs {
    /// No exclusions.
    pub fn none() -> Self {
        Self::default()
    }

    /// Canonicalizes every excluded pair against the instance's rosters.
    ///
    /// A pair may be given in either orientation. When an identifier sits on
    /// both sides, every valid orientation is excluded.
    ///
    /// # Errors
    /// [`InvalidExclusionPair`](MatchingError::InvalidExclusionPair) if a pair
    /// does not join a proposer with a reviewer in any orientation.
    pub fn resolve<A: Agent>(instance: &StrictInstance<A>, excluded: &ExclusionSet<A>) -> Result<Self> {
        let proposers = instance.proposers();
        let reviewers = instance.reviewers();
        let mut pairs = HashSet::with_capacity(excluded.len());

        for (a, b) in excluded.iter() {
            let mut resolved = false;
            for (m, w) in [(a, b), (b, a)] {
                if let (Some(p), Some(r)) = (proposers.index_of(m), reviewers.index_of(w)) {
                    pairs.insert((p, r));
                    resolved = true;
                }
            }
            if !resolved {
                return Err(MatchingError::InvalidExclusionPair {
                    first: a.to_string(),
                    second: b.to_string(),
                });
            }
        }
        Ok(Self { pairs })
    }

    /// Whether proposer `p` and reviewer `r` may never be matched.
    #[inline]
    pub fn is_blocked(&self, p: usize, r: usize) -> bool {
        self.pairs.contains(&(p, r))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn rosters<A: Agent>(proposers: &[A], reviewers: &[A]) -> Result<(Roster<A>, Roster<A>)> {
    let proposers = Roster::new(proposers, Side::Proposer)?;
    let reviewers = Roster::new(reviewers, Side::Reviewer)?;
    if proposers.len() != reviewers.len() {
        return Err(MatchingError::SizeMismatch {
            proposers: proposers.len(),
            reviewers: reviewers.len(),
        });
    }
    Ok((proposers, reviewers))
}

fn side_lists<A: Agent>(
    side: &Roster<A>,
    opposite: &Roster<A>,
    prefs: &PreferenceTable<A>,
) -> Result<Vec<Vec<usize>>> {
    side.iter()
        .map(|agent| {
            let list = prefs
                .get(agent)
                .ok_or_else(|| MatchingError::MissingPreferences {
                    side: side.side(),
                    agent: agent.to_string(),
                })?;
            dense_list(agent, list, opposite)
        })
        .collect()
}

fn dense_list<A: Agent>(agent: &A, list: &[A], opposite: &Roster<A>) -> Result<Vec<usize>> {
    let mut seen = vec![false; opposite.len()];
    let mut dense = Vec::with_capacity(list.len());

    for candidate in list {
        let idx = opposite
            .index_of(candidate)
            .ok_or_else(|| MatchingError::UnknownCandidate {
                agent: agent.to_string(),
                candidate: candidate.to_string(),
            })?;
        if std::mem::replace(&mut seen[idx], true) {
            return Err(MatchingError::DuplicateCandidate {
                agent: agent.to_string(),
                candidate: candidate.to_string(),
            });
        }
        dense.push(idx);
    }

    if let Some(missing) = seen.iter().position(|&s| !s) {
        return Err(MatchingError::IncompletePreference {
            agent: agent.to_string(),
            missing: opposite.agent(missing).to_string(),
        });
    }
    Ok(dense)
}

fn side_tiers<A: Agent>(
    side: &Roster<A>,
    opposite: &Roster<A>,
    table: &TierTable<A>,
) -> Result<Vec<Vec<Vec<usize>>>> {
    side.iter()
        .map(|agent| {
            let tiers = table
                .get(agent)
                .ok_or_else(|| MatchingError::MissingPreferences {
                    side: side.side(),
                    agent: agent.to_string(),
                })?;
            dense_tiers(agent, tiers, opposite)
        })
        .collect()
}

fn dense_tiers<A: Agent>(agent: &A, tiers: &[Vec<A>], opposite: &Roster<A>) -> Result<Vec<Vec<usize>>> {
    let malformed = |candidate: String, fault: TierFault| MatchingError::MalformedTier {
        agent: agent.to_string(),
        candidate,
        fault,
    };

    let mut seen = vec![false; opposite.len()];
    let mut dense = Vec::with_capacity(tiers.len());

    for (k, tier) in tiers.iter().enumerate() {
        if tier.is_empty() {
            return Err(malformed(format!("tier {}", k + 1), TierFault::Empty));
        }
        let mut members = Vec::with_capacity(tier.len());
        for candidate in tier {
            let idx = opposite
                .index_of(candidate)
                .ok_or_else(|| malformed(candidate.to_string(), TierFault::Unknown))?;
            if std::mem::replace(&mut seen[idx], true) {
                return Err(malformed(candidate.to_string(), TierFault::Duplicate));
            }
            members.push(idx);
        }
        dense.push(members);
    }

    if let Some(missing) = seen.iter().position(|&s| !s) {
        return Err(malformed(
            opposite.agent(missing).to_string(),
            TierFault::Missing,
        ));
    }
    Ok(dense)
}
