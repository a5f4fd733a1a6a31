//! Engine outputs.

use std::collections::HashMap;
use std::fmt;

use crate::error::{MatchingError, Result};
use crate::roster::{Agent, Roster};

/// Which deferred-acceptance policy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    /// Strict total orders.
    Strict,
    /// Strict orders with excluded pairs.
    Blocked,
    /// Ordered tiers of tied candidates.
    Tied,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Strict => f.write_str("strict"),
            Variant::Blocked => f.write_str("blocked"),
            Variant::Tied => f.write_str("tied"),
        }
    }
}

/// A reviewer → proposer assignment with at most one entry per reviewer.
///
/// Iteration follows the reviewer roster order of the run that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        from = "Vec<(A, A)>",
        into = "Vec<(A, A)>",
        bound(serialize = "A: serde::Serialize", deserialize = "A: serde::Deserialize<'de>")
    )
)]
pub struct Matching<A: Agent> {
    /// `(reviewer, proposer)`
    pairs: Vec<(A, A)>,
    by_reviewer: HashMap<A, usize>,
    by_proposer: HashMap<A, usize>,
}

impl<A: Agent> Matching<A> {
    /// An empty matching.
    pub fn new() -> Self {
        Self {
            pairs: Vec::new(),
            by_reviewer: HashMap::new(),
            by_proposer: HashMap::new(),
        }
    }

    pub(crate) fn from_engagements(
        proposers: &Roster<A>,
        reviewers: &Roster<A>,
        engaged: &[Option<usize>],
    ) -> Self {
        engaged
            .iter()
            .enumerate()
            .filter_map(|(r, p)| p.map(|p| (reviewers.agent(r).clone(), proposers.agent(p).clone())))
            .collect::<Vec<_>>()
            .into()
    }

    /// The proposer matched to `reviewer`.
    pub fn get(&self, reviewer: &A) -> Option<&A> {
        self.by_reviewer.get(reviewer).map(|&i| &self.pairs[i].1)
    }

    /// The reviewer matched to `proposer`.
    pub fn reviewer_of(&self, proposer: &A) -> Option<&A> {
        self.by_proposer.get(proposer).map(|&i| &self.pairs[i].0)
    }

    /// Whether `reviewer` is matched to `proposer`.
    pub fn contains(&self, reviewer: &A, proposer: &A) -> bool {
        self.get(reviewer) == Some(proposer)
    }

    /// `(reviewer, proposer)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&A, &A)> {
        self.pairs.iter().map(|(r, p)| (r, p))
    }

    pub fn pairs(&self) -> &[(A, A)] {
        &self.pairs
    }

    /// Number of matched pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The matching as a plain reviewer → proposer map.
    pub fn to_map(&self) -> HashMap<A, A> {
        self.pairs.iter().cloned().collect()
    }
}

impl<A: Agent> Default for Matching<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Later pairs that reuse a reviewer or a proposer are dropped.
impl<A: Agent> From<Vec<(A, A)>> for Matching<A> {
    fn from(candidates: Vec<(A, A)>) -> Self {
        let mut matching = Self::new();
        for (reviewer, proposer) in candidates {
            if matching.by_reviewer.contains_key(&reviewer)
                || matching.by_proposer.contains_key(&proposer)
            {
                continue;
            }
            let i = matching.pairs.len();
            matching.by_reviewer.insert(reviewer.clone(), i);
            matching.by_proposer.insert(proposer.clone(), i);
            matching.pairs.push((reviewer, proposer));
        }
        matching
    }
}

impl<A: Agent> From<Matching<A>> for Vec<(A, A)> {
    fn from(matching: Matching<A>) -> Self {
        matching.pairs
    }
}

impl<A: Agent> fmt::Display for Matching<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (r, p)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{r}: {p}")?;
        }
        f.write_str("}")
    }
}

/// Result of one engine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingResult<A: Agent> {
    /// Final reviewer → proposer assignment.
    pub matching: Matching<A>,
    /// Policy that produced it.
    pub variant: Variant,
    /// Total proposals made (each candidate tried counts once).
    pub proposals: usize,
    /// Proposers left without a reviewer, in roster order.
    pub unmatched_proposers: Vec<A>,
}

impl<A: Agent> MatchingResult<A> {
    /// Whether every proposer ended up matched.
    pub fn is_complete(&self) -> bool {
        self.unmatched_proposers.is_empty()
    }
}

/// Engagement state shared by the three loops.
#[derive(Debug, Clone)]
pub(crate) struct Engagements {
    /// `engaged[reviewer] = Some(proposer)`
    pub(crate) engaged: Vec<Option<usize>>,
    pub(crate) proposals: usize,
    budget: usize,
}

impl Engagements {
    pub(crate) fn new(reviewers: usize, budget: usize) -> Self {
        Self {
            engaged: vec![None; reviewers],
            proposals: 0,
            budget,
        }
    }

    /// Counts one proposal against the budget.
    #[inline]
    pub(crate) fn record_proposal(&mut self) -> Result<()> {
        if self.budget > 0 && self.proposals >= self.budget {
            return Err(MatchingError::ProposalBudgetExceeded {
                budget: self.budget,
            });
        }
        self.proposals += 1;
        Ok(())
    }

    /// Current partner of `reviewer`.
    #[inline]
    pub(crate) fn partner(&self, reviewer: usize) -> Option<usize> {
        self.engaged[reviewer]
    }

    /// Engages `reviewer` to `proposer`, returning the displaced partner.
    #[inline]
    pub(crate) fn engage(&mut self, reviewer: usize, proposer: usize) -> Option<usize> {
        self.engaged[reviewer].replace(proposer)
    }

    pub(crate) fn into_result<A: Agent>(
        self,
        proposers: &Roster<A>,
        reviewers: &Roster<A>,
        variant: Variant,
    ) -> MatchingResult<A> {
        let mut matched = vec![false; proposers.len()];
        for &p in self.engaged.iter().flatten() {
            matched[p] = true;
        }
        let unmatched_proposers = matched
            .iter()
            .enumerate()
            .filter(|&(_, &m)| !m)
            .map(|(p, _)| proposers.agent(p).clone())
            .collect();

        MatchingResult {
            matching: Matching::from_engagements(proposers, reviewers, &self.engaged),
            variant,
            proposals: self.proposals,
            unmatched_proposers,
        }
    }
}
