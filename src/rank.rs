//! Reviewer-side rank lookup.
//!
//! A [`RankIndex`] turns every reviewer's ordering into a constant-time
//! lookup `rank(reviewer, proposer)`, where a lower rank means more
//! preferred. Strict lists get ranks `1, 2, 3, ...` by position; tiered
//! lists give every member of tier `k` the rank `k + 1`.
//!
//! Both dimensions use the dense indices of the proposer and reviewer
//! [`Roster`](crate::roster::Roster)s. Proposer-side ranks use the same
//! table with the two dimensions swapped.

/// Rank table indexed by `[reviewer][proposer]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankIndex {
    rows: Vec<Vec<Option<u32>>>,
}

impl RankIndex {
    /// Builds ranks from one strict list per reviewer.
    ///
    /// `lists[r]` holds proposer indices, most preferred first. Every index
    /// must be below `proposers`.
    pub fn from_lists(lists: &[Vec<usize>], proposers: usize, parallel: bool) -> Self {
        let rows = build_rows(lists, parallel, |list| {
            let mut row = vec![None; proposers];
            for (pos, &p) in list.iter().enumerate() {
                row[p] = Some(pos as u32 + 1);
            }
            row
        });
        Self { rows }
    }

    /// Builds ranks from one list of tiers per reviewer.
    ///
    /// All members of a tier share that tier's rank.
    pub fn from_tiers(tiers: &[Vec<Vec<usize>>], proposers: usize, parallel: bool) -> Self {
        let rows = build_rows(tiers, parallel, |reviewer_tiers| {
            let mut row = vec![None; proposers];
            for (tier, members) in reviewer_tiers.iter().enumerate() {
                for &p in members {
                    row[p] = Some(tier as u32 + 1);
                }
            }
            row
        });
        Self { rows }
    }

    /// Number of reviewers covered.
    pub fn reviewers(&self) -> usize {
        self.rows.len()
    }

    /// Rank that `reviewer` gives `proposer`, or `None` if the proposer is
    /// absent from the reviewer's ordering.
    #[inline]
    pub fn rank(&self, reviewer: usize, proposer: usize) -> Option<u32> {
        self.rows[reviewer][proposer]
    }

    /// Whether `reviewer` strictly prefers `challenger` over `incumbent`.
    ///
    /// An absent proposer is ranked below every present one and ties with
    /// other absent proposers.
    #[inline]
    pub fn prefers(&self, reviewer: usize, challenger: usize, incumbent: usize) -> bool {
        match (self.rank(reviewer, challenger), self.rank(reviewer, incumbent)) {
            (Some(c), Some(i)) => c < i,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

/// Builds one rank row per reviewer, in parallel when enabled.
fn build_rows<T, F>(sources: &[T], parallel: bool, row: F) -> Vec<Vec<Option<u32>>>
where
    T: Sync,
    F: Fn(&T) -> Vec<Option<u32>> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;
            return sources.par_iter().map(&row).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    sources.iter().map(row).collect()
}
