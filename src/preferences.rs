//! Input tables: strict preference lists, preference tiers, excluded pairs.
//!
//! These are the caller-facing shapes. They carry no guarantees on their
//! own; [`StrictInstance`](crate::instance::StrictInstance) and
//! [`TiedInstance`](crate::instance::TiedInstance) validate them.

use std::collections::{HashMap, HashSet};

use crate::roster::Agent;

/// Strict preferences: each agent's opposite-side candidates, most preferred first.
///
/// A single table holds both sides, keyed by agent.
///
/// # Examples
///
/// ```
/// use u_matching::PreferenceTable;
///
/// let prefs = PreferenceTable::new()
///     .with("xavier", ["amy", "bertha"])
///     .with("amy", ["xavier", "yancey"]);
/// assert_eq!(prefs.get(&"amy").unwrap(), &["xavier", "yancey"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PreferenceTable<A: Agent> {
    lists: HashMap<A, Vec<A>>,
}

impl<A: Agent> PreferenceTable<A> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            lists: HashMap::new(),
        }
    }

    /// Sets the list for `agent` and returns the table.
    pub fn with<I: IntoIterator<Item = A>>(mut self, agent: A, list: I) -> Self {
        self.insert(agent, list);
        self
    }

    /// Sets the list for `agent`, replacing any previous one.
    pub fn insert<I: IntoIterator<Item = A>>(&mut self, agent: A, list: I) {
        self.lists.insert(agent, list.into_iter().collect());
    }

    /// The list declared for `agent`.
    pub fn get(&self, agent: &A) -> Option<&[A]> {
        self.lists.get(agent).map(Vec::as_slice)
    }

    /// Number of agents with an entry.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl<A: Agent> Default for PreferenceTable<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Agent> From<HashMap<A, Vec<A>>> for PreferenceTable<A> {
    fn from(lists: HashMap<A, Vec<A>>) -> Self {
        Self { lists }
    }
}

impl<A: Agent> FromIterator<(A, Vec<A>)> for PreferenceTable<A> {
    fn from_iter<T: IntoIterator<Item = (A, Vec<A>)>>(iter: T) -> Self {
        Self {
            lists: iter.into_iter().collect(),
        }
    }
}

/// Tiered preferences: each agent's candidates grouped into ordered tiers.
///
/// Tier order is strict preference; members of one tier are tied. The
/// declaration order inside a tier is the order in which a proposer tries
/// them.
///
/// # Examples
///
/// ```
/// use u_matching::TierTable;
///
/// let tiers = TierTable::new()
///     .with("yancey", [vec!["amy", "bertha"], vec!["clare"]]);
/// assert_eq!(tiers.get(&"yancey").unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TierTable<A: Agent> {
    tiers: HashMap<A, Vec<Vec<A>>>,
}

impl<A: Agent> TierTable<A> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            tiers: HashMap::new(),
        }
    }

    /// Sets the tiers for `agent` and returns the table.
    pub fn with<I: IntoIterator<Item = Vec<A>>>(mut self, agent: A, tiers: I) -> Self {
        self.insert(agent, tiers);
        self
    }

    /// Sets the tiers for `agent`, replacing any previous ones.
    pub fn insert<I: IntoIterator<Item = Vec<A>>>(&mut self, agent: A, tiers: I) {
        self.tiers.insert(agent, tiers.into_iter().collect());
    }

    /// The tiers declared for `agent`.
    pub fn get(&self, agent: &A) -> Option<&[Vec<A>]> {
        self.tiers.get(agent).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl<A: Agent> Default for TierTable<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Agent> From<HashMap<A, Vec<Vec<A>>>> for TierTable<A> {
    fn from(tiers: HashMap<A, Vec<Vec<A>>>) -> Self {
        Self { tiers }
    }
}

impl<A: Agent> FromIterator<(A, Vec<Vec<A>>)> for TierTable<A> {
    fn from_iter<T: IntoIterator<Item = (A, Vec<Vec<A>>)>>(iter: T) -> Self {
        Self {
            tiers: iter.into_iter().collect(),
        }
    }
}

/// Pairs that may never be matched.
///
/// Membership is symmetric: `(a, b)` excludes `(b, a)` as well.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ExclusionSet<A: Agent> {
    pairs: HashSet<(A, A)>,
}

impl<A: Agent> ExclusionSet<A> {
    pub fn new() -> Self {
        Self {
            pairs: HashSet::new(),
        }
    }

    /// Excludes the pair and returns the set.
    pub fn with(mut self, first: A, second: A) -> Self {
        self.insert(first, second);
        self
    }

    /// Excludes the pair. Returns `false` if it was already excluded in
    /// either orientation.
    pub fn insert(&mut self, first: A, second: A) -> bool {
        if self.contains(&first, &second) {
            return false;
        }
        self.pairs.insert((first, second))
    }

    /// Whether the pair is excluded, in either orientation.
    pub fn contains(&self, a: &A, b: &A) -> bool {
        self.pairs.contains(&(a.clone(), b.clone())) || self.pairs.contains(&(b.clone(), a.clone()))
    }

    /// Number of distinct excluded pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs as inserted.
    pub fn iter(&self) -> impl Iterator<Item = &(A, A)> {
        self.pairs.iter()
    }
}

impl<A: Agent> Default for ExclusionSet<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Agent> FromIterator<(A, A)> for ExclusionSet<A> {
    fn from_iter<T: IntoIterator<Item = (A, A)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (a, b) in iter {
            set.insert(a, b);
        }
        set
    }
}
