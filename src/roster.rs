//! Agent identity and dense per-side indexing.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::{MatchingError, Result};

/// An opaque identifier for one proposer or one reviewer.
///
/// Blanket-implemented for every type that is cloneable, hashable, and
/// printable, so `&str`, `String`, and integer ids all work.
pub trait Agent: Clone + Eq + Hash + fmt::Debug + fmt::Display {}

impl<T> Agent for T where T: Clone + Eq + Hash + fmt::Debug + fmt::Display {}

/// Which side of the market an agent belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Initiates proposals.
    Proposer,
    /// Accepts or rejects proposals.
    Reviewer,
}

impl Side {
    /// The other side.
    pub fn opposite(self) -> Self {
        match self {
            Side::Proposer => Side::Reviewer,
            Side::Reviewer => Side::Proposer,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Proposer => f.write_str("proposer"),
            Side::Reviewer => f.write_str("reviewer"),
        }
    }
}

/// The agents of one side, in declaration order, with a dense index.
///
/// Index `i` refers to the `i`-th agent passed to [`Roster::new`]. The
/// engines work entirely on these indices.
#[derive(Debug, Clone)]
pub struct Roster<A: Agent> {
    side: Side,
    agents: Vec<A>,
    index: HashMap<A, usize>,
}

impl<A: Agent> Roster<A> {
    /// Builds a roster, rejecting repeated identifiers.
    pub fn new(agents: &[A], side: Side) -> Result<Self> {
        let mut index = HashMap::with_capacity(agents.len());
        for (i, agent) in agents.iter().enumerate() {
            if index.insert(agent.clone(), i).is_some() {
                return Err(MatchingError::DuplicateAgent {
                    side,
                    agent: agent.to_string(),
                });
            }
        }
        Ok(Self {
            side,
            agents: agents.to_vec(),
            index,
        })
    }

    /// The side this roster describes.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Number of agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Dense index of `agent`, if it belongs to this side.
    pub fn index_of(&self, agent: &A) -> Option<usize> {
        self.index.get(agent).copied()
    }

    /// Whether `agent` belongs to this side.
    pub fn contains(&self, agent: &A) -> bool {
        self.index.contains_key(agent)
    }

    /// The agent at dense index `i`.
    ///
    /// # Panics
    /// Panics if `i >= self.len()`.
    pub fn agent(&self, i: usize) -> &A {
        &self.agents[i]
    }

    /// Agents in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.agents.iter()
    }
}
