//! The pool of free proposers.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::FreeOrder;

/// Free proposers, either as a FIFO queue or as an unordered set.
///
/// Unordered extraction picks a uniformly random member with a seeded
/// generator, so a run is reproducible for a fixed seed.
#[derive(Debug, Clone)]
pub enum FreePool {
    /// First in, first out.
    Fifo(VecDeque<usize>),
    /// Arbitrary extraction.
    Unordered {
        members: Vec<usize>,
        rng: StdRng,
    },
}

impl FreePool {
    /// A pool holding proposers `0..n`.
    pub fn new(order: FreeOrder, n: usize, seed: u64) -> Self {
        match order {
            FreeOrder::Fifo => FreePool::Fifo((0..n).collect()),
            FreeOrder::Unordered => FreePool::Unordered {
                members: (0..n).collect(),
                rng: StdRng::seed_from_u64(seed),
            },
        }
    }

    /// Which extraction order this pool uses.
    pub fn order(&self) -> FreeOrder {
        match self {
            FreePool::Fifo(_) => FreeOrder::Fifo,
            FreePool::Unordered { .. } => FreeOrder::Unordered,
        }
    }

    /// Removes the next proposer to process.
    pub fn pop(&mut self) -> Option<usize> {
        match self {
            FreePool::Fifo(queue) => queue.pop_front(),
            FreePool::Unordered { members, rng } => {
                if members.is_empty() {
                    return None;
                }
                let i = rng.random_range(0..members.len());
                Some(members.swap_remove(i))
            }
        }
    }

    /// Returns a proposer to the pool.
    pub fn push(&mut self, proposer: usize) {
        match self {
            FreePool::Fifo(queue) => queue.push_back(proposer),
            FreePool::Unordered { members, .. } => members.push(proposer),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FreePool::Fifo(queue) => queue.len(),
            FreePool::Unordered { members, .. } => members.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
