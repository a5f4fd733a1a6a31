//! Per-proposer progress through its own preference list.

/// Monotone pointer into one proposer's list (or list of tiers).
///
/// Each call to [`advance`](Self::advance) consumes one entry; once the
/// cursor reaches the end the proposer has been turned down by every
/// candidate it could try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposalCursor {
    position: usize,
    len: usize,
}

impl ProposalCursor {
    /// A cursor at the start of a list of `len` entries.
    pub fn new(len: usize) -> Self {
        Self { position: 0, len }
    }

    /// Consumes the next entry and returns its offset, or `None` when
    /// the list is exhausted.
    #[inline]
    pub fn advance(&mut self) -> Option<usize> {
        if self.position >= self.len {
            return None;
        }
        let offset = self.position;
        self.position += 1;
        Some(offset)
    }

    /// Number of entries consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.len
    }
}
