//! Deferred acceptance over strict total orders.

use super::config::{FreeOrder, MatchingConfig};
use super::cursor::ProposalCursor;
use super::pool::FreePool;
use super::types::Engagements;
use crate::error::Result;
use crate::instance::StrictInstance;
use crate::roster::Agent;
use crate::LOG_TARGET;

/// Runs the strict proposal loop.
///
/// Each step pops a free proposer, advances its cursor by one reviewer and
/// proposes. A free reviewer accepts; an engaged reviewer trades up only
/// for a strictly better rank, sending the displaced partner back to the
/// pool. The result is the proposer-optimal stable matching whatever the
/// extraction order.
pub(crate) fn run<A: Agent>(instance: &StrictInstance<A>, config: &MatchingConfig) -> Result<Engagements> {
    let n = instance.proposers().len();
    let ranks = instance.reviewer_ranks();

    let mut cursors: Vec<ProposalCursor> = (0..n)
        .map(|p| ProposalCursor::new(instance.proposer_list(p).len()))
        .collect();
    let mut free = FreePool::new(
        config.order_or(FreeOrder::Unordered),
        n,
        config.effective_seed(),
    );
    let mut state = Engagements::new(instance.reviewers().len(), config.max_proposals);

    while let Some(m) = free.pop() {
        // Complete lists never run dry.
        let Some(offset) = cursors[m].advance() else {
            continue;
        };
        state.record_proposal()?;
        let w = instance.proposer_list(m)[offset];

        match state.partner(w) {
            None => {
                state.engage(w, m);
                tracing::trace!(
                    target: LOG_TARGET,
                    proposer = %instance.proposers().agent(m),
                    reviewer = %instance.reviewers().agent(w),
                    "engaged",
                );
            }
            Some(incumbent) if ranks.prefers(w, m, incumbent) => {
                state.engage(w, m);
                free.push(incumbent);
                tracing::trace!(
                    target: LOG_TARGET,
                    proposer = %instance.proposers().agent(m),
                    reviewer = %instance.reviewers().agent(w),
                    displaced = %instance.proposers().agent(incumbent),
                    "replaced",
                );
            }
            Some(_) => {
                free.push(m);
                tracing::trace!(
                    target: LOG_TARGET,
                    proposer = %instance.proposers().agent(m),
                    reviewer = %instance.reviewers().agent(w),
                    "rejected",
                );
            }
        }
    }

    Ok(state)
}
