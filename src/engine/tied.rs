//! Deferred acceptance over tiers of tied candidates.

use super::config::{FreeOrder, MatchingConfig};
use super::cursor::ProposalCursor;
use super::pool::FreePool;
use super::types::Engagements;
use crate::error::Result;
use crate::instance::TiedInstance;
use crate::roster::Agent;
use crate::LOG_TARGET;

/// Runs the tiered proposal loop.
///
/// A cursor step opens a proposer's next tier. The proposer scans the
/// tier's members in declaration order and stops at the first that is free
/// or strictly prefers it to its current partner. If that reviewer later
/// drops it, the proposer resumes with the next untried member of the same
/// tier. Only once every member of the tier has turned it down does the
/// proposer move on to its next tier.
///
/// Reviewers only ever trade up strictly, so a rejection stays valid for
/// the rest of the run and the result is weakly stable: no pair strictly
/// prefers each other to their assignment.
pub(crate) fn run<A: Agent>(instance: &TiedInstance<A>, config: &MatchingConfig) -> Result<Engagements> {
    let n = instance.proposers().len();
    let ranks = instance.reviewer_ranks();

    let mut cursors: Vec<ProposalCursor> = (0..n)
        .map(|p| ProposalCursor::new(instance.proposer_tiers(p).len()))
        .collect();
    // open tier per proposer and the first member not yet tried in it
    let mut open: Vec<Option<(usize, usize)>> = vec![None; n];
    let mut free = FreePool::new(
        config.order_or(FreeOrder::Unordered),
        n,
        config.effective_seed(),
    );
    let mut state = Engagements::new(instance.reviewers().len(), config.max_proposals);

    'proposers: while let Some(m) = free.pop() {
        let (offset, start) = match open[m] {
            Some(position) => position,
            None => {
                let Some(offset) = cursors[m].advance() else {
                    tracing::trace!(
                        target: LOG_TARGET,
                        proposer = %instance.proposers().agent(m),
                        "exhausted",
                    );
                    continue;
                };
                (offset, 0)
            }
        };

        let tier = &instance.proposer_tiers(m)[offset];
        for (k, &w) in tier.iter().enumerate().skip(start) {
            state.record_proposal()?;
            match state.partner(w) {
                None => {
                    state.engage(w, m);
                    open[m] = Some((offset, k + 1));
                    tracing::trace!(
                        target: LOG_TARGET,
                        proposer = %instance.proposers().agent(m),
                        reviewer = %instance.reviewers().agent(w),
                        tier = offset + 1,
                        "engaged",
                    );
                    continue 'proposers;
                }
                Some(incumbent) if ranks.prefers(w, m, incumbent) => {
                    state.engage(w, m);
                    open[m] = Some((offset, k + 1));
                    free.push(incumbent);
                    tracing::trace!(
                        target: LOG_TARGET,
                        proposer = %instance.proposers().agent(m),
                        reviewer = %instance.reviewers().agent(w),
                        displaced = %instance.proposers().agent(incumbent),
                        tier = offset + 1,
                        "replaced",
                    );
                    continue 'proposers;
                }
                Some(_) => {}
            }
        }

        open[m] = None;
        free.push(m);
        tracing::trace!(
            target: LOG_TARGET,
            proposer = %instance.proposers().agent(m),
            tier = offset + 1,
            "tier rejected",
        );
    }

    Ok(state)
}
