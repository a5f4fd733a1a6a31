//! Deferred acceptance with excluded pairs.

use super::config::{ExclusionPolicy, FreeOrder, MatchingConfig};
use super::cursor::ProposalCursor;
use super::pool::FreePool;
use super::types::Engagements;
use crate::error::Result;
use crate::instance::{BlockedPairs, StrictInstance};
use crate::roster::Agent;
use crate::LOG_TARGET;

/// Runs the proposal loop with an exclusion gate.
///
/// Same shape as the strict loop, FIFO by default. An excluded pair is
/// mutually unacceptable:
///
/// - proposing to a free reviewer across an excluded pair forms no match;
///   under [`ExclusionPolicy::Drop`] the proposer leaves the pool for good,
///   under [`ExclusionPolicy::Requeue`] it rejoins and tries its next
///   candidate later;
/// - proposing to an engaged reviewer across an excluded pair always loses
///   the rank comparison, and the proposer rejoins the pool as after any
///   rejection.
///
/// A proposer whose cursor runs out is retired unmatched.
pub(crate) fn run<A: Agent>(
    instance: &StrictInstance<A>,
    blocked: &BlockedPairs,
    config: &MatchingConfig,
) -> Result<Engagements> {
    let n = instance.proposers().len();
    let ranks = instance.reviewer_ranks();

    let mut cursors: Vec<ProposalCursor> = (0..n)
        .map(|p| ProposalCursor::new(instance.proposer_list(p).len()))
        .collect();
    let mut free = FreePool::new(config.order_or(FreeOrder::Fifo), n, config.effective_seed());
    let mut state = Engagements::new(instance.reviewers().len(), config.max_proposals);

    while let Some(m) = free.pop() {
        let Some(offset) = cursors[m].advance() else {
            tracing::trace!(
                target: LOG_TARGET,
                proposer = %instance.proposers().agent(m),
                "exhausted",
            );
            continue;
        };
        state.record_proposal()?;
        let w = instance.proposer_list(m)[offset];
        let excluded = blocked.is_blocked(m, w);

        match state.partner(w) {
            None if !excluded => {
                state.engage(w, m);
                tracing::trace!(
                    target: LOG_TARGET,
                    proposer = %instance.proposers().agent(m),
                    reviewer = %instance.reviewers().agent(w),
                    "engaged",
                );
            }
            None => {
                if config.exclusion_policy == ExclusionPolicy::Requeue {
                    free.push(m);
                }
                tracing::trace!(
                    target: LOG_TARGET,
                    proposer = %instance.proposers().agent(m),
                    reviewer = %instance.reviewers().agent(w),
                    policy = ?config.exclusion_policy,
                    "excluded",
                );
            }
            Some(incumbent) if !excluded && ranks.prefers(w, m, incumbent) => {
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
                    excluded,
                    "rejected",
                );
            }
        }
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatchingError;
    use crate::preferences::{ExclusionSet, PreferenceTable};

    fn instance() -> StrictInstance<&'static str> {
        let prefs = PreferenceTable::new()
            .with("m1", ["w1", "w2"])
            .with("m2", ["w1", "w2"])
            .with("w1", ["m1", "m2"])
            .with("w2", ["m1", "m2"]);
        StrictInstance::new(&["m1", "m2"], &["w1", "w2"], &prefs).unwrap()
    }

    fn blocked(inst: &StrictInstance<&'static str>, pairs: &[(&'static str, &'static str)]) -> BlockedPairs {
        let set: ExclusionSet<&str> = pairs.iter().copied().collect();
        BlockedPairs::resolve(inst, &set).unwrap()
    }

    #[test]
    fn test_no_exclusions_matches_strict() {
        let inst = instance();
        let state = run(&inst, &BlockedPairs::none(), &MatchingConfig::default()).unwrap();
        assert_eq!(state.engaged, vec![Some(0), Some(1)]);
    }

    #[test]
    fn test_drop_policy_loses_proposer() {
        let inst = instance();
        let pairs = blocked(&inst, &[("m1", "w1")]);
        let state = run(&inst, &pairs, &MatchingConfig::default()).unwrap();
        // m1 -> w1 is excluded while w1 is free: m1 never proposes again
        assert_eq!(state.engaged, vec![Some(1), None]);
        assert_eq!(state.proposals, 2);
    }

    #[test]
    fn test_requeue_policy_moves_on() {
        let inst = instance();
        let pairs = blocked(&inst, &[("m1", "w1")]);
        let config = MatchingConfig::default().with_exclusion_policy(ExclusionPolicy::Requeue);
        let state = run(&inst, &pairs, &config).unwrap();
        assert_eq!(state.engaged, vec![Some(1), Some(0)]);
        assert_eq!(state.proposals, 3);
    }

    #[test]
    fn test_excluded_challenger_cannot_displace() {
        let prefs = PreferenceTable::new()
            .with("m1", ["w1", "w2"])
            .with("m2", ["w1", "w2"])
            .with("w1", ["m1", "m2"])
            .with("w2", ["m1", "m2"]);
        // m2 proposes first and holds w1 when m1 arrives
        let inst = StrictInstance::new(&["m2", "m1"], &["w1", "w2"], &prefs).unwrap();
        let pairs = blocked(&inst, &[("w1", "m1")]);
        let state = run(&inst, &pairs, &MatchingConfig::default()).unwrap();
        // w1 ranks m1 first but keeps m2; m1 is rejected, not dropped
        assert_eq!(state.engaged, vec![Some(0), Some(1)]);
        assert_eq!(state.proposals, 3);
    }

    #[test]
    fn test_everything_excluded_gives_empty_matching() {
        let inst = instance();
        let pairs = blocked(&inst, &[("m1", "w1"), ("m1", "w2"), ("m2", "w1"), ("m2", "w2")]);
        for policy in [ExclusionPolicy::Drop, ExclusionPolicy::Requeue] {
            let config = MatchingConfig::default().with_exclusion_policy(policy);
            let state = run(&inst, &pairs, &config).unwrap();
            assert!(state.engaged.iter().all(Option::is_none));
        }
    }

    #[test]
    fn test_budget_aborts_run() {
        // m1 -> w1, m2 -> w1 (rejected), then m2 -> w2 is one too many
        let config = MatchingConfig::default().with_max_proposals(2);
        assert_eq!(
            run(&instance(), &BlockedPairs::none(), &config).unwrap_err(),
            MatchingError::ProposalBudgetExceeded { budget: 2 }
        );
    }
}
