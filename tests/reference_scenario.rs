//! The three-by-three reference instance, pinned end to end.

use u_matching::engine::{ExclusionPolicy, FreeOrder, MatchingConfig, MatchingRunner, Variant};
use u_matching::stability::{blocking_pairs, is_stable, is_weakly_stable};
use u_matching::{
    stable_match_blocked, stable_match_strict, stable_match_tied, ExclusionSet, MatchingError,
    PreferenceTable, StrictInstance, TierFault, TiedInstance, TierTable,
};

const MEN: [&str; 3] = ["xavier", "yancey", "zeus"];
const WOMEN: [&str; 3] = ["amy", "bertha", "clare"];

fn prefs() -> PreferenceTable<&'static str> {
    PreferenceTable::new()
        .with("xavier", ["amy", "bertha", "clare"])
        .with("yancey", ["bertha", "amy", "clare"])
        .with("zeus", ["amy", "bertha", "clare"])
        .with("amy", ["yancey", "xavier", "zeus"])
        .with("bertha", ["xavier", "yancey", "zeus"])
        .with("clare", ["xavier", "yancey", "zeus"])
}

fn tiers() -> TierTable<&'static str> {
    TierTable::new()
        .with("xavier", [vec!["bertha"], vec!["amy"], vec!["clare"]])
        .with("yancey", [vec!["amy", "bertha"], vec!["clare"]])
        .with("zeus", [vec!["amy"], vec!["bertha", "clare"]])
        .with("amy", [vec!["zeus", "xavier", "yancey"]])
        .with("bertha", [vec!["zeus"], vec!["xavier"], vec!["yancey"]])
        .with("clare", [vec!["xavier", "yancey"], vec!["zeus"]])
}

fn excluded() -> ExclusionSet<&'static str> {
    ExclusionSet::new()
        .with("xavier", "clare")
        .with("zeus", "clare")
        .with("zeus", "amy")
}

// ---- strict ----

#[test]
fn test_strict_golden_matching() {
    let matching = stable_match_strict(&MEN, &WOMEN, &prefs()).unwrap();
    assert_eq!(matching.to_string(), "{amy: xavier, bertha: yancey, clare: zeus}");
    let instance = StrictInstance::new(&MEN, &WOMEN, &prefs()).unwrap();
    assert!(is_stable(&instance, &matching));
}

#[test]
fn test_reviewer_proposing_gives_the_other_stable_matching() {
    // with the roles swapped the women propose
    let matching = stable_match_strict(&WOMEN, &MEN, &prefs()).unwrap();
    assert_eq!(matching.get(&"yancey"), Some(&"amy"));
    assert_eq!(matching.get(&"xavier"), Some(&"bertha"));
    assert_eq!(matching.get(&"zeus"), Some(&"clare"));

    // read back as reviewer -> proposer it is also stable for the men-proposing side
    let inverted: u_matching::Matching<&str> = matching
        .iter()
        .map(|(man, woman)| (*woman, *man))
        .collect::<Vec<_>>()
        .into();
    assert_eq!(inverted.to_string(), "{amy: yancey, bertha: xavier, clare: zeus}");
    let instance = StrictInstance::new(&MEN, &WOMEN, &prefs()).unwrap();
    assert!(blocking_pairs(&instance, &inverted).is_empty());
}

#[test]
fn test_strict_is_independent_of_extraction_order() {
    let golden = stable_match_strict(&MEN, &WOMEN, &prefs()).unwrap();
    for seed in 0..16 {
        let config = MatchingConfig::default().with_seed(seed);
        let result = MatchingRunner::run_strict(&MEN, &WOMEN, &prefs(), &config).unwrap();
        assert_eq!(result.matching, golden, "seed {seed}");
    }
    let fifo = MatchingConfig::default().with_free_order(FreeOrder::Fifo);
    let result = MatchingRunner::run_strict(&MEN, &WOMEN, &prefs(), &fifo).unwrap();
    assert_eq!(result.matching, golden);
    // zeus is turned down by amy and bertha before settling for clare
    assert_eq!(result.proposals, 5);
}

#[test]
fn test_strict_rerun_is_identical() {
    let a = stable_match_strict(&MEN, &WOMEN, &prefs()).unwrap();
    let b = stable_match_strict(&MEN, &WOMEN, &prefs()).unwrap();
    assert_eq!(a, b);
}

// ---- blocked ----

#[test]
fn test_blocked_golden_matching() {
    let config = MatchingConfig::default();
    let result = MatchingRunner::run_blocked(&MEN, &WOMEN, &prefs(), &excluded(), &config).unwrap();

    assert_eq!(result.variant, Variant::Blocked);
    assert_eq!(result.matching.to_string(), "{amy: xavier, bertha: yancey}");
    assert_eq!(result.unmatched_proposers, vec!["zeus"]);
    assert_eq!(result.proposals, 5);
}

#[test]
fn test_blocked_never_contains_an_excluded_pair() {
    let excluded = excluded();
    for policy in [ExclusionPolicy::Drop, ExclusionPolicy::Requeue] {
        for order in [FreeOrder::Fifo, FreeOrder::Unordered] {
            let config = MatchingConfig::default()
                .with_exclusion_policy(policy)
                .with_free_order(order);
            let result =
                MatchingRunner::run_blocked(&MEN, &WOMEN, &prefs(), &excluded, &config).unwrap();
            for (woman, man) in result.matching.iter() {
                assert!(
                    !excluded.contains(man, woman),
                    "{man}/{woman} matched under {policy:?}/{order:?}"
                );
            }
        }
    }
}

#[test]
fn test_blocked_without_exclusions_equals_strict() {
    let strict = stable_match_strict(&MEN, &WOMEN, &prefs()).unwrap();
    let blocked = stable_match_blocked(&MEN, &WOMEN, &prefs(), &ExclusionSet::new()).unwrap();
    assert_eq!(strict, blocked);
}

#[test]
fn test_blocked_with_every_pair_excluded_is_empty() {
    let all: ExclusionSet<&str> = MEN
        .iter()
        .flat_map(|m| WOMEN.iter().map(move |w| (*m, *w)))
        .collect();
    assert_eq!(all.len(), 9);
    let matching = stable_match_blocked(&MEN, &WOMEN, &prefs(), &all).unwrap();
    assert!(matching.is_empty());
}

#[test]
fn test_blocked_rejects_unknown_pair() {
    let bad = excluded().with("zeus", "dora");
    let err = stable_match_blocked(&MEN, &WOMEN, &prefs(), &bad).unwrap_err();
    assert_eq!(
        err,
        MatchingError::InvalidExclusionPair {
            first: "zeus".into(),
            second: "dora".into()
        }
    );
}

// ---- tied ----

#[test]
fn test_tied_fifo_golden_matching() {
    let config = MatchingConfig::default().with_free_order(FreeOrder::Fifo);
    let result = MatchingRunner::run_tied(&MEN, &WOMEN, &tiers(), &config).unwrap();
    assert_eq!(result.matching.get(&"amy"), Some(&"yancey"));
    assert_eq!(result.matching.get(&"bertha"), Some(&"zeus"));
    assert_eq!(result.matching.get(&"clare"), Some(&"xavier"));
    assert!(result.is_complete());
}

#[test]
fn test_tied_is_weakly_stable_for_any_seed() {
    let instance = TiedInstance::new(&MEN, &WOMEN, &tiers()).unwrap();
    for seed in 0..16 {
        let config = MatchingConfig::default().with_seed(seed);
        let result = MatchingRunner::solve_tied(&instance, &config).unwrap();
        assert_eq!(result.matching.len(), 3, "seed {seed}");
        assert!(is_weakly_stable(&instance, &result.matching), "seed {seed}");
    }
    let matching = stable_match_tied(&MEN, &WOMEN, &tiers()).unwrap();
    assert!(is_weakly_stable(&instance, &matching));
}

#[test]
fn test_tied_rejects_repeated_member() {
    let bad = tiers().with("clare", [vec!["xavier", "yancey"], vec!["zeus", "yancey"]]);
    let err = stable_match_tied(&MEN, &WOMEN, &bad).unwrap_err();
    assert_eq!(
        err,
        MatchingError::MalformedTier {
            agent: "clare".into(),
            candidate: "yancey".into(),
            fault: TierFault::Duplicate
        }
    );
}

// ---- boundaries ----

#[test]
fn test_single_pair_is_trivial() {
    let prefs = PreferenceTable::new().with("xavier", ["amy"]).with("amy", ["xavier"]);
    let strict = stable_match_strict(&["xavier"], &["amy"], &prefs).unwrap();
    assert_eq!(strict.get(&"amy"), Some(&"xavier"));

    let tiers = TierTable::new()
        .with("xavier", [vec!["amy"]])
        .with("amy", [vec!["xavier"]]);
    let tied = stable_match_tied(&["xavier"], &["amy"], &tiers).unwrap();
    assert_eq!(tied, strict);
}

#[test]
fn test_runs_under_a_trace_subscriber() {
    use tracing_subscriber::{filter, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = filter::Targets::new().with_target("u-matching", tracing::Level::TRACE);
    let _guard = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE),
        )
        .with(filter)
        .set_default();

    let result =
        MatchingRunner::run_blocked(&MEN, &WOMEN, &prefs(), &excluded(), &MatchingConfig::default())
            .unwrap();
    assert_eq!(result.matching.len(), 2);
}
