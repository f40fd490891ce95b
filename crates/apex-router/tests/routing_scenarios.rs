// SPDX-FileCopyrightText: 2026 Apex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end routing scenarios over the default configuration.

use apex_config::{ApexConfig, TierTable};
use apex_core::{
    AmbiguityLevel, ComplexityLevel, InboundMessage, Intent, NudgeType, SessionContext,
    StepOutput,
};
use apex_router::ApexRouter;
use proptest::prelude::*;

fn router() -> ApexRouter {
    ApexRouter::new(ApexConfig::default()).expect("default config is valid")
}

#[test]
fn greeting_is_quick_and_unambiguous() {
    let decision = router().route(&InboundMessage::new("hi"), None);
    assert_eq!(decision.classification.intent, Intent::Quick);
    assert!(decision.classification.confidence >= 85);
    assert_eq!(decision.classification.ambiguity.level, AmbiguityLevel::None);
    assert!(!decision.multi_model);
}

#[test]
fn cloud_comparison_is_strategic_complex_chain() {
    let decision = router().route(
        &InboundMessage::new(
            "compare AWS vs GCP vs Azure for our startup, considering cost and scalability trade-offs",
        ),
        None,
    );
    assert_eq!(decision.classification.intent, Intent::Strategic);
    assert_eq!(decision.classification.complexity.level, ComplexityLevel::Complex);
    assert!(decision.multi_model);
    assert_eq!(decision.chain.len(), 3);
    assert_eq!(decision.chain[0].position, 1);
    assert_eq!(decision.chain[1].position, 2);
    assert_eq!(decision.chain[2].position, 3);
    assert_eq!(decision.chain[2].output, StepOutput::Synthesis);
}

#[test]
fn unresolved_pronoun_without_history_is_highly_ambiguous() {
    let result = router().classify(&InboundMessage::new("uska price kya hai"));
    assert_eq!(result.ambiguity.level, AmbiguityLevel::High);
    assert!(!result.ambiguity.reasons.is_empty());
}

#[test]
fn repeated_message_same_user_lands_on_same_backend() {
    let router = router();
    let msg = InboundMessage::new("summarize the quarterly report for me please")
        .with_user_id("user-7");
    let first = router.route(&msg, None);
    let second = router.route(&msg, None);
    assert_eq!(first.primary, second.primary);
    assert_eq!(first.seed, second.seed);
}

#[test]
fn confused_starter_gets_simplify_before_action() {
    let decision = router().route(
        &InboundMessage::new("I'm confused about system design, how do I start?"),
        None,
    );
    assert!(matches!(
        decision.classification.intent,
        Intent::Technical | Intent::Learning
    ));
    // Both a Simplify and an Action pattern match; Simplify is checked first.
    assert_eq!(decision.classification.nudge, Some(NudgeType::Simplify));
}

#[test]
fn region_without_advisor_uses_its_fallback_pair() {
    let mut config = ApexConfig::default();
    let mut region = TierTable::empty();
    region.advisor = vec!["gpt-4o".to_string(), "claude-sonnet-4".to_string()];
    config.regions.overrides.insert("IN".to_string(), region);
    let router = ApexRouter::new(config).expect("config is valid");

    let decision = router.route(
        &InboundMessage::new("what pricing strategy should we pick for the new market, any trade-off?")
            .with_region("IN"),
        None,
    );
    assert_eq!(decision.classification.intent, Intent::Strategic);
    assert!(["gpt-4o", "claude-sonnet-4"].contains(&decision.primary.as_str()));
}

#[test]
fn region_with_empty_advisor_falls_back_to_default_table() {
    let mut config = ApexConfig::default();
    config
        .regions
        .overrides
        .insert("EU".to_string(), TierTable::empty());
    let router = ApexRouter::new(config).expect("config is valid");

    let decision = router.route(
        &InboundMessage::new("what pricing strategy should we pick for the new market, any trade-off?")
            .with_region("EU"),
        None,
    );
    // Default advisor list is the single designated backend.
    assert_eq!(decision.primary, "claude-opus-4");
}

#[test]
fn locked_session_keeps_the_thread_intent() {
    let router = router();
    let mut session = SessionContext::new();
    session.turn_number = 4;
    session.locked_intent = Some(Intent::Learning);
    session.intent_locked = true;

    let decision = router.route(
        &InboundMessage::new("and what about the deployment side of things"),
        Some(&session),
    );
    assert_eq!(decision.classification.intent, Intent::Learning);
    assert!(decision.follow_up);
}

#[test]
fn elapsed_time_is_recorded() {
    let result = router().classify(&InboundMessage::new(
        "analyze the latency breakdown across our services",
    ));
    // Always present; zero only if the clock did not tick.
    let _ = result.elapsed_us;
    assert!(result.confidence <= 100);
}

proptest! {
    #[test]
    fn routing_is_total_and_well_formed(text in ".{0,400}") {
        let decision = router().route(&InboundMessage::new(text), None);
        prop_assert!(decision.classification.confidence <= 100);
        prop_assert!(decision.seed < 100);
        prop_assert!(!decision.primary.is_empty());
        if decision.multi_model {
            prop_assert!(decision.chain.len() >= 2);
            for (idx, step) in decision.chain.iter().enumerate() {
                prop_assert_eq!(step.position as usize, idx + 1);
            }
            prop_assert_eq!(&decision.primary, &decision.chain[0].backend);
        } else {
            prop_assert!(decision.chain.is_empty());
        }
    }

    #[test]
    fn report_caps_hold(text in ".{0,400}") {
        let result = router().classify(&InboundMessage::new(text));
        prop_assert!(result.ambiguity.reasons.len() <= 3);
        prop_assert!(result.ambiguity.possible_meanings.len() <= 4);
        prop_assert!(result.complexity.factors.len() <= 3);
    }

    #[test]
    fn routing_is_deterministic(text in ".{0,200}", user in proptest::option::of("[a-z0-9]{1,12}")) {
        let router = router();
        let mut msg = InboundMessage::new(text);
        if let Some(user) = user {
            msg = msg.with_user_id(user);
        }
        let a = router.route(&msg, None);
        let b = router.route(&msg, None);
        prop_assert_eq!(a.primary, b.primary);
        prop_assert_eq!(a.seed, b.seed);
        prop_assert_eq!(a.classification.intent, b.classification.intent);
    }
}
