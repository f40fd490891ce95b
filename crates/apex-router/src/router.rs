// SPDX-FileCopyrightText: 2026 Apex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The routing pipeline: classify, honor session locks, select a backend
//! deterministically, and expand strategic or creative work into chains.

use std::time::Instant;

use apex_config::validation::validate_config;
use apex_config::ApexConfig;
use apex_core::{
    AmbiguityReport, ApexError, ChainStep, ClassificationResult, ComplexityLevel,
    ComplexityReport, InboundMessage, Intent, ResponseHints, RoutingDecision, SessionContext,
    StepOutput, Tier,
};
use tracing::{debug, info, instrument};

use crate::ambiguity::AmbiguityAnalyzer;
use crate::availability::AvailabilityTable;
use crate::complexity::ComplexityAnalyzer;
use crate::intent::IntentClassifier;
use crate::lexicon::Lexicon;
use crate::nudge::NudgeDetector;
use crate::selector::DeterministicSelector;

/// Per-intent auxiliary instruction handed to the backend.
fn intent_instruction(intent: Intent) -> &'static str {
    match intent {
        Intent::Quick => "Answer directly and briefly. No preamble.",
        Intent::Analytical => "Reason through the problem step by step before answering.",
        Intent::Strategic => {
            "Act as a senior advisor. Weigh trade-offs explicitly and end with a recommendation."
        }
        Intent::Creative => "Prioritize originality and voice over convention.",
        Intent::Technical => "Be precise. Include code or concrete configuration where useful.",
        Intent::Learning => "Teach progressively. Check understanding with a short example.",
        Intent::Personal => "Respond with warmth and without judgment. Do not rush to advice.",
    }
}

/// Response style hint for an intent.
fn intent_style(intent: Intent) -> &'static str {
    match intent {
        Intent::Quick => "concise",
        Intent::Analytical => "structured",
        Intent::Strategic => "advisory",
        Intent::Creative => "expressive",
        Intent::Technical => "precise",
        Intent::Learning => "didactic",
        Intent::Personal => "warm",
    }
}

/// The classification and routing engine.
///
/// Construction is the only fallible step; `classify` and `route` are
/// pure and total given the message and session, so one router can serve
/// any number of threads behind a shared reference.
#[derive(Debug, Clone)]
pub struct ApexRouter {
    config: ApexConfig,
    ambiguity: AmbiguityAnalyzer,
    complexity: ComplexityAnalyzer,
    intent: IntentClassifier,
    nudge: NudgeDetector,
    table: AvailabilityTable,
    lexicon: Lexicon,
}

impl ApexRouter {
    /// Build an engine from a configuration.
    ///
    /// The configuration and the lexicon are validated here, once; after
    /// construction every operation is total.
    pub fn new(config: ApexConfig) -> Result<Self, ApexError> {
        if let Err(errors) = validate_config(&config) {
            let joined = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ApexError::Config(joined));
        }

        let lexicon = Lexicon::builtin();
        lexicon.check()?;

        let table = AvailabilityTable::from_config(&config);
        Ok(Self {
            ambiguity: AmbiguityAnalyzer::new(lexicon),
            complexity: ComplexityAnalyzer::new(lexicon, &config.classifier),
            intent: IntentClassifier::new(lexicon, config.classifier.clone()),
            nudge: NudgeDetector::new(lexicon),
            table,
            lexicon,
            config,
        })
    }

    /// Classify a message without routing it.
    #[instrument(skip_all, fields(chars = message.text.len()))]
    pub fn classify(&self, message: &InboundMessage) -> ClassificationResult {
        let started = Instant::now();
        let text = message.text.trim();

        if text.is_empty() {
            return ClassificationResult {
                intent: Intent::Quick,
                confidence: 90,
                ambiguity: AmbiguityReport::none(),
                complexity: ComplexityReport::new(ComplexityLevel::Simple, Vec::new()),
                nudge: None,
                needs_external_data: false,
                elapsed_us: started.elapsed().as_micros(),
            };
        }

        let (intent, confidence) = self.intent.classify(text);
        let ambiguity = self.ambiguity.analyze(text, &message.history);
        let complexity = self.complexity.analyze(text);
        let nudge = self.nudge.detect(text);
        let needs_external_data = self.needs_external_data(text);

        debug!(%intent, confidence, ?nudge, "classified");

        ClassificationResult {
            intent,
            confidence,
            ambiguity,
            complexity,
            nudge,
            needs_external_data,
            elapsed_us: started.elapsed().as_micros(),
        }
    }

    /// Route a message to a backend or chain.
    #[instrument(skip_all, fields(turn = session.map_or(1, |s| s.turn_number)))]
    pub fn route(
        &self,
        message: &InboundMessage,
        session: Option<&SessionContext>,
    ) -> RoutingDecision {
        let mut classification = self.classify(message);

        // An active session lock overrides the fresh classification for the
        // rest of the thread.
        let follow_up = session.is_some_and(|s| s.turn_number > 1 && s.intent_locked);
        if let Some(locked) = session.and_then(SessionContext::active_lock) {
            if locked != classification.intent {
                debug!(classified = %classification.intent, %locked, "session lock override");
            }
            classification.intent = locked;
        }

        let region = message
            .region
            .as_deref()
            .or_else(|| session.and_then(|s| s.region.as_deref()));
        let seed_user = message
            .user_id
            .as_deref()
            .or_else(|| session.and_then(|s| s.user_id.as_deref()));
        let seed = DeterministicSelector::seed(&message.text, seed_user);

        if classification.intent == Intent::Strategic
            && classification.complexity.level == ComplexityLevel::Complex
        {
            return self.strategic_chain(classification, region, follow_up, seed);
        }

        if classification.intent == Intent::Creative
            && seed < u64::from(self.config.routing.creative_chain_percent)
        {
            return self.creative_chain(classification, region, follow_up, seed);
        }

        let tier = classification.intent.tier();
        let backend = self.select(region, tier, seed);
        let intent = classification.intent;
        RoutingDecision::single(
            backend.clone(),
            self.table.display_name(&backend),
            classification,
            follow_up,
            seed,
            intent_instruction(intent),
            self.hints_for(intent.tier(), intent),
        )
    }

    /// Analysis, deep reasoning, then synthesis for complex strategic asks.
    fn strategic_chain(
        &self,
        classification: ClassificationResult,
        region: Option<&str>,
        follow_up: bool,
        seed: u64,
    ) -> RoutingDecision {
        info!(seed, "expanding strategic request into a three-step chain");
        let chain = vec![
            self.step(region, Tier::Deep, seed, "Initial analysis and structure", StepOutput::Analysis),
            self.step(region, Tier::Advisor, seed, "Deep reasoning and trade-offs", StepOutput::Analysis),
            self.step(region, Tier::Synthesis, seed, "Synthesis into actionable output", StepOutput::Synthesis),
        ];
        RoutingDecision::chained(
            chain,
            classification,
            follow_up,
            seed,
            intent_instruction(Intent::Strategic),
            self.hints_for(Tier::Synthesis, Intent::Strategic),
        )
    }

    /// Ideate then validate for the sampled slice of creative requests.
    fn creative_chain(
        &self,
        classification: ClassificationResult,
        region: Option<&str>,
        follow_up: bool,
        seed: u64,
    ) -> RoutingDecision {
        info!(seed, "expanding creative request into an ideate/validate chain");
        let chain = vec![
            self.step(region, Tier::Creative, seed, "Idea generation", StepOutput::Creative),
            self.step(region, Tier::Deep, seed, "Critique and refinement", StepOutput::Validation),
        ];
        RoutingDecision::chained(
            chain,
            classification,
            follow_up,
            seed,
            intent_instruction(Intent::Creative),
            self.hints_for(Tier::Creative, Intent::Creative),
        )
    }

    fn step(
        &self,
        region: Option<&str>,
        tier: Tier,
        seed: u64,
        purpose: &str,
        output: StepOutput,
    ) -> ChainStep {
        let backend = self.select(region, tier, seed);
        ChainStep {
            position: 0, // renumbered by the chain constructor
            display_name: self.table.display_name(&backend),
            backend,
            purpose: purpose.to_string(),
            output,
        }
    }

    /// Deterministic pick from the availability table. The table guarantees
    /// a non-empty candidate list, so the fallback arm is unreachable in
    /// practice but keeps the function total.
    fn select(&self, region: Option<&str>, tier: Tier, seed: u64) -> String {
        let candidates = self.table.lookup(region, tier);
        match DeterministicSelector::pick(candidates, seed) {
            Some(backend) => backend.to_string(),
            None => "gemini-2.0-flash".to_string(),
        }
    }

    fn hints_for(&self, tier: Tier, intent: Intent) -> ResponseHints {
        ResponseHints {
            max_tokens: self.config.routing.max_tokens_for(tier),
            style: intent_style(intent).to_string(),
        }
    }

    fn needs_external_data(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.lexicon
            .external_data_terms
            .iter()
            .any(|term| lower.contains(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apex_core::{AmbiguityLevel, HistoryTurn, NudgeType, Role};

    fn router() -> ApexRouter {
        ApexRouter::new(ApexConfig::default()).expect("default config is valid")
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let mut config = ApexConfig::default();
        config.routing.creative_chain_percent = 150;
        let err = ApexRouter::new(config).expect_err("percent above 100 must fail");
        match err {
            ApexError::Config(message) => assert!(message.contains("creative_chain_percent")),
            other => panic!("expected a config error, got {other}"),
        }
    }

    #[test]
    fn greeting_routes_fast_single() {
        let decision = router().route(&InboundMessage::new("hi"), None);
        assert_eq!(decision.classification.intent, Intent::Quick);
        assert_eq!(decision.classification.confidence, 90);
        assert_eq!(decision.classification.ambiguity.level, AmbiguityLevel::None);
        assert!(!decision.multi_model);
        assert!(decision.chain.is_empty());
        assert_eq!(decision.hints.style, "concise");
    }

    #[test]
    fn empty_message_is_quick_and_cheap() {
        let result = router().classify(&InboundMessage::new("   "));
        assert_eq!(result.intent, Intent::Quick);
        assert_eq!(result.confidence, 90);
        assert!(!result.needs_external_data);
    }

    #[test]
    fn strategic_complex_builds_three_step_chain() {
        let decision = router().route(
            &InboundMessage::new(
                "Compare AWS vs GCP vs Azure for our startup, considering cost and the trade-off \
                 between managed services and portability",
            ),
            None,
        );
        assert_eq!(decision.classification.intent, Intent::Strategic);
        assert_eq!(decision.classification.complexity.level, ComplexityLevel::Complex);
        assert!(decision.multi_model);
        let positions: Vec<u32> = decision.chain.iter().map(|s| s.position).collect();
        assert_eq!(positions, [1, 2, 3]);
        assert_eq!(decision.chain[2].output, StepOutput::Synthesis);
        assert_eq!(decision.primary, decision.chain[0].backend);
    }

    #[test]
    fn session_lock_overrides_classification() {
        let router = router();
        let mut session = SessionContext::new();
        session.turn_number = 3;
        session.locked_intent = Some(Intent::Personal);
        session.intent_locked = true;

        let decision = router.route(&InboundMessage::new("what about the api design"), Some(&session));
        assert_eq!(decision.classification.intent, Intent::Personal);
        assert!(decision.follow_up);
        assert_eq!(decision.hints.style, "warm");
    }

    #[test]
    #[tracing_test::traced_test]
    fn lock_override_is_logged() {
        let router = router();
        let mut session = SessionContext::new();
        session.turn_number = 2;
        session.locked_intent = Some(Intent::Creative);
        session.intent_locked = true;

        router.route(&InboundMessage::new("analyze the latency breakdown please"), Some(&session));
        assert!(logs_contain("session lock override"));
    }

    #[test]
    fn inactive_lock_is_ignored() {
        let router = router();
        let mut session = SessionContext::new();
        session.turn_number = 2;
        session.locked_intent = Some(Intent::Personal);
        session.intent_locked = false;

        let decision = router.route(&InboundMessage::new("debug this stack trace for me"), Some(&session));
        assert_eq!(decision.classification.intent, Intent::Technical);
        assert!(!decision.follow_up);
    }

    #[test]
    fn routing_is_deterministic() {
        let router = router();
        let msg = InboundMessage::new("analyze our churn statistics").with_user_id("u-42");
        let a = router.route(&msg, None);
        let b = router.route(&msg, None);
        assert_eq!(a.primary, b.primary);
        assert_eq!(a.seed, b.seed);
    }

    #[test]
    fn message_region_beats_session_region() {
        let mut config = ApexConfig::default();
        let mut eu = apex_config::TierTable::empty();
        eu.technical = vec!["mistral-large".to_string()];
        config.regions.overrides.insert("EU".to_string(), eu);
        let router = ApexRouter::new(config).expect("config is valid");

        let mut session = SessionContext::new();
        session.region = Some("US".to_string());

        let msg = InboundMessage::new("please refactor this function so the database pool is not shared")
            .with_region("EU");
        let decision = router.route(&msg, Some(&session));
        assert_eq!(decision.primary, "mistral-large");
    }

    #[test]
    fn external_data_flagged() {
        let result = router().classify(&InboundMessage::new("what is the weather today"));
        assert!(result.needs_external_data);
    }

    #[test]
    fn nudge_carried_into_decision() {
        let decision = router().route(
            &InboundMessage::new("should I use docker or kubernetes for deploy"),
            None,
        );
        assert_eq!(decision.classification.nudge, Some(NudgeType::Decide));
    }

    #[test]
    fn history_reaches_ambiguity_analyzer() {
        let router = router();
        let bare = router.classify(&InboundMessage::new("what about its pricing"));
        let with_history = router.classify(
            &InboundMessage::new("what about its pricing").with_history(vec![HistoryTurn::new(
                Role::User,
                "tell me about the acme database service",
            )]),
        );
        assert!(with_history.ambiguity.level < bare.ambiguity.level);
    }

    #[test]
    fn personal_routes_to_personal_tier_defaults() {
        let decision = router().route(
            &InboundMessage::new("I feel completely overwhelmed and burned out lately"),
            None,
        );
        assert_eq!(decision.classification.intent, Intent::Personal);
        assert_eq!(decision.primary, "claude-sonnet-4");
        assert_eq!(decision.hints.max_tokens, 1024);
    }
}
