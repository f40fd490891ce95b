// SPDX-FileCopyrightText: 2026 Apex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common value types shared across the Apex routing engine.
//!
//! Everything here is an immutable value: the engine consumes
//! [`InboundMessage`] and [`SessionContext`] by reference and emits
//! [`ClassificationResult`] and [`RoutingDecision`] by value. No type in
//! this module carries interior mutability.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Maximum number of human-readable reasons carried by an ambiguity report.
pub const MAX_AMBIGUITY_REASONS: usize = 3;

/// Maximum number of candidate alternate meanings carried by an ambiguity report.
pub const MAX_POSSIBLE_MEANINGS: usize = 4;

/// Maximum number of contributing factors carried by a complexity report.
pub const MAX_COMPLEXITY_FACTORS: usize = 3;

/// Closed set of intent labels assigned to a user message.
///
/// This is the canonical seven-label set. Deployments needing the
/// historical five-label behavior collapse labels at the output edge via
/// [`Intent::collapse_to_five`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Intent {
    /// Short factual or conversational requests; cheapest to serve.
    Quick,
    /// Requests needing structured reasoning or explanation depth.
    Analytical,
    /// Business/decision advisory requests (plans, trade-offs, direction).
    Strategic,
    /// Generative writing and ideation requests.
    Creative,
    /// Engineering, code, and systems requests.
    Technical,
    /// Teaching and study requests.
    Learning,
    /// Emotionally loaded personal messages; must never be misrouted.
    Personal,
}

impl Intent {
    /// All seven labels in classifier priority order.
    pub const ALL: [Intent; 7] = [
        Intent::Personal,
        Intent::Technical,
        Intent::Strategic,
        Intent::Creative,
        Intent::Learning,
        Intent::Analytical,
        Intent::Quick,
    ];

    /// Collapse to the historical five-label set.
    ///
    /// `Strategic` folds into `Analytical` and `Technical` into `Creative`;
    /// the remaining labels are unchanged.
    #[must_use]
    pub fn collapse_to_five(self) -> Self {
        match self {
            Intent::Strategic => Intent::Analytical,
            Intent::Technical => Intent::Creative,
            other => other,
        }
    }

    /// The backend tier this intent routes to for single-step decisions.
    #[must_use]
    pub fn tier(self) -> Tier {
        match self {
            Intent::Quick => Tier::Fast,
            Intent::Analytical => Tier::Deep,
            Intent::Strategic => Tier::Advisor,
            Intent::Creative => Tier::Creative,
            Intent::Technical => Tier::Technical,
            Intent::Learning => Tier::Learning,
            Intent::Personal => Tier::Personal,
        }
    }
}

/// Functional grouping of interchangeable backends.
///
/// A tier maps to an ordered list of backend identifiers in the
/// availability table; one is selected per request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Cheap low-latency backends; the global fallback tier.
    Fast,
    /// Deep-reasoning backends.
    Deep,
    /// Advisor-grade backend for strategic requests (fixed per region).
    Advisor,
    /// Creative-writing backends.
    Creative,
    /// Code/engineering backends.
    Technical,
    /// Teaching-oriented backends.
    Learning,
    /// Empathetic-conversation backends.
    Personal,
    /// Cross-domain synthesis backends used for final chain steps.
    Synthesis,
}

/// How underspecified a message's meaning is absent conversation context.
///
/// Ordered: `None < Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
pub enum AmbiguityLevel {
    None,
    Low,
    Medium,
    High,
}

/// How much answer depth a message requires.
///
/// Ordered: `Simple < Moderate < Complex`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
pub enum ComplexityLevel {
    Simple,
    Moderate,
    Complex,
}

/// UI hint surfaced when a message matches a nudge pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum NudgeType {
    /// "Want a simpler explanation?"
    Simplify,
    /// "Want help deciding?"
    Decide,
    /// "Want concrete next steps?"
    Action,
}

/// Output role of a step in a multi-model chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StepOutput {
    Analysis,
    Synthesis,
    Creative,
    Validation,
}

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One prior turn of conversation history, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: Role,
    pub text: String,
    /// When the turn occurred, if the conversation layer tracks it.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl HistoryTurn {
    /// Convenience constructor for an untimestamped turn.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: None,
        }
    }
}

/// An inbound user message with optional context.
///
/// Immutable value; the engine never mutates it. History is an ordered
/// sequence of prior turns supplied by the conversation layer — the
/// engine does not persist anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Raw message text.
    pub text: String,
    /// Ordered prior turns, oldest first. Empty when unavailable.
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
    /// Stable user identifier; makes deterministic routing user-sticky.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Geographic region code (e.g., "US", "IN").
    #[serde(default)]
    pub region: Option<String>,
}

impl InboundMessage {
    /// Create a message with no history, user, or region.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            history: Vec::new(),
            user_id: None,
            region: None,
        }
    }

    /// Attach conversation history.
    #[must_use]
    pub fn with_history(mut self, history: Vec<HistoryTurn>) -> Self {
        self.history = history;
        self
    }

    /// Attach a user identifier.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Attach a region code.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// Per-conversation state owned by the caller.
///
/// Created fresh per conversation, carried forward turn-to-turn by the
/// conversation layer, and passed by reference on every call. The engine
/// reads it and never writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    /// 1-based turn number within the conversation.
    pub turn_number: u32,
    /// Intent locked by a prior turn, if any.
    pub locked_intent: Option<Intent>,
    /// Whether the locked intent should override fresh classification.
    pub intent_locked: bool,
    /// Region code for this conversation.
    pub region: Option<String>,
    /// Stable user identifier.
    pub user_id: Option<String>,
}

impl SessionContext {
    /// A fresh first-turn session with no lock.
    pub fn new() -> Self {
        Self {
            turn_number: 1,
            locked_intent: None,
            intent_locked: false,
            region: None,
            user_id: None,
        }
    }

    /// The intent that overrides classification, when the lock is active.
    #[must_use]
    pub fn active_lock(&self) -> Option<Intent> {
        if self.intent_locked {
            self.locked_intent
        } else {
            None
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of scoring a message for referential/semantic ambiguity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbiguityReport {
    /// Overall ambiguity level.
    pub level: AmbiguityLevel,
    /// Up to [`MAX_AMBIGUITY_REASONS`] human-readable reasons, in discovery order.
    pub reasons: Vec<String>,
    /// Up to [`MAX_POSSIBLE_MEANINGS`] candidate alternate meanings.
    pub possible_meanings: Vec<String>,
}

impl AmbiguityReport {
    /// Build a report, deduplicating and capping the reason and candidate lists.
    pub fn new(level: AmbiguityLevel, reasons: Vec<String>, possible_meanings: Vec<String>) -> Self {
        Self {
            level,
            reasons: dedup_capped(reasons, MAX_AMBIGUITY_REASONS),
            possible_meanings: dedup_capped(possible_meanings, MAX_POSSIBLE_MEANINGS),
        }
    }

    /// A report with no detected ambiguity.
    pub fn none() -> Self {
        Self {
            level: AmbiguityLevel::None,
            reasons: Vec::new(),
            possible_meanings: Vec::new(),
        }
    }
}

/// Result of classifying a message's depth requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityReport {
    /// Overall complexity level.
    pub level: ComplexityLevel,
    /// Up to [`MAX_COMPLEXITY_FACTORS`] contributing factors, in discovery order.
    pub factors: Vec<String>,
}

impl ComplexityReport {
    /// Build a report, deduplicating and capping the factor list.
    pub fn new(level: ComplexityLevel, factors: Vec<String>) -> Self {
        Self {
            level,
            factors: dedup_capped(factors, MAX_COMPLEXITY_FACTORS),
        }
    }
}

/// Full classification output for one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Primary intent label.
    pub intent: Intent,
    /// Confidence in the intent label, always within 0..=100.
    pub confidence: u8,
    /// Ambiguity descriptor.
    pub ambiguity: AmbiguityReport,
    /// Complexity descriptor.
    pub complexity: ComplexityReport,
    /// UI nudge hint, if a nudge pattern matched.
    pub nudge: Option<NudgeType>,
    /// Whether the request likely needs external data or tools to answer.
    pub needs_external_data: bool,
    /// Wall-clock time spent classifying, in microseconds. Observational only.
    pub elapsed_us: u128,
}

/// One step of an ordered multi-model chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainStep {
    /// 1-based position; contiguous within a chain.
    pub position: u32,
    /// Backend identifier to invoke.
    pub backend: String,
    /// Human display name for the backend.
    pub display_name: String,
    /// Natural-language purpose of the step.
    pub purpose: String,
    /// Output role of the step.
    pub output: StepOutput,
}

/// Response-shape hints attached to a routing decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseHints {
    /// Suggested response token budget.
    pub max_tokens: u32,
    /// Suggested response style (e.g., "concise", "structured").
    pub style: String,
}

/// Final routing output consumed by the model-invocation layer.
///
/// Either a single backend assignment (`multi_model == false`, empty
/// `chain`) or an ordered chain (`multi_model == true`, `chain.len() >= 2`
/// with contiguous 1-based positions). The constructors enforce this
/// invariant; the fields are public for consumption, not construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Primary backend identifier (first chain step when multi-model).
    pub primary: String,
    /// Human display name for the primary backend.
    pub display_name: String,
    /// The classification behind this decision.
    pub classification: ClassificationResult,
    /// Whether this decision is an ordered multi-model chain.
    pub multi_model: bool,
    /// Ordered chain steps; non-empty iff `multi_model`.
    pub chain: Vec<ChainStep>,
    /// Whether this turn continues a locked conversation thread.
    pub follow_up: bool,
    /// Raw deterministic routing seed, for observability.
    pub seed: u64,
    /// Per-intent auxiliary instruction text for the backend.
    pub instruction: String,
    /// Response-shape hints.
    pub hints: ResponseHints,
}

impl RoutingDecision {
    /// Build a single-backend decision.
    #[allow(clippy::too_many_arguments)] // plain value assembly
    pub fn single(
        primary: impl Into<String>,
        display_name: impl Into<String>,
        classification: ClassificationResult,
        follow_up: bool,
        seed: u64,
        instruction: impl Into<String>,
        hints: ResponseHints,
    ) -> Self {
        Self {
            primary: primary.into(),
            display_name: display_name.into(),
            classification,
            multi_model: false,
            chain: Vec::new(),
            follow_up,
            seed,
            instruction: instruction.into(),
            hints,
        }
    }

    /// Build a multi-model decision from an ordered chain.
    ///
    /// Positions are renumbered 1..=N so the contiguity invariant holds by
    /// construction. The primary backend is the first step's. Chains of
    /// fewer than two steps are not chains; callers must pass at least two.
    pub fn chained(
        mut chain: Vec<ChainStep>,
        classification: ClassificationResult,
        follow_up: bool,
        seed: u64,
        instruction: impl Into<String>,
        hints: ResponseHints,
    ) -> Self {
        debug_assert!(chain.len() >= 2, "a chain needs at least two steps");
        for (idx, step) in chain.iter_mut().enumerate() {
            step.position = idx as u32 + 1;
        }
        let primary = chain[0].backend.clone();
        let display_name = chain[0].display_name.clone();
        Self {
            primary,
            display_name,
            classification,
            multi_model: true,
            chain,
            follow_up,
            seed,
            instruction: instruction.into(),
            hints,
        }
    }
}

/// Deduplicate (preserving first-seen order) and truncate a string list.
fn dedup_capped(items: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = Vec::with_capacity(items.len().min(cap));
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
            if seen.len() == cap {
                break;
            }
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguity_report_dedups_and_caps() {
        let reasons = vec![
            "short".to_string(),
            "short".to_string(),
            "vague".to_string(),
            "pronoun".to_string(),
            "extra".to_string(),
        ];
        let meanings = (0..6).map(|i| format!("m{i}")).collect();
        let report = AmbiguityReport::new(AmbiguityLevel::High, reasons, meanings);
        assert_eq!(report.reasons, vec!["short", "vague", "pronoun"]);
        assert_eq!(report.possible_meanings.len(), MAX_POSSIBLE_MEANINGS);
    }

    #[test]
    fn chained_decision_renumbers_positions() {
        let classification = quick_classification();
        let steps = vec![step("a", 9), step("b", 0), step("c", 42)];
        let decision = RoutingDecision::chained(
            steps,
            classification,
            false,
            7,
            "instr",
            ResponseHints {
                max_tokens: 1024,
                style: "structured".into(),
            },
        );
        assert!(decision.multi_model);
        assert_eq!(decision.primary, "a");
        let positions: Vec<u32> = decision.chain.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn single_decision_has_empty_chain() {
        let decision = RoutingDecision::single(
            "fast-1",
            "Fast One",
            quick_classification(),
            false,
            0,
            "instr",
            ResponseHints {
                max_tokens: 512,
                style: "concise".into(),
            },
        );
        assert!(!decision.multi_model);
        assert!(decision.chain.is_empty());
    }

    #[test]
    fn intent_collapse_to_five() {
        assert_eq!(Intent::Strategic.collapse_to_five(), Intent::Analytical);
        assert_eq!(Intent::Technical.collapse_to_five(), Intent::Creative);
        assert_eq!(Intent::Personal.collapse_to_five(), Intent::Personal);
        assert_eq!(Intent::Quick.collapse_to_five(), Intent::Quick);
    }

    #[test]
    fn intent_round_trips_through_strings() {
        use std::str::FromStr;
        for intent in Intent::ALL {
            let s = intent.to_string();
            assert_eq!(Intent::from_str(&s).expect("should parse back"), intent);
        }
    }

    fn quick_classification() -> ClassificationResult {
        ClassificationResult {
            intent: Intent::Quick,
            confidence: 90,
            ambiguity: AmbiguityReport::none(),
            complexity: ComplexityReport::new(ComplexityLevel::Simple, vec![]),
            nudge: None,
            needs_external_data: false,
            elapsed_us: 0,
        }
    }

    fn step(backend: &str, position: u32) -> ChainStep {
        ChainStep {
            position,
            backend: backend.to_string(),
            display_name: backend.to_uppercase(),
            purpose: "test".to_string(),
            output: StepOutput::Analysis,
        }
    }
}
