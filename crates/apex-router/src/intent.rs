// SPDX-FileCopyrightText: 2026 Apex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classification with an explicit priority rule table.
//!
//! Categories are resolved by evaluating an ordered list of rules, each
//! naming its minimum score and any dominance margin it must hold over a
//! collision-prone rival. The tie-break policy is a visible table rather
//! than control flow, so each rule can be unit-tested on its own.

use apex_config::model::ClassifierConfig;
use apex_core::Intent;
use tracing::debug;

use crate::lexicon::{term_matches, tokenize, Lexicon};

/// Confidence for the short-message fast path.
const FAST_PATH_CONFIDENCE: u8 = 90;
/// Confidence when no category clears its threshold.
const FALLBACK_CONFIDENCE: u8 = 60;
/// Scale applied to the winning score when deriving confidence.
const CONFIDENCE_SCALE: f32 = 4.0;

/// One entry of the priority resolution table.
#[derive(Debug, Clone, Copy)]
struct IntentRule {
    intent: Intent,
    /// Absolute minimum score to be eligible.
    min_score: f32,
    /// Rival category this rule must beat by the dominance margin, if any.
    margin_over: Option<Intent>,
    /// Base confidence when this rule wins.
    confidence_base: u8,
    /// Confidence cap for this category.
    confidence_cap: u8,
}

/// Priority order: Personal first (must never be misrouted), then the
/// specialist categories, then the generalists. Strategic and Creative
/// historically oscillate on near-ties, so each must dominate the other
/// by a margin to win.
const RULES: [IntentRule; 6] = [
    IntentRule {
        intent: Intent::Personal,
        min_score: 3.0,
        margin_over: None,
        confidence_base: 70,
        confidence_cap: 95,
    },
    IntentRule {
        intent: Intent::Technical,
        min_score: 2.0,
        margin_over: None,
        confidence_base: 65,
        confidence_cap: 92,
    },
    IntentRule {
        intent: Intent::Strategic,
        min_score: 2.0,
        margin_over: Some(Intent::Creative),
        confidence_base: 65,
        confidence_cap: 92,
    },
    IntentRule {
        intent: Intent::Creative,
        min_score: 2.0,
        margin_over: Some(Intent::Strategic),
        confidence_base: 62,
        confidence_cap: 90,
    },
    IntentRule {
        intent: Intent::Learning,
        min_score: 1.5,
        margin_over: None,
        confidence_base: 60,
        confidence_cap: 88,
    },
    IntentRule {
        intent: Intent::Analytical,
        min_score: 1.5,
        margin_over: None,
        confidence_base: 60,
        confidence_cap: 88,
    },
];

/// Assigns one intent label with a confidence score.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    lexicon: Lexicon,
    config: ClassifierConfig,
}

impl IntentClassifier {
    pub fn new(lexicon: Lexicon, config: ClassifierConfig) -> Self {
        Self { lexicon, config }
    }

    /// Classify a message, returning the label and a 0..=100 confidence.
    ///
    /// Never fails: when no category clears its threshold the result
    /// degrades to Quick, the cheapest category.
    pub fn classify(&self, text: &str) -> (Intent, u8) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return (Intent::Quick, FAST_PATH_CONFIDENCE);
        }

        let lower = trimmed.to_lowercase();
        let tokens = tokenize(trimmed);

        // Fast path: short messages without a depth request skip scoring.
        if tokens.len() <= self.config.short_message_max_words
            && !self
                .lexicon
                .depth_keywords
                .iter()
                .any(|k| term_matches(k, &lower, &tokens))
        {
            return self.emit(Intent::Quick, FAST_PATH_CONFIDENCE);
        }

        let scores = self.score_categories(&lower, &tokens);
        let max_score = scores.iter().copied().fold(0.0f32, f32::max);

        for rule in &RULES {
            let score = scores[category_index(rule.intent)];
            if score < rule.min_score || score < max_score {
                continue;
            }
            if let Some(rival) = rule.margin_over {
                let rival_score = scores[category_index(rival)];
                if score - rival_score < self.config.dominance_margin {
                    debug!(
                        category = %rule.intent,
                        rival = %rival,
                        score,
                        rival_score,
                        "dominance margin not met, continuing down the rule table"
                    );
                    continue;
                }
            }
            let confidence =
                derive_confidence(score, rule.confidence_base, rule.confidence_cap);
            return self.emit(rule.intent, confidence);
        }

        // Terminal fallback: classification degrades, never errors.
        self.emit(Intent::Quick, FALLBACK_CONFIDENCE)
    }

    /// Sum keyword weights per category, plus the Analytical length bonus.
    fn score_categories(&self, lower: &str, tokens: &[String]) -> [f32; 7] {
        let mut scores = [0.0f32; 7];
        for intent in Intent::ALL {
            let idx = category_index(intent);
            for entry in Lexicon::category_terms(intent) {
                if term_matches(entry.term, lower, tokens) {
                    scores[idx] += entry.weight;
                }
            }
        }
        if tokens.len() > self.config.long_message_min_words {
            scores[category_index(Intent::Analytical)] += self.config.analytical_length_bonus;
        }
        scores
    }

    /// Apply the optional five-label collapse at the output edge.
    fn emit(&self, intent: Intent, confidence: u8) -> (Intent, u8) {
        let label = if self.config.five_category_mode {
            intent.collapse_to_five()
        } else {
            intent
        };
        (label, confidence.min(100))
    }
}

/// Stable index of a category in the score array.
fn category_index(intent: Intent) -> usize {
    match intent {
        Intent::Personal => 0,
        Intent::Technical => 1,
        Intent::Strategic => 2,
        Intent::Creative => 3,
        Intent::Learning => 4,
        Intent::Analytical => 5,
        Intent::Quick => 6,
    }
}

/// Base plus scaled score, clamped to the category cap (and 100).
fn derive_confidence(score: f32, base: u8, cap: u8) -> u8 {
    let scaled = f32::from(base) + score * CONFIDENCE_SCALE;
    let capped = scaled.min(f32::from(cap)).min(100.0);
    capped as u8
}
