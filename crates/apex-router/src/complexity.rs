// SPDX-FileCopyrightText: 2026 Apex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message depth classification.
//!
//! Classifies how much answer depth a message requires using zero-cost
//! heuristic signals. No LLM pre-call, no network, no latency.

use apex_config::model::ClassifierConfig;
use apex_core::{ComplexityLevel, ComplexityReport};

use crate::lexicon::{term_matches, tokenize, Lexicon};

/// Score at or above which a message is Complex.
const COMPLEX_SCORE: f32 = 2.0;
/// Score at or above which a message is Moderate.
const MODERATE_SCORE: f32 = 1.0;

/// Per-signal score contributions.
const PHRASING_WEIGHT: f32 = 1.0;
const DOMAIN_KEYWORD_WEIGHT: f32 = 0.5;
const MULTI_QUESTION_WEIGHT: f32 = 1.0;
const CODE_BLOCK_WEIGHT: f32 = 1.0;

/// Classifies a message's depth requirement.
#[derive(Debug, Clone)]
pub struct ComplexityAnalyzer {
    lexicon: Lexicon,
    /// Word count above which a message is moderate-length.
    moderate_min_words: usize,
    /// Word count above which a message is forced Complex.
    long_min_words: usize,
}

impl ComplexityAnalyzer {
    pub fn new(lexicon: Lexicon, config: &ClassifierConfig) -> Self {
        Self {
            lexicon,
            moderate_min_words: config.moderate_min_words,
            long_min_words: config.long_message_min_words,
        }
    }

    /// Classify a message's depth requirement.
    pub fn analyze(&self, text: &str) -> ComplexityReport {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return ComplexityReport::new(
                ComplexityLevel::Simple,
                vec!["empty message".to_string()],
            );
        }

        let lower = trimmed.to_lowercase();
        let tokens = tokenize(trimmed);
        let word_count = tokens.len();

        // Short-circuit: trivially simple phrasings need no scoring.
        if self.is_trivially_simple(&lower, &tokens) {
            return ComplexityReport::new(
                ComplexityLevel::Simple,
                vec!["trivially simple phrasing".to_string()],
            );
        }

        let mut score = 0.0f32;
        let mut factors = Vec::new();

        for phrasing in self.lexicon.complex_phrasings {
            if term_matches(phrasing, &lower, &tokens) {
                score += PHRASING_WEIGHT;
                if factors.is_empty() {
                    factors.push("comparison or multi-step phrasing".to_string());
                }
            }
        }

        let domain_hits = self
            .lexicon
            .domain_keywords
            .iter()
            .filter(|k| term_matches(k, &lower, &tokens))
            .count();
        if domain_hits > 0 {
            score += domain_hits as f32 * DOMAIN_KEYWORD_WEIGHT;
            factors.push("domain-specific vocabulary".to_string());
        }

        if trimmed.matches('?').count() > 1 {
            score += MULTI_QUESTION_WEIGHT;
            factors.push("multiple questions".to_string());
        }

        if trimmed.contains("```") {
            score += CODE_BLOCK_WEIGHT;
            factors.push("contains a code block".to_string());
        }

        // Word count contributes qualitative factors; only the long
        // threshold changes the outcome directly.
        let long = word_count > self.long_min_words;
        if long {
            factors.push("long message".to_string());
        } else if word_count > self.moderate_min_words {
            factors.push("moderate length".to_string());
        }

        let level = if score >= COMPLEX_SCORE || long {
            ComplexityLevel::Complex
        } else if score >= MODERATE_SCORE || word_count > self.moderate_min_words {
            ComplexityLevel::Moderate
        } else {
            ComplexityLevel::Simple
        };

        ComplexityReport::new(level, factors)
    }

    /// Greetings, acknowledgements, farewells, and the bare "what is X?" form.
    fn is_trivially_simple(&self, lower: &str, tokens: &[String]) -> bool {
        let bare = lower.trim_end_matches(['!', '?', '.', ' ']);
        if self.lexicon.is_social_token(bare) {
            return true;
        }
        if tokens.len() <= 2 && tokens.iter().all(|t| self.lexicon.is_social_token(t)) {
            return true;
        }
        // Bare definitional question: "what is X" / "what's X".
        (lower.starts_with("what is ") || lower.starts_with("what's ")) && tokens.len() <= 4
    }
}
