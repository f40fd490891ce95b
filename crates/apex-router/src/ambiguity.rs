// SPDX-FileCopyrightText: 2026 Apex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Referential/semantic ambiguity scoring.
//!
//! Scores how underspecified a message is absent conversation context.
//! Pure function of the message text and history; no I/O, no state.

use apex_core::{AmbiguityLevel, AmbiguityReport, HistoryTurn};

use crate::lexicon::{tokenize, Lexicon};

/// Weight added per ambiguous-term lexicon hit.
const AMBIGUOUS_TERM_WEIGHT: f32 = 0.3;
/// Weight added when a message is at most two tokens with no history.
const SHORT_NO_HISTORY_WEIGHT: f32 = 0.3;
/// Weight added when an unresolved pronoun appears with no history.
const PRONOUN_NO_HISTORY_WEIGHT: f32 = 0.5;
/// Weight added for a vague question form.
const VAGUE_QUESTION_WEIGHT: f32 = 0.2;
/// Weight added for a bare single token that is not a social nicety.
const BARE_TOKEN_WEIGHT: f32 = 0.3;
/// Discount applied when a pronoun appears but history likely resolves it.
const PRONOUN_WITH_HISTORY_DISCOUNT: f32 = 0.2;

/// Score thresholds for the final level.
const HIGH_THRESHOLD: f32 = 0.7;
const MEDIUM_THRESHOLD: f32 = 0.4;
const LOW_THRESHOLD: f32 = 0.2;

/// Scores messages for referential and semantic ambiguity.
#[derive(Debug, Clone, Copy)]
pub struct AmbiguityAnalyzer {
    lexicon: Lexicon,
}

impl AmbiguityAnalyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Analyze a message given optional conversation history.
    pub fn analyze(&self, text: &str, history: &[HistoryTurn]) -> AmbiguityReport {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return AmbiguityReport::none();
        }

        let lower = trimmed.to_lowercase();
        let tokens = tokenize(trimmed);
        let has_history = !history.is_empty();

        // Social niceties are fully specified; skip scoring entirely.
        let bare = lower.trim_end_matches(['!', '?', '.', ' ']);
        if self.lexicon.is_social_token(bare) {
            return AmbiguityReport::none();
        }

        let mut score = 0.0f32;
        let mut reasons = Vec::new();
        let mut meanings = Vec::new();

        for entry in self.lexicon.ambiguous_terms {
            if tokens.iter().any(|t| t == entry.term) {
                score += AMBIGUOUS_TERM_WEIGHT;
                reasons.push(format!("contains ambiguous term `{}`", entry.term));
                meanings.extend(entry.meanings.iter().map(ToString::to_string));
            }
        }

        if tokens.len() <= 2 && !has_history {
            score += SHORT_NO_HISTORY_WEIGHT;
            reasons.push("very short message with no conversation history".to_string());
        }

        let has_pronoun = tokens
            .iter()
            .any(|t| self.lexicon.pronouns.contains(&t.as_str()));
        if has_pronoun {
            if has_history {
                // Context likely resolves the reference.
                score -= PRONOUN_WITH_HISTORY_DISCOUNT;
            } else {
                score += PRONOUN_NO_HISTORY_WEIGHT;
                reasons.push("unresolved reference with no prior context".to_string());
            }
        }

        if self.is_vague_question(&tokens) {
            score += VAGUE_QUESTION_WEIGHT;
            reasons.push("vague question form".to_string());
        }

        if tokens.len() == 1 {
            score += BARE_TOKEN_WEIGHT;
            reasons.push("single word with no context".to_string());
        }

        let level = if score >= HIGH_THRESHOLD {
            AmbiguityLevel::High
        } else if score >= MEDIUM_THRESHOLD {
            AmbiguityLevel::Medium
        } else if score >= LOW_THRESHOLD {
            AmbiguityLevel::Low
        } else {
            AmbiguityLevel::None
        };

        AmbiguityReport::new(level, reasons, meanings)
    }

    /// A short question anchored only by a question marker ("how?", "what
    /// now", "uska price kya hai") with nothing concrete to scope it.
    fn is_vague_question(&self, tokens: &[String]) -> bool {
        if tokens.is_empty() || tokens.len() > 5 {
            return false;
        }
        tokens
            .iter()
            .any(|t| self.lexicon.question_words.contains(&t.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apex_core::Role;

    fn analyzer() -> AmbiguityAnalyzer {
        AmbiguityAnalyzer::new(Lexicon::builtin())
    }

    fn history() -> Vec<HistoryTurn> {
        vec![
            HistoryTurn::new(Role::User, "tell me about the iphone 16"),
            HistoryTurn::new(Role::Assistant, "the iphone 16 launched with..."),
        ]
    }

    #[test]
    fn greeting_is_not_ambiguous() {
        let report = analyzer().analyze("hi", &[]);
        assert_eq!(report.level, AmbiguityLevel::None);
        assert!(report.reasons.is_empty());
    }

    #[test]
    fn unresolved_pronoun_question_is_high() {
        // Deictic "uska" with no history, in a short question form.
        let report = analyzer().analyze("uska price kya hai", &[]);
        assert_eq!(report.level, AmbiguityLevel::High);
        assert!(report
            .reasons
            .iter()
            .any(|r| r.contains("unresolved reference")));
    }

    #[test]
    fn history_resolves_pronoun() {
        let without = analyzer().analyze("what is its price", &[]);
        let with = analyzer().analyze("what is its price", &history());
        assert!(matches!(
            without.level,
            AmbiguityLevel::Medium | AmbiguityLevel::High
        ));
        // Same message with context drops at least one level.
        assert!(with.level < without.level || with.level == AmbiguityLevel::None);
    }

    #[test]
    fn bare_ambiguous_word_is_high_with_meanings() {
        let report = analyzer().analyze("python", &[]);
        assert_eq!(report.level, AmbiguityLevel::High);
        assert!(report
            .possible_meanings
            .iter()
            .any(|m| m.contains("programming language")));
    }

    #[test]
    fn specific_long_message_is_none() {
        let report = analyzer().analyze(
            "compare aws and gcp managed postgres offerings on pricing and replication",
            &[],
        );
        assert_eq!(report.level, AmbiguityLevel::None);
    }

    #[test]
    fn reasons_capped_at_three() {
        // Stacks lexicon hit + short + pronoun-free vague question signals.
        let report = analyzer().analyze("that spring bank", &[]);
        assert!(report.reasons.len() <= 3);
        assert!(report.possible_meanings.len() <= 4);
    }

    #[test]
    fn empty_text_is_none() {
        assert_eq!(analyzer().analyze("   ", &[]).level, AmbiguityLevel::None);
    }
}
