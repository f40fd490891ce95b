// SPDX-FileCopyrightText: 2026 Apex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Versioned keyword lexicon backing every analyzer in the engine.
//!
//! All keyword knowledge lives here as plain data: category keyword
//! weights, ambiguous terms with their candidate meanings, complexity
//! signal phrases, nudge patterns, and the small utility sets (greetings,
//! depth requests, external-data markers). Analyzers consult the lexicon
//! and contribute only arithmetic, which keeps the keyword tables
//! diffable and testable on their own.

use apex_core::{ApexError, Intent};

/// Lexicon data version. Bump when table contents change materially.
pub const LEXICON_VERSION: &str = "2026.02";

/// A keyword (or phrase) contributing a fixed weight to one category.
#[derive(Debug, Clone, Copy)]
pub struct WeightedTerm {
    pub term: &'static str,
    pub weight: f32,
}

/// A term whose meaning is underspecified without context, with the
/// candidate readings surfaced to the caller.
#[derive(Debug, Clone, Copy)]
pub struct AmbiguousTerm {
    pub term: &'static str,
    pub meanings: &'static [&'static str],
}

/// Personal keywords carry the highest weight: emotionally loaded
/// messages must never lose a near-tie to another category.
const PERSONAL_TERMS: &[WeightedTerm] = &[
    WeightedTerm { term: "i feel", weight: 3.0 },
    WeightedTerm { term: "feeling", weight: 3.0 },
    WeightedTerm { term: "stressed", weight: 3.0 },
    WeightedTerm { term: "anxious", weight: 3.0 },
    WeightedTerm { term: "overwhelmed", weight: 3.0 },
    WeightedTerm { term: "lonely", weight: 3.0 },
    WeightedTerm { term: "depressed", weight: 3.0 },
    WeightedTerm { term: "burnout", weight: 3.0 },
    WeightedTerm { term: "burned out", weight: 3.0 },
    WeightedTerm { term: "my relationship", weight: 3.0 },
    WeightedTerm { term: "breakup", weight: 3.0 },
    WeightedTerm { term: "heartbroken", weight: 3.0 },
    WeightedTerm { term: "motivation", weight: 3.0 },
    WeightedTerm { term: "struggling with life", weight: 3.0 },
];

const TECHNICAL_TERMS: &[WeightedTerm] = &[
    WeightedTerm { term: "code", weight: 2.0 },
    WeightedTerm { term: "bug", weight: 2.0 },
    WeightedTerm { term: "debug", weight: 2.0 },
    WeightedTerm { term: "api", weight: 2.0 },
    WeightedTerm { term: "stack trace", weight: 2.0 },
    WeightedTerm { term: "compile", weight: 2.0 },
    WeightedTerm { term: "deploy", weight: 2.0 },
    WeightedTerm { term: "server", weight: 2.0 },
    WeightedTerm { term: "database", weight: 2.0 },
    WeightedTerm { term: "system design", weight: 2.0 },
    WeightedTerm { term: "refactor", weight: 2.0 },
    WeightedTerm { term: "function", weight: 2.0 },
    WeightedTerm { term: "docker", weight: 2.0 },
    WeightedTerm { term: "kubernetes", weight: 2.0 },
    WeightedTerm { term: "regex", weight: 2.0 },
    WeightedTerm { term: "sql", weight: 2.0 },
];

const STRATEGIC_TERMS: &[WeightedTerm] = &[
    WeightedTerm { term: "strategy", weight: 2.0 },
    WeightedTerm { term: "roadmap", weight: 2.0 },
    WeightedTerm { term: "business", weight: 2.0 },
    WeightedTerm { term: "startup", weight: 2.0 },
    WeightedTerm { term: "market", weight: 2.0 },
    WeightedTerm { term: "growth", weight: 2.0 },
    WeightedTerm { term: "revenue", weight: 2.0 },
    WeightedTerm { term: "pricing", weight: 2.0 },
    WeightedTerm { term: "cost", weight: 2.0 },
    WeightedTerm { term: "competitor", weight: 2.0 },
    WeightedTerm { term: "should we", weight: 2.0 },
    WeightedTerm { term: "go-to-market", weight: 2.0 },
    WeightedTerm { term: "fundraising", weight: 2.0 },
    WeightedTerm { term: "trade-off", weight: 2.0 },
    WeightedTerm { term: "tradeoff", weight: 2.0 },
];

const CREATIVE_TERMS: &[WeightedTerm] = &[
    WeightedTerm { term: "write a story", weight: 2.0 },
    WeightedTerm { term: "poem", weight: 2.0 },
    WeightedTerm { term: "slogan", weight: 2.0 },
    WeightedTerm { term: "tagline", weight: 2.0 },
    WeightedTerm { term: "brainstorm", weight: 2.0 },
    WeightedTerm { term: "ideas for", weight: 2.0 },
    WeightedTerm { term: "creative", weight: 2.0 },
    WeightedTerm { term: "script", weight: 2.0 },
    WeightedTerm { term: "lyrics", weight: 2.0 },
    WeightedTerm { term: "name for", weight: 2.0 },
    WeightedTerm { term: "design a logo", weight: 2.0 },
    WeightedTerm { term: "short story", weight: 2.0 },
];

const LEARNING_TERMS: &[WeightedTerm] = &[
    WeightedTerm { term: "learn", weight: 1.5 },
    WeightedTerm { term: "teach me", weight: 1.5 },
    WeightedTerm { term: "tutorial", weight: 1.5 },
    WeightedTerm { term: "explain", weight: 1.5 },
    WeightedTerm { term: "understand", weight: 1.5 },
    WeightedTerm { term: "confused", weight: 1.5 },
    WeightedTerm { term: "how does", weight: 1.5 },
    WeightedTerm { term: "how do i start", weight: 1.5 },
    WeightedTerm { term: "beginner", weight: 1.5 },
    WeightedTerm { term: "course", weight: 1.5 },
    WeightedTerm { term: "practice", weight: 1.5 },
];

const ANALYTICAL_TERMS: &[WeightedTerm] = &[
    WeightedTerm { term: "analyze", weight: 1.5 },
    WeightedTerm { term: "analysis", weight: 1.5 },
    WeightedTerm { term: "evaluate", weight: 1.5 },
    WeightedTerm { term: "assess", weight: 1.5 },
    WeightedTerm { term: "summarize", weight: 1.5 },
    WeightedTerm { term: "interpret", weight: 1.5 },
    WeightedTerm { term: "statistics", weight: 1.5 },
    WeightedTerm { term: "breakdown", weight: 1.5 },
    WeightedTerm { term: "why does", weight: 1.5 },
    WeightedTerm { term: "report on", weight: 1.5 },
];

/// Terms whose meaning forks without context, with candidate readings.
const AMBIGUOUS_TERMS: &[AmbiguousTerm] = &[
    AmbiguousTerm { term: "bank", meanings: &["financial institution", "river bank"] },
    AmbiguousTerm { term: "apple", meanings: &["the company", "the fruit"] },
    AmbiguousTerm {
        term: "python",
        meanings: &["the programming language", "the snake"],
    },
    AmbiguousTerm {
        term: "java",
        meanings: &["the programming language", "the island", "coffee"],
    },
    AmbiguousTerm {
        term: "spring",
        meanings: &["the season", "the java framework", "a coiled spring", "a water spring"],
    },
    AmbiguousTerm {
        term: "mercury",
        meanings: &["the planet", "the element", "the roman god"],
    },
    AmbiguousTerm {
        term: "pitch",
        meanings: &["a sales pitch", "musical pitch", "a sports field"],
    },
    AmbiguousTerm { term: "crane", meanings: &["the machine", "the bird"] },
    AmbiguousTerm { term: "jaguar", meanings: &["the car brand", "the animal"] },
    AmbiguousTerm {
        term: "bolt",
        meanings: &["a fastener", "a lightning bolt", "to run"],
    },
    AmbiguousTerm {
        term: "shell",
        meanings: &["a command shell", "a sea shell", "the company"],
    },
    AmbiguousTerm {
        term: "swift",
        meanings: &["the programming language", "the bird", "the payment network"],
    },
];

/// Third-person pronouns and deictic terms that need an antecedent.
const PRONOUN_TERMS: &[&str] = &[
    "it", "this", "that", "these", "those", "they", "them", "its",
    // Hinglish deictics seen in production traffic.
    "uska", "uski", "woh", "iska", "unka",
];

/// Question-marker tokens used by the vague-question check.
const QUESTION_WORDS: &[&str] = &["how", "what", "why", "when", "where", "kya", "kaise"];

const GREETINGS: &[&str] = &[
    "hi", "hello", "hey", "yo", "namaste", "hola", "hi there", "good morning", "good evening",
];

const FAREWELLS: &[&str] = &["bye", "goodbye", "good night", "goodnight", "see you", "ciao"];

const ACKNOWLEDGEMENTS: &[&str] = &[
    "ok", "okay", "thanks", "thank you", "cool", "great", "nice", "sure", "yes", "no", "yep",
    "nope", "got it", "haha", "lol",
];

/// Phrasings that signal a multi-step or comparative ask.
const COMPLEX_PHRASINGS: &[&str] = &[
    "compare",
    " vs ",
    "versus",
    "step by step",
    "pros and cons",
    "trade-off",
    "tradeoff",
    "difference between",
    "explain in detail",
    "walk me through",
    "end to end",
    "from scratch",
    "best way to",
    "in depth",
];

/// Domain vocabulary contributing half-weight complexity.
const DOMAIN_KEYWORDS: &[&str] = &[
    "architecture",
    "scalability",
    "latency",
    "throughput",
    "distributed",
    "microservice",
    "kubernetes",
    "algorithm",
    "compliance",
    "valuation",
    "regression",
    "migration",
    "concurrency",
];

/// Keywords that disqualify a short message from the Quick fast path.
const DEPTH_KEYWORDS: &[&str] = &["explain", "why", "analyze", "help me"];

/// Nudge pattern sets. Checked in Decide > Simplify > Action order;
/// first match wins.
const DECIDE_PATTERNS: &[&str] = &[
    "should i",
    "which one",
    "can't decide",
    "cant decide",
    "or should",
    "what would you choose",
    "help me decide",
    "torn between",
];

const SIMPLIFY_PATTERNS: &[&str] = &[
    "confused",
    "don't understand",
    "dont understand",
    "too complicated",
    "simpler",
    "eli5",
    "lost me",
    "makes no sense",
];

const ACTION_PATTERNS: &[&str] = &[
    "how do i start",
    "next steps",
    "what should i do",
    "where do i begin",
    "get started",
    "action plan",
];

/// Markers that a request likely needs fresh external data or tools.
const EXTERNAL_DATA_TERMS: &[&str] = &[
    "latest",
    "today",
    "current",
    "right now",
    "this week",
    "news",
    "weather",
    "stock price",
    "price of",
    "exchange rate",
    "look up",
    "search for",
    "live score",
];

/// Read-only keyword tables shared by every analyzer.
///
/// All fields borrow `'static` data, so the lexicon is `Copy` and costs
/// nothing to hand to each analyzer at construction.
#[derive(Debug, Clone, Copy)]
pub struct Lexicon {
    pub ambiguous_terms: &'static [AmbiguousTerm],
    pub pronouns: &'static [&'static str],
    pub question_words: &'static [&'static str],
    pub greetings: &'static [&'static str],
    pub farewells: &'static [&'static str],
    pub acknowledgements: &'static [&'static str],
    pub complex_phrasings: &'static [&'static str],
    pub domain_keywords: &'static [&'static str],
    pub depth_keywords: &'static [&'static str],
    pub decide_patterns: &'static [&'static str],
    pub simplify_patterns: &'static [&'static str],
    pub action_patterns: &'static [&'static str],
    pub external_data_terms: &'static [&'static str],
}

impl Lexicon {
    /// The built-in lexicon (version [`LEXICON_VERSION`]).
    #[must_use]
    pub const fn builtin() -> Self {
        Self {
            ambiguous_terms: AMBIGUOUS_TERMS,
            pronouns: PRONOUN_TERMS,
            question_words: QUESTION_WORDS,
            greetings: GREETINGS,
            farewells: FAREWELLS,
            acknowledgements: ACKNOWLEDGEMENTS,
            complex_phrasings: COMPLEX_PHRASINGS,
            domain_keywords: DOMAIN_KEYWORDS,
            depth_keywords: DEPTH_KEYWORDS,
            decide_patterns: DECIDE_PATTERNS,
            simplify_patterns: SIMPLIFY_PATTERNS,
            action_patterns: ACTION_PATTERNS,
            external_data_terms: EXTERNAL_DATA_TERMS,
        }
    }

    /// Weighted keyword table for one intent category.
    ///
    /// Quick has no keywords; it is the fast path and the terminal fallback.
    #[must_use]
    pub fn category_terms(intent: Intent) -> &'static [WeightedTerm] {
        match intent {
            Intent::Personal => PERSONAL_TERMS,
            Intent::Technical => TECHNICAL_TERMS,
            Intent::Strategic => STRATEGIC_TERMS,
            Intent::Creative => CREATIVE_TERMS,
            Intent::Learning => LEARNING_TERMS,
            Intent::Analytical => ANALYTICAL_TERMS,
            Intent::Quick => &[],
        }
    }

    /// Validate the lexicon's structural invariants.
    ///
    /// The builtin tables always pass; the check guards data edits and is
    /// run once at engine construction.
    pub fn check(&self) -> Result<(), ApexError> {
        for entry in self.ambiguous_terms {
            if entry.meanings.len() < 2 {
                return Err(ApexError::Lexicon(format!(
                    "ambiguous term `{}` needs at least two candidate meanings",
                    entry.term
                )));
            }
        }

        let tables: [(&str, &[&str]); 6] = [
            ("pronouns", self.pronouns),
            ("question_words", self.question_words),
            ("greetings", self.greetings),
            ("decide_patterns", self.decide_patterns),
            ("simplify_patterns", self.simplify_patterns),
            ("action_patterns", self.action_patterns),
        ];
        for (name, table) in tables {
            if table.is_empty() {
                return Err(ApexError::Lexicon(format!("table `{name}` is empty")));
            }
        }

        for intent in Intent::ALL {
            for term in Self::category_terms(intent) {
                if !term.weight.is_finite() || term.weight <= 0.0 {
                    return Err(ApexError::Lexicon(format!(
                        "term `{}` carries a non-positive weight",
                        term.term
                    )));
                }
            }
        }

        Ok(())
    }

    /// Whether a normalized token is a greeting, farewell, or acknowledgement.
    #[must_use]
    pub fn is_social_token(&self, token: &str) -> bool {
        self.greetings.contains(&token)
            || self.farewells.contains(&token)
            || self.acknowledgements.contains(&token)
    }
}

/// Lowercase a message and split it into edge-trimmed tokens.
///
/// Internal punctuation is kept ("i'm" stays one token); leading and
/// trailing punctuation is stripped so "design," matches "design".
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Whether a term matches in a message.
///
/// Phrases (terms containing whitespace or hyphens) match as substrings of
/// the lowercased text; single words match whole tokens only, so "cost"
/// does not fire on "costume".
pub fn term_matches(term: &str, lower_text: &str, tokens: &[String]) -> bool {
    if term.contains(char::is_whitespace) || term.contains('-') {
        lower_text.contains(term)
    } else {
        tokens.iter().any(|t| t == term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_terms_carry_two_to_four_meanings() {
        for entry in AMBIGUOUS_TERMS {
            assert!(
                (2..=4).contains(&entry.meanings.len()),
                "`{}` must carry 2-4 candidate meanings",
                entry.term
            );
        }
    }

    #[test]
    fn category_tables_are_disjoint() {
        let categories = [
            Intent::Personal,
            Intent::Technical,
            Intent::Strategic,
            Intent::Creative,
            Intent::Learning,
            Intent::Analytical,
        ];
        for (i, a) in categories.iter().enumerate() {
            for b in &categories[i + 1..] {
                for term_a in Lexicon::category_terms(*a) {
                    for term_b in Lexicon::category_terms(*b) {
                        assert_ne!(
                            term_a.term, term_b.term,
                            "`{}` appears in both {a} and {b}",
                            term_a.term
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn personal_terms_outweigh_every_other_category() {
        let personal_min = PERSONAL_TERMS
            .iter()
            .map(|t| t.weight)
            .fold(f32::INFINITY, f32::min);
        for intent in [
            Intent::Technical,
            Intent::Strategic,
            Intent::Creative,
            Intent::Learning,
            Intent::Analytical,
        ] {
            for term in Lexicon::category_terms(intent) {
                assert!(
                    personal_min > term.weight,
                    "personal weight must dominate `{}`",
                    term.term
                );
            }
        }
    }

    #[test]
    fn builtin_lexicon_passes_check() {
        assert!(Lexicon::builtin().check().is_ok());
    }

    #[test]
    fn check_rejects_single_meaning_ambiguous_term() {
        const ONE_MEANING: &[AmbiguousTerm] = &[AmbiguousTerm {
            term: "crane",
            meanings: &["the machine"],
        }];
        let mut lexicon = Lexicon::builtin();
        lexicon.ambiguous_terms = ONE_MEANING;
        assert!(matches!(lexicon.check(), Err(ApexError::Lexicon(_))));
    }

    #[test]
    fn check_rejects_empty_pattern_table() {
        let mut lexicon = Lexicon::builtin();
        lexicon.decide_patterns = &[];
        assert!(matches!(lexicon.check(), Err(ApexError::Lexicon(_))));
    }

    #[test]
    fn tokenize_strips_edge_punctuation() {
        let tokens = tokenize("Compare AWS, GCP & Azure!");
        assert_eq!(tokens, vec!["compare", "aws", "gcp", "azure"]);
    }

    #[test]
    fn single_word_terms_match_whole_tokens_only() {
        let text = "a costume party";
        let tokens = tokenize(text);
        assert!(!term_matches("cost", text, &tokens));
        let text = "the cost of scaling";
        let tokens = tokenize(text);
        assert!(term_matches("cost", text, &tokens));
    }

    #[test]
    fn phrases_match_as_substrings() {
        let text = "please walk me through the setup";
        let tokens = tokenize(text);
        assert!(term_matches("walk me through", text, &tokens));
    }

    #[test]
    fn social_tokens_recognized() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.is_social_token("hi"));
        assert!(lexicon.is_social_token("thanks"));
        assert!(!lexicon.is_social_token("python"));
    }
}
