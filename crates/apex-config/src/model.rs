// SPDX-FileCopyrightText: 2026 Apex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Apex routing engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages. Every
//! field carries a compiled default so an empty config file is valid.

use std::collections::HashMap;

use apex_core::Tier;
use serde::{Deserialize, Serialize};

/// Top-level Apex configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApexConfig {
    /// Intent classifier tuning.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Routing and chain-construction settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Region availability tables.
    #[serde(default)]
    pub regions: RegionsConfig,

    /// Backend id → human display name. Missing entries fall back to the id.
    #[serde(default)]
    pub backends: HashMap<String, String>,
}

/// Intent classifier tuning knobs.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Collapse the seven-label set to the historical five-label set at the
    /// output edge (Strategic→Analytical, Technical→Creative).
    #[serde(default)]
    pub five_category_mode: bool,

    /// Messages with at most this many words take the Quick fast path
    /// (unless they contain a depth-request keyword).
    #[serde(default = "default_short_message_max_words")]
    pub short_message_max_words: usize,

    /// Word count above which a message counts as moderate-length.
    #[serde(default = "default_moderate_min_words")]
    pub moderate_min_words: usize,

    /// Word count above which a message forces Complex and earns the
    /// Analytical length bonus.
    #[serde(default = "default_long_message_min_words")]
    pub long_message_min_words: usize,

    /// Score margin a collision-prone category must hold over its rival
    /// (Strategic vs Creative) to win.
    #[serde(default = "default_dominance_margin")]
    pub dominance_margin: f32,

    /// Score bonus added to Analytical for long messages.
    #[serde(default = "default_analytical_length_bonus")]
    pub analytical_length_bonus: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            five_category_mode: false,
            short_message_max_words: default_short_message_max_words(),
            moderate_min_words: default_moderate_min_words(),
            long_message_min_words: default_long_message_min_words(),
            dominance_margin: default_dominance_margin(),
            analytical_length_bonus: default_analytical_length_bonus(),
        }
    }
}

fn default_short_message_max_words() -> usize {
    4
}

fn default_moderate_min_words() -> usize {
    20
}

fn default_long_message_min_words() -> usize {
    100
}

fn default_dominance_margin() -> f32 {
    2.0
}

fn default_analytical_length_bonus() -> f32 {
    2.0
}

/// Routing and chain-construction settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Region used when the message and session carry no region code, and
    /// the fallback region for missing availability entries.
    #[serde(default = "default_region")]
    pub default_region: String,

    /// Percentage (0–100) of the deterministic hash space in which a
    /// Creative request is upgraded to an ideate→validate chain.
    #[serde(default = "default_creative_chain_percent")]
    pub creative_chain_percent: u8,

    /// Response token budget for fast-tier answers.
    #[serde(default = "default_fast_max_tokens")]
    pub fast_max_tokens: u32,

    /// Response token budget for deep-reasoning answers.
    #[serde(default = "default_deep_max_tokens")]
    pub deep_max_tokens: u32,

    /// Response token budget for advisor-grade answers.
    #[serde(default = "default_advisor_max_tokens")]
    pub advisor_max_tokens: u32,

    /// Response token budget for creative answers.
    #[serde(default = "default_creative_max_tokens")]
    pub creative_max_tokens: u32,

    /// Response token budget for technical answers.
    #[serde(default = "default_technical_max_tokens")]
    pub technical_max_tokens: u32,

    /// Response token budget for learning answers.
    #[serde(default = "default_learning_max_tokens")]
    pub learning_max_tokens: u32,

    /// Response token budget for personal answers.
    #[serde(default = "default_personal_max_tokens")]
    pub personal_max_tokens: u32,

    /// Response token budget for synthesis chain output.
    #[serde(default = "default_synthesis_max_tokens")]
    pub synthesis_max_tokens: u32,
}

impl RoutingConfig {
    /// Token budget for a tier.
    #[must_use]
    pub fn max_tokens_for(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Fast => self.fast_max_tokens,
            Tier::Deep => self.deep_max_tokens,
            Tier::Advisor => self.advisor_max_tokens,
            Tier::Creative => self.creative_max_tokens,
            Tier::Technical => self.technical_max_tokens,
            Tier::Learning => self.learning_max_tokens,
            Tier::Personal => self.personal_max_tokens,
            Tier::Synthesis => self.synthesis_max_tokens,
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_region: default_region(),
            creative_chain_percent: default_creative_chain_percent(),
            fast_max_tokens: default_fast_max_tokens(),
            deep_max_tokens: default_deep_max_tokens(),
            advisor_max_tokens: default_advisor_max_tokens(),
            creative_max_tokens: default_creative_max_tokens(),
            technical_max_tokens: default_technical_max_tokens(),
            learning_max_tokens: default_learning_max_tokens(),
            personal_max_tokens: default_personal_max_tokens(),
            synthesis_max_tokens: default_synthesis_max_tokens(),
        }
    }
}

fn default_region() -> String {
    "US".to_string()
}

fn default_creative_chain_percent() -> u8 {
    30
}

fn default_fast_max_tokens() -> u32 {
    512
}

fn default_deep_max_tokens() -> u32 {
    4096
}

fn default_advisor_max_tokens() -> u32 {
    8192
}

fn default_creative_max_tokens() -> u32 {
    2048
}

fn default_technical_max_tokens() -> u32 {
    4096
}

fn default_learning_max_tokens() -> u32 {
    2048
}

fn default_personal_max_tokens() -> u32 {
    1024
}

fn default_synthesis_max_tokens() -> u32 {
    8192
}

/// Region availability tables.
///
/// The `default` table serves every region without an override and is the
/// fallback for tiers an override leaves empty.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegionsConfig {
    /// Tier table used when no region override applies.
    #[serde(default)]
    pub default: TierTable,

    /// Per-region overrides keyed by region code (e.g., "EU", "IN").
    #[serde(default)]
    pub overrides: HashMap<String, TierTable>,
}

/// Ordered backend identifier lists per tier.
///
/// List order matters: the deterministic selector indexes into it, and a
/// single-entry list means a fixed backend (no hashing). An empty list
/// means "not available here" and defers to the default table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TierTable {
    #[serde(default = "default_fast_backends")]
    pub fast: Vec<String>,

    #[serde(default = "default_deep_backends")]
    pub deep: Vec<String>,

    #[serde(default = "default_advisor_backends")]
    pub advisor: Vec<String>,

    #[serde(default = "default_creative_backends")]
    pub creative: Vec<String>,

    #[serde(default = "default_technical_backends")]
    pub technical: Vec<String>,

    #[serde(default = "default_learning_backends")]
    pub learning: Vec<String>,

    #[serde(default = "default_personal_backends")]
    pub personal: Vec<String>,

    #[serde(default = "default_synthesis_backends")]
    pub synthesis: Vec<String>,
}

impl TierTable {
    /// The ordered backend list for a tier.
    #[must_use]
    pub fn for_tier(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Fast => &self.fast,
            Tier::Deep => &self.deep,
            Tier::Advisor => &self.advisor,
            Tier::Creative => &self.creative,
            Tier::Technical => &self.technical,
            Tier::Learning => &self.learning,
            Tier::Personal => &self.personal,
            Tier::Synthesis => &self.synthesis,
        }
    }

    /// An override table with every tier empty (defers to the default table).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            fast: Vec::new(),
            deep: Vec::new(),
            advisor: Vec::new(),
            creative: Vec::new(),
            technical: Vec::new(),
            learning: Vec::new(),
            personal: Vec::new(),
            synthesis: Vec::new(),
        }
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            fast: default_fast_backends(),
            deep: default_deep_backends(),
            advisor: default_advisor_backends(),
            creative: default_creative_backends(),
            technical: default_technical_backends(),
            learning: default_learning_backends(),
            personal: default_personal_backends(),
            synthesis: default_synthesis_backends(),
        }
    }
}

fn default_fast_backends() -> Vec<String> {
    vec!["gemini-2.0-flash".to_string(), "gpt-4o-mini".to_string()]
}

fn default_deep_backends() -> Vec<String> {
    vec!["claude-sonnet-4".to_string(), "gpt-4o".to_string()]
}

fn default_advisor_backends() -> Vec<String> {
    // Single entry: strategic requests pin to one advisor-grade backend.
    vec!["claude-opus-4".to_string()]
}

fn default_creative_backends() -> Vec<String> {
    vec!["gpt-4o".to_string(), "claude-sonnet-4".to_string()]
}

fn default_technical_backends() -> Vec<String> {
    vec!["claude-sonnet-4".to_string(), "deepseek-v3".to_string()]
}

fn default_learning_backends() -> Vec<String> {
    vec!["gemini-2.0-flash".to_string(), "claude-sonnet-4".to_string()]
}

fn default_personal_backends() -> Vec<String> {
    vec!["claude-sonnet-4".to_string()]
}

fn default_synthesis_backends() -> Vec<String> {
    vec!["gpt-4o".to_string()]
}
