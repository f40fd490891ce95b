// SPDX-FileCopyrightText: 2026 Apex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Region-aware backend availability.
//!
//! Resolves which backends may serve a tier in a region, with a fallback
//! chain that can never come back empty: region override, then the default
//! table, then the default fast list, then a hardcoded last resort.

use std::collections::HashMap;

use apex_config::{ApexConfig, RegionsConfig};
use apex_core::Tier;
use tracing::warn;

/// Last-resort backend when even the default table has nothing for a tier.
/// Validation rejects configs with an empty default fast list, so this only
/// fires on tables constructed outside the loader.
const GLOBAL_DEFAULT_BACKEND: &str = "gemini-2.0-flash";

/// Availability lookups for one loaded configuration.
#[derive(Debug, Clone)]
pub struct AvailabilityTable {
    regions: RegionsConfig,
    backends: HashMap<String, String>,
    default_region: String,
    global_fallback: Vec<String>,
}

impl AvailabilityTable {
    pub fn from_config(config: &ApexConfig) -> Self {
        Self {
            regions: config.regions.clone(),
            backends: config.backends.clone(),
            default_region: config.routing.default_region.clone(),
            global_fallback: vec![GLOBAL_DEFAULT_BACKEND.to_string()],
        }
    }

    /// Region used when the caller supplies none.
    pub fn default_region(&self) -> &str {
        &self.default_region
    }

    /// Candidate backends for a tier in a region. Unknown regions fall back
    /// to the default table; a region override with an empty tier list means
    /// "not offered here" and also falls back.
    pub fn lookup(&self, region: Option<&str>, tier: Tier) -> &[String] {
        let region = region.unwrap_or(&self.default_region);

        if let Some(table) = self.regions.overrides.get(region) {
            let candidates = table.for_tier(tier);
            if !candidates.is_empty() {
                return candidates;
            }
            warn!(region, %tier, "tier not offered in region, using default table");
        }

        let candidates = self.regions.default.for_tier(tier);
        if !candidates.is_empty() {
            return candidates;
        }

        warn!(%tier, "default table empty for tier, degrading to fast");
        let fast = self.regions.default.for_tier(Tier::Fast);
        if !fast.is_empty() {
            return fast;
        }

        warn!("no backends configured at all, using global fallback");
        &self.global_fallback
    }

    /// Human-readable backend name, falling back to the raw id.
    pub fn display_name(&self, backend: &str) -> String {
        self.backends
            .get(backend)
            .cloned()
            .unwrap_or_else(|| backend.to_string())
    }
}
