// SPDX-FileCopyrightText: 2026 Apex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: ordered word thresholds, percentage bounds, non-empty
//! backend lists, and positive token budgets.

use apex_core::Tier;

use crate::diagnostic::ConfigError;
use crate::model::{ApexConfig, TierTable};

/// Every tier, for table-wide validation sweeps.
const ALL_TIERS: [Tier; 8] = [
    Tier::Fast,
    Tier::Deep,
    Tier::Advisor,
    Tier::Creative,
    Tier::Technical,
    Tier::Learning,
    Tier::Personal,
    Tier::Synthesis,
];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ApexConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Word thresholds must be strictly ordered: short < moderate < long.
    let c = &config.classifier;
    if c.short_message_max_words >= c.moderate_min_words {
        errors.push(ConfigError::Validation {
            message: format!(
                "classifier.short_message_max_words ({}) must be below moderate_min_words ({})",
                c.short_message_max_words, c.moderate_min_words
            ),
        });
    }
    if c.moderate_min_words >= c.long_message_min_words {
        errors.push(ConfigError::Validation {
            message: format!(
                "classifier.moderate_min_words ({}) must be below long_message_min_words ({})",
                c.moderate_min_words, c.long_message_min_words
            ),
        });
    }

    if !c.dominance_margin.is_finite() || c.dominance_margin < 0.0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "classifier.dominance_margin must be a non-negative number, got {}",
                c.dominance_margin
            ),
        });
    }

    if !c.analytical_length_bonus.is_finite() || c.analytical_length_bonus < 0.0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "classifier.analytical_length_bonus must be a non-negative number, got {}",
                c.analytical_length_bonus
            ),
        });
    }

    if config.routing.creative_chain_percent > 100 {
        errors.push(ConfigError::Validation {
            message: format!(
                "routing.creative_chain_percent must be at most 100, got {}",
                config.routing.creative_chain_percent
            ),
        });
    }

    if config.routing.default_region.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "routing.default_region must not be empty".to_string(),
        });
    }

    for tier in ALL_TIERS {
        if config.routing.max_tokens_for(tier) == 0 {
            errors.push(ConfigError::Validation {
                message: format!("routing.{tier}_max_tokens must be positive"),
            });
        }
    }

    // The default fast list is the terminal availability fallback; it must
    // never be empty.
    if config.regions.default.fast.is_empty() {
        errors.push(ConfigError::Validation {
            message: "regions.default.fast must list at least one backend".to_string(),
        });
    }

    validate_tier_table("regions.default", &config.regions.default, &mut errors);
    for (region, table) in &config.regions.overrides {
        validate_tier_table(&format!("regions.overrides.{region}"), table, &mut errors);
    }

    for (id, display) in &config.backends {
        if id.trim().is_empty() || display.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "backends entries must have non-empty ids and display names".to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Reject blank backend identifiers anywhere in a tier table.
fn validate_tier_table(path: &str, table: &TierTable, errors: &mut Vec<ConfigError>) {
    for tier in ALL_TIERS {
        for backend in table.for_tier(tier) {
            if backend.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: format!("{path}.{tier} contains an empty backend identifier"),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ApexConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn unordered_thresholds_are_rejected() {
        let mut config = ApexConfig::default();
        config.classifier.moderate_min_words = 3;
        let errors = validate_config(&config).expect_err("should collect errors");
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("short_message_max_words")));
    }

    #[test]
    fn over_100_percent_is_rejected() {
        let mut config = ApexConfig::default();
        config.routing.creative_chain_percent = 101;
        let errors = validate_config(&config).expect_err("should collect errors");
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("creative_chain_percent")));
    }

    #[test]
    fn empty_default_fast_list_is_rejected() {
        let mut config = ApexConfig::default();
        config.regions.default.fast.clear();
        let errors = validate_config(&config).expect_err("should collect errors");
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("regions.default.fast")));
    }

    #[test]
    fn blank_backend_id_in_override_is_rejected() {
        let mut config = ApexConfig::default();
        let mut table = crate::model::TierTable::empty();
        table.deep = vec!["  ".to_string()];
        config.regions.overrides.insert("EU".to_string(), table);
        let errors = validate_config(&config).expect_err("should collect errors");
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("regions.overrides.EU.deep")));
    }

    #[test]
    fn errors_are_collected_not_fail_fast() {
        let mut config = ApexConfig::default();
        config.routing.creative_chain_percent = 200;
        config.routing.default_region = String::new();
        config.regions.default.fast.clear();
        let errors = validate_config(&config).expect_err("should collect errors");
        assert!(errors.len() >= 3, "expected all errors, got {errors:?}");
    }
}
