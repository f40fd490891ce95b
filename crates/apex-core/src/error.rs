// SPDX-FileCopyrightText: 2026 Apex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Apex routing engine.

use thiserror::Error;

/// The primary error type for Apex construction-time failures.
///
/// The routing pipeline itself is total: `classify` and `route` always
/// produce a result and degrade to the cheapest fallback instead of
/// erroring. These variants surface problems that can only occur while
/// building an engine (bad configuration, malformed lexicon data).
#[derive(Debug, Error)]
pub enum ApexError {
    /// Configuration errors (invalid values, empty backend lists, bad thresholds).
    #[error("configuration error: {0}")]
    Config(String),

    /// Lexicon data errors (empty tables, invalid weights).
    #[error("lexicon error: {0}")]
    Lexicon(String),
}
