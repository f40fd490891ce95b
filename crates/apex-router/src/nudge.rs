// SPDX-FileCopyrightText: 2026 Apex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! UI nudge detection.
//!
//! Scans the raw message against three ordered pattern sets and surfaces a
//! hint ("want help deciding / a simpler explanation / next steps").
//! Orthogonal to intent classification; pure and stateless.

use apex_core::NudgeType;

use crate::lexicon::Lexicon;

/// Detects nudge-worthy phrasings. First matching set wins, checked in
/// Decide > Simplify > Action order.
#[derive(Debug, Clone, Copy)]
pub struct NudgeDetector {
    lexicon: Lexicon,
}

impl NudgeDetector {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Detect a nudge hint, if any pattern set matches.
    pub fn detect(&self, text: &str) -> Option<NudgeType> {
        let lower = text.to_lowercase();

        let sets: [(&[&str], NudgeType); 3] = [
            (self.lexicon.decide_patterns, NudgeType::Decide),
            (self.lexicon.simplify_patterns, NudgeType::Simplify),
            (self.lexicon.action_patterns, NudgeType::Action),
        ];

        for (patterns, nudge) in sets {
            if patterns.iter().any(|p| lower.contains(p)) {
                return Some(nudge);
            }
        }
        None
    }
}
