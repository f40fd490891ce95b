// SPDX-FileCopyrightText: 2026 Apex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic classification and deterministic routing for LLM requests.
//!
//! The engine reads one inbound message (plus optional history and session
//! state) and decides which backend — or ordered chain of backends — should
//! serve it. Everything is lexicon-driven and deterministic: no network, no
//! model calls, no randomness.
//!
//! ```
//! use apex_config::ApexConfig;
//! use apex_core::InboundMessage;
//! use apex_router::ApexRouter;
//!
//! let router = ApexRouter::new(ApexConfig::default()).expect("valid configuration");
//! let decision = router.route(&InboundMessage::new("hi there"), None);
//! assert!(!decision.multi_model);
//! ```

pub mod ambiguity;
pub mod availability;
pub mod complexity;
pub mod intent;
pub mod lexicon;
pub mod nudge;
pub mod router;
pub mod selector;

pub use ambiguity::AmbiguityAnalyzer;
pub use availability::AvailabilityTable;
pub use complexity::ComplexityAnalyzer;
pub use intent::IntentClassifier;
pub use lexicon::{Lexicon, LEXICON_VERSION};
pub use nudge::NudgeDetector;
pub use router::ApexRouter;
pub use selector::{fnv1a_64, DeterministicSelector};
