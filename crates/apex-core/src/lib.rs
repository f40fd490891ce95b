// SPDX-FileCopyrightText: 2026 Apex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Apex routing engine.
//!
//! This crate provides the value types exchanged between the caller, the
//! classification pipeline, and the routing decision builder, plus the
//! construction-time error type. It has no behavior of its own beyond
//! invariant-preserving constructors.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ApexError;
pub use types::{
    AmbiguityLevel, AmbiguityReport, ChainStep, ClassificationResult, ComplexityLevel,
    ComplexityReport, HistoryTurn, InboundMessage, Intent, NudgeType, ResponseHints, Role,
    RoutingDecision, SessionContext, StepOutput, Tier,
};
