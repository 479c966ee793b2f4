//! # Rule-Based Auto-Moderation Engine
//!
//! Inspects user-submitted free text (reviews, comments) and produces a
//! numeric severity score used to decide whether the content publishes
//! normally, gets queued for human review, or is rejected outright.
//!
//! ## Features
//!
//! - **Weighted multi-category matching**: five concern categories, each with
//!   its own pattern table, matching mode, and weight
//! - **Occurrence-sensitive accumulation**: single-trigger and per-occurrence
//!   combination rules, with non-overlapping scans per category
//! - **Forgiveness and bonus adjustments**: benign-context discounts and a
//!   long-thoughtful-text bonus
//! - **Threshold-based decisioning**: configurable publish/flag/reject bands
//!   with a structured explanation of which categories fired
//! - **Pure and lock-free**: the engine is a pure function of
//!   (text, catalog, thresholds) and runs concurrently without locking
//!
//! ## Quick Start
//!
//! ```rust
//! use automoderator::prelude::*;
//!
//! let engine = AutoModerator::default();
//! let decision = engine.review(Some("check my insta @handle for a longer discussion about this film"));
//! assert_eq!(decision.action, ModerationAction::Flag);
//! assert_eq!(decision.total_score, 2500);
//! ```
//!
//! Persistence, authentication, and rendering are external collaborators:
//! they call [`integration::ModerationGateway`] and persist the resulting
//! flag value themselves.

pub mod config;
pub mod engine;
pub mod integration;
pub mod types;

// Re-export commonly used items
pub mod prelude {
    pub use crate::config::{LengthFloors, ModerationConfig, ScoringWeights};
    pub use crate::engine::{AutoModerator, DecisionThresholds, PatternCatalog};
    pub use crate::integration::{
        ContentKind, ContentRepository, FlagRecord, GatewayError, ModerationGateway,
        ModerationReport,
    };
    pub use crate::types::{
        Category, Decision, MatchEvent, MatchMode, ModerationAction, ModerationError,
        ScoreBreakdown,
    };
    pub use anyhow::Result;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
