// src/types/mod.rs - Core domain types for the auto-moderation engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A named moderation concern with its own pattern set and weight rule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Attempts to move the conversation to social platforms (doxxing risk).
    Solicitation,
    /// Shipping/pairing talk about real people.
    Shipping,
    /// Thirst-posting about cast members.
    Simp,
    /// Blasphemous phrasing; a single hit is designed to dominate the decision.
    Blasphemy,
    /// Derived from text shape (length, punctuation), not from a keyword table.
    LowQuality,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Solicitation,
        Category::Shipping,
        Category::Simp,
        Category::Blasphemy,
        Category::LowQuality,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Solicitation => "solicitation",
            Category::Shipping => "shipping",
            Category::Simp => "simp",
            Category::Blasphemy => "blasphemy",
            Category::LowQuality => "low_quality",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a category's matches combine into its sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// The category contributes its weight at most once per text.
    SingleTrigger,
    /// The weight is added once per non-overlapping match.
    PerOccurrence,
}

/// One matched occurrence inside the normalized text.
///
/// Matches within one category never overlap (leftmost scan, resume after the
/// match end); matches across categories are independent and may overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub category: Category,
    pub pattern: String,
    /// Byte offset into the normalized (padded) text.
    pub position: usize,
}

/// Per-category sub-scores plus the adjustments applied on top of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Accumulated sub-score per category that fired. Sub-scores already
    /// include category-local adjustments (the simp forgiveness discount).
    pub categories: BTreeMap<Category, u32>,
    /// Amount subtracted from the simp sub-score because a forgiveness marker
    /// co-occurred with at least one simp match.
    pub forgiveness: u32,
    /// Amount subtracted once from the grand total for long, substantive text.
    pub length_bonus: u32,
    /// Every recorded occurrence, in scan order per category.
    pub matches: Vec<MatchEvent>,
}

impl ScoreBreakdown {
    /// Grand total: sum of sub-scores minus the global adjustment, floored at
    /// 0 and clamped at `u32::MAX`.
    pub fn total(&self) -> u32 {
        let sum = self
            .categories
            .values()
            .fold(0u32, |acc, sub| acc.saturating_add(*sub));
        sum.saturating_sub(self.length_bonus)
    }

    pub fn sub_score(&self, category: Category) -> u32 {
        self.categories.get(&category).copied().unwrap_or(0)
    }

    /// Categories that fired on this text, in a stable order.
    pub fn fired_categories(&self) -> Vec<Category> {
        self.categories.keys().copied().collect()
    }
}

/// The three moderation outcomes, from most to least permissive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    /// No action; content publishes normally.
    Publish,
    /// Content publishes but is queued for moderator review.
    Flag,
    /// Content is blocked from publishing.
    Reject,
}

impl ModerationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationAction::Publish => "publish",
            ModerationAction::Flag => "flag",
            ModerationAction::Reject => "reject",
        }
    }
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of moderating one text. Computed fresh on every submission or edit,
/// never diffed against a previous decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub action: ModerationAction,
    pub total_score: u32,
    pub breakdown: ScoreBreakdown,
}

/// The only distinguishable engine failure: a payload that is not text.
/// Every actual string, however degenerate, produces a valid [`Decision`].
#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("payload is not valid UTF-8 text: {0}")]
    InvalidInput(#[from] std::str::Utf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_total_sums_categories() {
        let mut breakdown = ScoreBreakdown::default();
        breakdown.categories.insert(Category::Solicitation, 2500);
        breakdown.categories.insert(Category::LowQuality, 750);
        assert_eq!(breakdown.total(), 3250);
    }

    #[test]
    fn breakdown_total_clamps_at_u32_max() {
        let mut breakdown = ScoreBreakdown::default();
        breakdown.categories.insert(Category::Blasphemy, u32::MAX);
        breakdown.categories.insert(Category::Simp, 1000);
        assert_eq!(breakdown.total(), u32::MAX);
        breakdown.length_bonus = 200;
        assert_eq!(breakdown.total(), u32::MAX - 200);
    }

    #[test]
    fn breakdown_total_floors_at_zero() {
        let mut breakdown = ScoreBreakdown::default();
        breakdown.length_bonus = 200;
        assert_eq!(breakdown.total(), 0);
    }

    #[test]
    fn action_serializes_lowercase() {
        let json = serde_json::to_string(&ModerationAction::Reject).unwrap();
        assert_eq!(json, "\"reject\"");
    }

    #[test]
    fn decision_uses_wire_field_names() {
        let decision = Decision {
            action: ModerationAction::Publish,
            total_score: 0,
            breakdown: ScoreBreakdown::default(),
        };
        let json = serde_json::to_value(&decision).unwrap();
        assert!(json.get("totalScore").is_some());
        assert!(json.get("breakdown").is_some());
    }
}
