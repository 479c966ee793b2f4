// src/engine/decision.rs - Maps a total score to a moderation outcome

use serde::{Deserialize, Serialize};

use crate::types::ModerationAction;

/// Score bands for the three outcomes. Named, overridable configuration,
/// never literals inside the algorithm. Ties resolve toward the stricter
/// outcome: each threshold is the inclusive lower bound of its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionThresholds {
    /// Scores at or above this publish but are queued for review.
    pub flag: u32,
    /// Scores at or above this are blocked outright.
    pub reject: u32,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            flag: 2500,
            reject: 50_000,
        }
    }
}

/// Deterministic and idempotent: identical inputs always yield the same action.
pub fn decide(total_score: u32, thresholds: &DecisionThresholds) -> ModerationAction {
    if total_score >= thresholds.reject {
        ModerationAction::Reject
    } else if total_score >= thresholds.flag {
        ModerationAction::Flag
    } else {
        ModerationAction::Publish
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_inclusive_on_the_stricter_side() {
        let thresholds = DecisionThresholds::default();
        assert_eq!(decide(0, &thresholds), ModerationAction::Publish);
        assert_eq!(decide(2499, &thresholds), ModerationAction::Publish);
        assert_eq!(decide(2500, &thresholds), ModerationAction::Flag);
        assert_eq!(decide(49_999, &thresholds), ModerationAction::Flag);
        assert_eq!(decide(50_000, &thresholds), ModerationAction::Reject);
        assert_eq!(decide(u32::MAX, &thresholds), ModerationAction::Reject);
    }

    #[test]
    fn custom_thresholds_shift_the_bands() {
        let thresholds = DecisionThresholds {
            flag: 100,
            reject: 200,
        };
        assert_eq!(decide(99, &thresholds), ModerationAction::Publish);
        assert_eq!(decide(100, &thresholds), ModerationAction::Flag);
        assert_eq!(decide(200, &thresholds), ModerationAction::Reject);
    }
}
