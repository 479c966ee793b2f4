// src/engine/mod.rs - The normalize -> score -> decide pipeline

pub mod catalog;
pub mod decision;
pub mod normalizer;
pub mod scorer;

use log::debug;

use crate::config::ModerationConfig;
use crate::types::{Decision, ModerationError};

pub use catalog::PatternCatalog;
pub use decision::{decide, DecisionThresholds};
pub use normalizer::normalize;
pub use scorer::Scorer;

/// The moderation engine: a pure function of (text, catalog, thresholds).
///
/// Holds no shared mutable state, so one instance behind an `Arc` serves
/// arbitrarily many concurrent submissions without locking. The entire
/// pipeline is bounded by input length (one linear scan per pattern per
/// category).
pub struct AutoModerator {
    scorer: Scorer,
    thresholds: DecisionThresholds,
}

impl AutoModerator {
    pub fn new(config: ModerationConfig) -> Self {
        Self {
            scorer: Scorer::new(&config.catalog, config.weights, config.floors),
            thresholds: config.thresholds,
        }
    }

    /// Moderate one text blob with the configured thresholds.
    pub fn review(&self, text: Option<&str>) -> Decision {
        self.review_with_thresholds(text, &self.thresholds)
    }

    /// Moderate with a per-call threshold override.
    pub fn review_with_thresholds(
        &self,
        text: Option<&str>,
        thresholds: &DecisionThresholds,
    ) -> Decision {
        let normalized = normalize(text);
        let breakdown = self.scorer.score(&normalized);
        let total_score = breakdown.total();
        let action = decide(total_score, thresholds);
        debug!(
            "decision: {} (score {}, categories {:?})",
            action,
            total_score,
            breakdown.fired_categories()
        );
        Decision {
            action,
            total_score,
            breakdown,
        }
    }

    /// UTF-8 gate in front of [`review`](Self::review). Non-text payloads are
    /// the engine's only distinguishable failure; the caller decides whether
    /// to reject the submission or fall back to treating it as empty.
    pub fn review_bytes(&self, payload: &[u8]) -> Result<Decision, ModerationError> {
        let text = std::str::from_utf8(payload)?;
        Ok(self.review(Some(text)))
    }
}

impl Default for AutoModerator {
    fn default() -> Self {
        Self::new(ModerationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, ModerationAction};

    #[test]
    fn solicitation_mention_gets_flagged() {
        let engine = AutoModerator::default();
        let decision = engine.review(Some(
            "check my insta @handle for a longer discussion about this film",
        ));
        assert_eq!(decision.breakdown.sub_score(Category::Solicitation), 2500);
        assert_eq!(decision.total_score, 2500);
        assert_eq!(decision.action, ModerationAction::Flag);
    }

    #[test]
    fn blasphemy_gets_rejected() {
        let engine = AutoModerator::default();
        let decision = engine.review(Some("holy shit"));
        assert!(decision.total_score >= 50_000);
        assert_eq!(decision.action, ModerationAction::Reject);
    }

    #[test]
    fn very_short_review_still_publishes() {
        let engine = AutoModerator::default();
        let decision = engine.review(Some("meh."));
        assert_eq!(decision.total_score, 750);
        assert_eq!(decision.action, ModerationAction::Publish);
    }

    #[test]
    fn empty_and_missing_text_publish_with_zero_score() {
        let engine = AutoModerator::default();
        for decision in [engine.review(None), engine.review(Some(""))] {
            assert_eq!(decision.total_score, 0);
            assert_eq!(decision.action, ModerationAction::Publish);
        }
    }

    #[test]
    fn per_call_thresholds_override_the_configured_ones() {
        let engine = AutoModerator::default();
        let strict = DecisionThresholds {
            flag: 500,
            reject: 700,
        };
        let decision = engine.review_with_thresholds(Some("meh."), &strict);
        assert_eq!(decision.action, ModerationAction::Reject);
    }

    #[test]
    fn identical_input_yields_identical_decisions() {
        let engine = AutoModerator::default();
        let text = Some("shipping them so hard, they belong together!!!");
        assert_eq!(engine.review(text), engine.review(text));
    }

    #[test]
    fn invalid_utf8_is_the_only_error() {
        let engine = AutoModerator::default();
        let result = engine.review_bytes(&[0x66, 0x69, 0xff, 0xfe]);
        assert!(matches!(result, Err(ModerationError::InvalidInput(_))));

        let ok = engine.review_bytes("fine text".as_bytes()).unwrap();
        assert_eq!(ok.action, ModerationAction::Publish);
    }
}
