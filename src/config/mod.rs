// src/config/mod.rs - External configuration for weights, floors, thresholds, catalog

use anyhow::{bail, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::engine::catalog::PatternCatalog;
use crate::engine::decision::DecisionThresholds;

/// Per-match weights and fixed adjustments. The two discounts
/// (`goslingian_forgiveness`, `long_thoughtful_bonus`) are stored as positive
/// magnitudes and subtracted by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub solicitation: u32,
    pub shipping: u32,
    pub simping_per_term: u32,
    pub goslingian_forgiveness: u32,
    pub blasphemy_per_term: u32,
    pub very_short_review: u32,
    pub short_review: u32,
    pub memey_punctuation: u32,
    pub long_thoughtful_bonus: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            solicitation: 2500,
            shipping: 1500,
            simping_per_term: 1000,
            goslingian_forgiveness: 500,
            blasphemy_per_term: 50_000,
            very_short_review: 750,
            short_review: 500,
            memey_punctuation: 250,
            long_thoughtful_bonus: 200,
        }
    }
}

/// Character-count floors for the text-shape checks, measured on normalized
/// text excluding the padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthFloors {
    /// Below this the text is a very short review.
    pub very_short: usize,
    /// Below this (and at or above `very_short`) it is a short review.
    pub short: usize,
    /// Above this the long-thoughtful bonus applies.
    pub thoughtful: usize,
}

impl Default for LengthFloors {
    fn default() -> Self {
        Self {
            very_short: 15,
            short: 40,
            thoughtful: 600,
        }
    }
}

/// Everything the engine is a function of, besides the text itself.
/// Loaded once at startup (or embedded via `Default`) and injected into the
/// engine; the engine never reads configuration from a database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModerationConfig {
    #[serde(default)]
    pub weights: ScoringWeights,
    #[serde(default)]
    pub floors: LengthFloors,
    #[serde(default)]
    pub thresholds: DecisionThresholds,
    #[serde(default)]
    pub catalog: PatternCatalog,
}

impl ModerationConfig {
    /// Load and validate a TOML configuration file.
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .await
            .with_context(|| format!("reading moderation config {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("parsing moderation config {}", path.display()))?;
        config.validate()?;
        info!(
            "loaded moderation config from {} (catalog v{})",
            path.display(),
            config.catalog.version
        );
        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        let raw = toml::to_string_pretty(self).context("serializing moderation config")?;
        fs::write(path, raw)
            .await
            .with_context(|| format!("writing moderation config {}", path.display()))?;
        Ok(())
    }

    /// Reject configurations the scorer cannot sensibly run with.
    pub fn validate(&self) -> Result<()> {
        if self.thresholds.flag > self.thresholds.reject {
            bail!(
                "flag threshold {} exceeds reject threshold {}",
                self.thresholds.flag,
                self.thresholds.reject
            );
        }
        if self.floors.very_short >= self.floors.short {
            bail!(
                "very-short floor {} must be below short floor {}",
                self.floors.very_short,
                self.floors.short
            );
        }
        if self.floors.short >= self.floors.thoughtful {
            bail!(
                "short floor {} must be below thoughtful floor {}",
                self.floors.short,
                self.floors.thoughtful
            );
        }

        let weights = [
            ("solicitation", self.weights.solicitation),
            ("shipping", self.weights.shipping),
            ("simping_per_term", self.weights.simping_per_term),
            ("blasphemy_per_term", self.weights.blasphemy_per_term),
            ("very_short_review", self.weights.very_short_review),
            ("short_review", self.weights.short_review),
            ("memey_punctuation", self.weights.memey_punctuation),
        ];
        for (name, value) in weights {
            if value == 0 {
                bail!("weight {} must be positive", name);
            }
        }

        for category in PatternCatalog::KEYWORD_CATEGORIES {
            let patterns = self.catalog.patterns(category);
            if patterns.is_empty() {
                bail!("catalog table {} is empty", category);
            }
            if patterns.iter().any(|p| p.trim().is_empty()) {
                bail!("catalog table {} contains a blank pattern", category);
            }
        }
        Ok(())
    }
}
