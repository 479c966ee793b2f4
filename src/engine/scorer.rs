// src/engine/scorer.rs - Scans normalized text and accumulates the score

use log::debug;
use regex::Regex;
use std::collections::BTreeMap;

use crate::config::{LengthFloors, ScoringWeights};
use crate::engine::catalog::PatternCatalog;
use crate::engine::normalizer::content_len;
use crate::types::{Category, MatchEvent, ScoreBreakdown};

/// Scans normalized text against every category's patterns and accumulates
/// a [`ScoreBreakdown`] per the category combination rules.
///
/// Pure and synchronous: a `Scorer` holds no mutable state, so one instance
/// can serve arbitrarily many concurrent calls without locking.
pub struct Scorer {
    /// Lowercased pattern tables in scan order.
    tables: Vec<(Category, Vec<String>)>,
    forgiveness_markers: Vec<String>,
    weights: ScoringWeights,
    floors: LengthFloors,
    punctuation_run: Regex,
}

impl Scorer {
    pub fn new(catalog: &PatternCatalog, weights: ScoringWeights, floors: LengthFloors) -> Self {
        let tables = PatternCatalog::KEYWORD_CATEGORIES
            .into_iter()
            .map(|category| {
                let patterns = catalog
                    .patterns(category)
                    .iter()
                    .filter(|p| !p.is_empty())
                    .map(|p| p.to_lowercase())
                    .collect();
                (category, patterns)
            })
            .collect();

        Self {
            tables,
            forgiveness_markers: catalog
                .forgiveness_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
            weights,
            floors,
            punctuation_run: Regex::new(r"[!?.]{3,}").expect("punctuation run regex is a valid literal"),
        }
    }

    /// Score already-normalized text. Never panics on ordinary text; there is
    /// no error path.
    pub fn score(&self, normalized: &str) -> ScoreBreakdown {
        let mut categories = BTreeMap::new();
        let mut matches = Vec::new();
        let mut forgiveness = 0;

        for (category, patterns) in &self.tables {
            let events = scan_category(normalized, *category, patterns);
            if events.is_empty() {
                continue;
            }

            let sub_score = match category {
                Category::Solicitation => self.weights.solicitation,
                Category::Shipping => self.weights.shipping,
                Category::Simp => {
                    let raw = occurrence_total(events.len(), self.weights.simping_per_term);
                    if self.has_forgiveness_marker(normalized) {
                        // Discount applies once, floored at 0 for this sub-score.
                        forgiveness = self.weights.goslingian_forgiveness.min(raw);
                        raw - forgiveness
                    } else {
                        raw
                    }
                }
                Category::Blasphemy => {
                    occurrence_total(events.len(), self.weights.blasphemy_per_term)
                }
                Category::LowQuality => unreachable!("low-quality is not keyword-matched"),
            };

            debug!(
                "category {} fired {} time(s), sub-score {}",
                category,
                events.len(),
                sub_score
            );
            categories.insert(*category, sub_score);
            matches.extend(events);
        }

        let length = content_len(normalized);
        let low_quality = self.low_quality_score(normalized, length);
        if low_quality > 0 {
            categories.insert(Category::LowQuality, low_quality);
        }

        let length_bonus = if length > self.floors.thoughtful {
            self.weights.long_thoughtful_bonus
        } else {
            0
        };

        ScoreBreakdown {
            categories,
            forgiveness,
            length_bonus,
            matches,
        }
    }

    fn has_forgiveness_marker(&self, normalized: &str) -> bool {
        self.forgiveness_markers
            .iter()
            .any(|marker| normalized.contains(marker.as_str()))
    }

    /// Shape-derived sub-score: short-text floors plus low-effort punctuation.
    /// The sub-conditions are independent and additive. Empty text is a
    /// defined zero-score result, not a short review.
    fn low_quality_score(&self, normalized: &str, length: usize) -> u32 {
        if length == 0 {
            return 0;
        }

        let mut sub_score: u32 = 0;
        if length < self.floors.very_short {
            sub_score = sub_score.saturating_add(self.weights.very_short_review);
        } else if length < self.floors.short {
            sub_score = sub_score.saturating_add(self.weights.short_review);
        }

        let no_alphabetic = !normalized.chars().any(|c| c.is_alphabetic());
        if self.punctuation_run.is_match(normalized) || no_alphabetic {
            sub_score = sub_score.saturating_add(self.weights.memey_punctuation);
        }
        sub_score
    }
}

/// Per-occurrence accumulation, clamped at `u32::MAX` so degenerate-long
/// input saturates instead of wrapping.
fn occurrence_total(occurrences: usize, per_term: u32) -> u32 {
    u32::try_from(occurrences)
        .unwrap_or(u32::MAX)
        .saturating_mul(per_term)
}

/// Leftmost, non-overlapping scan of one category's patterns.
///
/// At each position the earliest match among all patterns wins; ties on start
/// position resolve to the longest pattern so results stay deterministic
/// regardless of table order. Scanning resumes after the end of each match,
/// so a single span of text is never counted twice within the same category,
/// while a second, later occurrence still fires.
fn scan_category(text: &str, category: Category, patterns: &[String]) -> Vec<MatchEvent> {
    let mut events = Vec::new();
    let mut cursor = 0;

    // Next known match offset per pattern; None once a pattern is exhausted.
    // A cached offset stays valid until the cursor passes it, so each pattern
    // sweeps the text at most once and the whole scan stays
    // O(patterns x text length).
    let mut next_at: Vec<Option<usize>> = patterns
        .iter()
        .map(|pattern| {
            if pattern.is_empty() {
                None
            } else {
                text.find(pattern.as_str())
            }
        })
        .collect();

    loop {
        let mut best: Option<(usize, usize)> = None;
        for (index, pattern) in patterns.iter().enumerate() {
            let at = match next_at[index] {
                Some(at) if at >= cursor => Some(at),
                Some(_) => {
                    let refreshed = text[cursor..]
                        .find(pattern.as_str())
                        .map(|offset| cursor + offset);
                    next_at[index] = refreshed;
                    refreshed
                }
                None => None,
            };
            let Some(at) = at else { continue };
            best = match best {
                Some((best_at, best_index))
                    if best_at < at
                        || (best_at == at && patterns[best_index].len() >= pattern.len()) =>
                {
                    Some((best_at, best_index))
                }
                _ => Some((at, index)),
            };
        }

        match best {
            Some((at, index)) => {
                let pattern = &patterns[index];
                events.push(MatchEvent {
                    category,
                    pattern: pattern.clone(),
                    position: at,
                });
                cursor = at + pattern.len();
            }
            None => break,
        }
    }
    events
}
