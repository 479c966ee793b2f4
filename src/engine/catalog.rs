// src/engine/catalog.rs - Static, versionable pattern tables per category

use serde::{Deserialize, Serialize};

use crate::types::{Category, MatchMode};

/// Immutable tables of phrases/keywords per category, injected into the
/// scorer at construction. Never a process-wide singleton: tests substitute
/// smaller catalogs, and multiple catalog versions can run side by side
/// during a staged rollout of new rules.
///
/// Pattern semantics: every pattern is a literal, matched case-insensitively
/// as a substring of the normalized (space-padded) text. A leading or
/// trailing space in a pattern approximates a word boundary on that side;
/// patterns without one are intentional substring matches (platform handle
/// abbreviations like `insta`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCatalog {
    pub version: String,
    pub solicitation: Vec<String>,
    pub shipping: Vec<String>,
    pub simp: Vec<String>,
    pub blasphemy: Vec<String>,
    /// Benign-context markers that discount the simp sub-score once.
    pub forgiveness_markers: Vec<String>,
}

impl PatternCatalog {
    /// Pattern table for a category. Low-quality has no keyword table; its
    /// signal is derived from text shape in the scorer.
    pub fn patterns(&self, category: Category) -> &[String] {
        match category {
            Category::Solicitation => &self.solicitation,
            Category::Shipping => &self.shipping,
            Category::Simp => &self.simp,
            Category::Blasphemy => &self.blasphemy,
            Category::LowQuality => &[],
        }
    }

    /// Combination rule for a keyword-matched category.
    pub fn mode(category: Category) -> Option<MatchMode> {
        match category {
            Category::Solicitation | Category::Shipping => Some(MatchMode::SingleTrigger),
            Category::Simp | Category::Blasphemy => Some(MatchMode::PerOccurrence),
            Category::LowQuality => None,
        }
    }

    /// Categories backed by a keyword table, in scan order.
    pub const KEYWORD_CATEGORIES: [Category; 4] = [
        Category::Solicitation,
        Category::Shipping,
        Category::Simp,
        Category::Blasphemy,
    ];
}

fn table(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|s| s.to_string()).collect()
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            // Rule 1: doxxing via social-media solicitation.
            solicitation: table(&[
                "instagram", "insta", "ig:", "twitter", "twt", "tw:", "x.com",
                "tiktok", "tt:", "snapchat", "snap:", "sc:", "facebook", "fb:",
                "discord", "dc:", "reddit", "rd:", "r/", "tumblr", "tb:",
                "onlyfans", "of:", "telegram", "tg:", "whatsapp", "wapp:",
                "add me", "dm me", "message me",
            ]),
            // Rule 2: queershipping.
            shipping: table(&[
                " x ", " ship ", "shipping", " otp ", "they're so",
                "they belong together", "would die for", "canon couple",
                "canon gay", "canon lesbian", " wlw ", " mlm ", "sapphic",
                "achillean", " yuri ", " yaoi ", "slash fic", "fanfic energy",
                "headcanon gay",
            ]),
            // Rule 3: simping (per occurrence, left-boundary sensitive).
            simp: table(&[
                " daddy", " mommy", " breed", " step on me", " peg me",
                " choke me", " rail me", " smash", " thirst", " hot", " sexy",
                " babe", " queen", " king", " zaddy", " dilf", " milf",
                " gilf", " twunk", " bussy", " cake", " gyat", " breedable",
            ]),
            // Rule 4: blasphemy (per occurrence, near-absolute reject).
            blasphemy: table(&[
                "jesus fuck", "christ fuck", "fucking christ", "god damn",
                "goddamn", "jesus fucking", "fuck the holy", "holy shit",
                "holy fuck", "jesus h christ", "christ on a bike",
                "for fuck's sake jesus", "holy mother of god", "fuck mother",
            ]),
            forgiveness_markers: table(&["ryan gosling"]),
        }
    }
}
