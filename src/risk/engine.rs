//! Keyword heuristics over a reported message; produces a clamped score and the rules that fired.

use crate::config::RiskConfig;
use crate::validation::is_valid_email;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const URGENCY_WORDS: [&str; 6] = [
    "urgent",
    "immediately",
    "act now",
    "confirm",
    "verify",
    "update",
];

pub const SUSPICIOUS_PATTERNS: [&str; 5] = [
    "click here",
    "verify account",
    "confirm identity",
    "payment required",
    "limited time",
];

const URGENCY_POINTS: u32 = 10;
const PATTERN_POINTS: u32 = 15;
const INVALID_EMAIL_POINTS: u32 = 20;

fn pattern_regexes() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        SUSPICIOUS_PATTERNS
            .iter()
            .map(|p| Regex::new(&format!("(?i){}", regex::escape(p))).expect("pattern is valid"))
            .collect()
    })
}

/// Result of assessing one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u32,
    pub factors: Vec<String>,
    pub is_likely_suspicious: bool,
}

pub struct RiskAssessor {
    config: RiskConfig,
}

impl Default for RiskAssessor {
    fn default() -> Self {
        Self::new(RiskConfig::default())
    }
}

impl RiskAssessor {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn assess(&self, email: &str, message: &str) -> RiskAssessment {
        let text = message.to_lowercase();
        let mut raw = 0u32;
        let mut factors = Vec::new();

        for word in URGENCY_WORDS {
            if text.contains(word) {
                raw += URGENCY_POINTS;
                factors.push(format!("Contains urgency word: \"{word}\""));
            }
        }

        for pattern in pattern_regexes() {
            if pattern.is_match(&text) {
                raw += PATTERN_POINTS;
                factors.push("Suspicious pattern detected".to_string());
            }
        }

        if !is_valid_email(email) {
            raw += INVALID_EMAIL_POINTS;
            factors.push("Invalid email format".to_string());
        }

        let score = raw.min(self.config.max_score);
        RiskAssessment {
            score,
            factors,
            is_likely_suspicious: score > self.config.suspicious_threshold,
        }
    }
}
