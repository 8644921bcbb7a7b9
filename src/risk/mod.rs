//! Scam risk scoring for reported messages.

mod engine;

pub use engine::{RiskAssessment, RiskAssessor, SUSPICIOUS_PATTERNS, URGENCY_WORDS};

/// Assess with the default threshold and cap.
pub fn assess_scam_risk(email: &str, message: &str) -> RiskAssessment {
    RiskAssessor::default().assess(email, message)
}
