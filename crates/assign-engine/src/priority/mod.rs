//! # Ticket Urgency Analysis
//!
//! This module turns free ticket text into an urgency tier and a numeric
//! urgency score. The analysis is rule driven: four ordered keyword tiers,
//! each keyword carrying a base weight, plus an optional set of impact
//! phrases that scale the score for broad or business-critical problems.
//!
//! ## Scoring Pipeline
//!
//! ```text
//! ticket text
//!     │  lowercase + split on non-alphanumerics
//!     ▼
//! tokens ──► keyword matches per tier (negation-aware)
//!     │
//!     ▼
//! tier totals ──► winning tier (severity breaks ties)
//!     │
//!     ▼
//! score = winning total × corroboration × impact
//! ```
//!
//! Text without any keyword match is classified `MEDIUM` with the configured
//! baseline score.
//!
//! ## Quick Start
//!
//! ```rust
//! use helpdesk_assign_engine::priority::{PriorityAnalyzer, UrgencyTier};
//!
//! let analyzer = PriorityAnalyzer::standard();
//! let assessment = analyzer.analyze("Production server completely down - all users affected");
//!
//! assert_eq!(assessment.tier, UrgencyTier::Critical);
//! println!("{}", assessment.rationale);
//! ```
//!
//! ## Modules
//!
//! - [`keywords`]: keyword and impact phrase tables
//! - [`analyzer`]: the analyzer itself

pub mod analyzer;
pub mod keywords;

pub use analyzer::{KeywordHit, PriorityAnalyzer, PriorityAssessment, TierDistribution};
pub use keywords::{ImpactPhrase, Keyword, KeywordTable};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency tier of a ticket
///
/// Declaration order is severity order, most severe first, so a sorted
/// collection of tiers lists `Critical` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UrgencyTier {
    /// Outages, security incidents, data loss
    Critical,
    /// Broken functionality blocking work
    High,
    /// Routine requests and questions
    Medium,
    /// Enhancements and general feedback
    Low,
}

impl UrgencyTier {
    /// All tiers, most severe first
    pub const ALL: [UrgencyTier; 4] = [
        UrgencyTier::Critical,
        UrgencyTier::High,
        UrgencyTier::Medium,
        UrgencyTier::Low,
    ];

    /// Numeric severity, higher is more severe
    pub fn severity(self) -> u8 {
        match self {
            UrgencyTier::Critical => 4,
            UrgencyTier::High => 3,
            UrgencyTier::Medium => 2,
            UrgencyTier::Low => 1,
        }
    }

    /// Upper-case label used in reports
    pub fn as_str(self) -> &'static str {
        match self {
            UrgencyTier::Critical => "CRITICAL",
            UrgencyTier::High => "HIGH",
            UrgencyTier::Medium => "MEDIUM",
            UrgencyTier::Low => "LOW",
        }
    }
}

impl std::str::FromStr for UrgencyTier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(UrgencyTier::Critical),
            "high" => Ok(UrgencyTier::High),
            "medium" => Ok(UrgencyTier::Medium),
            "low" => Ok(UrgencyTier::Low),
            _ => Err(format!("Unknown urgency tier: {}", s)),
        }
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split text into lowercase alphanumeric tokens
///
/// Everything that is not a letter or digit separates tokens, which gives
/// whole-word matching for both single keywords and multi-word phrases.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
        .collect()
}

/// Positions at which `phrase` occurs as a whole-token run inside `tokens`
pub(crate) fn phrase_positions(tokens: &[String], phrase: &[String]) -> Vec<usize> {
    if phrase.is_empty() || phrase.len() > tokens.len() {
        return Vec::new();
    }
    tokens
        .windows(phrase.len())
        .enumerate()
        .filter(|(_, window)| *window == phrase)
        .map(|(start, _)| start)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_severity_order() {
        let mut tiers = vec![UrgencyTier::Low, UrgencyTier::Critical, UrgencyTier::Medium, UrgencyTier::High];
        tiers.sort();
        assert_eq!(tiers, UrgencyTier::ALL.to_vec());
        assert!(UrgencyTier::Critical.severity() > UrgencyTier::High.severity());
    }

    #[test]
    fn test_tier_parse_and_display() {
        assert_eq!("critical".parse::<UrgencyTier>().unwrap(), UrgencyTier::Critical);
        assert_eq!(" Low ".parse::<UrgencyTier>().unwrap(), UrgencyTier::Low);
        assert!("urgent".parse::<UrgencyTier>().is_err());
        assert_eq!(UrgencyTier::High.to_string(), "HIGH");
    }

    #[test]
    fn test_tokenize_splits_punctuation() {
        assert_eq!(
            tokenize("Server DOWN - can't login!"),
            vec!["server", "down", "can", "t", "login"]
        );
        assert!(tokenize("  --  ").is_empty());
    }

    #[test]
    fn test_phrase_positions_whole_tokens() {
        let tokens = tokenize("the network is down, network down again");
        let phrase = tokenize("network down");
        assert_eq!(phrase_positions(&tokens, &phrase), vec![4]);

        // "down" must not match inside "download"
        let tokens = tokenize("download failed");
        assert!(phrase_positions(&tokens, &tokenize("down")).is_empty());
    }
}
