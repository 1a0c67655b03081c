//! Keyword and impact phrase tables for urgency analysis
//!
//! A [`KeywordTable`] is plain immutable configuration: it is handed to a
//! [`PriorityAnalyzer`](super::PriorityAnalyzer) at construction and never
//! changes afterwards. [`KeywordTable::standard`] is the table used in
//! production; tests build smaller tables with the builder methods.

use serde::{Deserialize, Serialize};

use super::{tokenize, UrgencyTier};
use crate::error::{AssignError, Result};

/// Urgency keyword (single word or phrase) with its base weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    /// Keyword text, matched case-insensitively on whole words
    pub phrase: String,
    /// Base weight added to the tier total on a match
    pub weight: f64,
}

/// Scope or business-impact phrase scaling the final urgency score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactPhrase {
    /// Phrase text, matched like a keyword
    pub phrase: String,
    /// Multiplier applied to the score, at least 1.0
    pub multiplier: f64,
}

/// Ordered keyword sets for the four urgency tiers
///
/// # Examples
///
/// ```
/// use helpdesk_assign_engine::priority::{KeywordTable, UrgencyTier};
///
/// let table = KeywordTable::empty()
///     .with_keyword(UrgencyTier::Critical, "outage", 10.0)
///     .with_keyword(UrgencyTier::High, "broken", 6.0)
///     .with_keyword(UrgencyTier::Medium, "question", 2.0)
///     .with_keyword(UrgencyTier::Low, "suggestion", 1.0);
///
/// assert!(table.validate().is_ok());
/// assert_eq!(table.tier(UrgencyTier::High).len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeywordTable {
    /// Keywords indicating a CRITICAL ticket
    pub critical: Vec<Keyword>,
    /// Keywords indicating a HIGH ticket
    pub high: Vec<Keyword>,
    /// Keywords indicating a MEDIUM ticket
    pub medium: Vec<Keyword>,
    /// Keywords indicating a LOW ticket
    pub low: Vec<Keyword>,
    /// Impact phrases, may be empty
    #[serde(default)]
    pub impact: Vec<ImpactPhrase>,
}

impl KeywordTable {
    /// Table with no keywords at all; fails validation until filled
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a keyword to a tier
    pub fn with_keyword(mut self, tier: UrgencyTier, phrase: &str, weight: f64) -> Self {
        self.tier_mut(tier).push(Keyword {
            phrase: phrase.to_string(),
            weight,
        });
        self
    }

    /// Add an impact phrase
    pub fn with_impact(mut self, phrase: &str, multiplier: f64) -> Self {
        self.impact.push(ImpactPhrase {
            phrase: phrase.to_string(),
            multiplier,
        });
        self
    }

    /// Keywords of one tier, in table order
    pub fn tier(&self, tier: UrgencyTier) -> &[Keyword] {
        match tier {
            UrgencyTier::Critical => &self.critical,
            UrgencyTier::High => &self.high,
            UrgencyTier::Medium => &self.medium,
            UrgencyTier::Low => &self.low,
        }
    }

    fn tier_mut(&mut self, tier: UrgencyTier) -> &mut Vec<Keyword> {
        match tier {
            UrgencyTier::Critical => &mut self.critical,
            UrgencyTier::High => &mut self.high,
            UrgencyTier::Medium => &mut self.medium,
            UrgencyTier::Low => &mut self.low,
        }
    }

    /// Total number of tier keywords
    pub fn keyword_count(&self) -> usize {
        UrgencyTier::ALL.iter().map(|tier| self.tier(*tier).len()).sum()
    }

    /// Check the table is usable
    ///
    /// Every tier needs at least one keyword, every keyword a positive finite
    /// weight and at least one word, every impact multiplier a finite value
    /// of at least 1.0.
    pub fn validate(&self) -> Result<()> {
        for tier in UrgencyTier::ALL {
            let keywords = self.tier(tier);
            if keywords.is_empty() {
                return Err(AssignError::configuration(format!(
                    "keyword tier {} is empty",
                    tier
                )));
            }
            for keyword in keywords {
                if tokenize(&keyword.phrase).is_empty() {
                    return Err(AssignError::configuration(format!(
                        "keyword '{}' in tier {} contains no words",
                        keyword.phrase, tier
                    )));
                }
                if !keyword.weight.is_finite() || keyword.weight <= 0.0 {
                    return Err(AssignError::configuration(format!(
                        "keyword '{}' in tier {} has invalid weight {}",
                        keyword.phrase, tier, keyword.weight
                    )));
                }
            }
        }

        for impact in &self.impact {
            if tokenize(&impact.phrase).is_empty() {
                return Err(AssignError::configuration(format!(
                    "impact phrase '{}' contains no words",
                    impact.phrase
                )));
            }
            if !impact.multiplier.is_finite() || impact.multiplier < 1.0 {
                return Err(AssignError::configuration(format!(
                    "impact phrase '{}' has invalid multiplier {}",
                    impact.phrase, impact.multiplier
                )));
            }
        }

        Ok(())
    }

    /// Production keyword table
    ///
    /// Weights run from 10.0 (outages, breaches) down to 0.5 (cosmetic
    /// requests). Impact multipliers cover scope (`all users`, `company`),
    /// business impact (`revenue`, `production`, `compliance`), time pressure
    /// (`right now`, `deadline`) and recurrence (`repeatedly`, `constantly`).
    pub fn standard() -> Self {
        let mut table = Self::empty();

        for (phrase, weight) in [
            // outages
            ("down", 10.0),
            ("outage", 10.0),
            ("crashed", 9.0),
            ("unreachable", 8.0),
            ("offline", 8.0),
            ("not responding", 8.0),
            ("completely broken", 9.0),
            ("total failure", 10.0),
            ("system failure", 9.0),
            ("service unavailable", 9.0),
            ("cannot access", 7.0),
            ("all users affected", 8.0),
            ("widespread", 7.0),
            ("business critical", 9.0),
            ("production down", 10.0),
            ("emergency", 10.0),
            ("urgent", 8.0),
            ("immediately", 8.0),
            ("critical", 9.0),
            ("severe", 8.0),
            ("catastrophic", 10.0),
            // security
            ("security breach", 10.0),
            ("hacked", 10.0),
            ("malware", 9.0),
            ("virus", 8.0),
            ("data breach", 10.0),
            ("unauthorized access", 9.0),
            ("compromised", 9.0),
            // infrastructure
            ("server down", 9.0),
            ("network down", 9.0),
            ("database down", 10.0),
            ("backup failed", 8.0),
            ("corruption", 8.0),
            ("data loss", 9.0),
        ] {
            table = table.with_keyword(UrgencyTier::Critical, phrase, weight);
        }

        for (phrase, weight) in [
            ("broken", 6.0),
            ("failing", 6.0),
            ("error", 5.0),
            ("problems", 4.0),
            ("issues", 4.0),
            ("not working", 6.0),
            ("malfunctioning", 6.0),
            ("stuck", 5.0),
            ("frozen", 6.0),
            ("slow", 4.0),
            ("performance", 4.0),
            ("timeout", 5.0),
            ("intermittent", 5.0),
            ("frequent", 5.0),
            ("multiple users", 5.0),
            ("department affected", 6.0),
            ("productivity impact", 6.0),
            ("blocking", 6.0),
            ("prevents work", 6.0),
            ("deadline", 7.0),
            ("presentation", 6.0),
            ("meeting", 5.0),
            ("client", 6.0),
            ("customer", 6.0),
            ("important", 5.0),
            ("asap", 6.0),
            ("soon", 4.0),
            ("today", 5.0),
            ("tomorrow", 6.0),
            // access
            ("cannot login", 6.0),
            ("access denied", 6.0),
            ("locked out", 6.0),
            ("authentication", 5.0),
            ("permissions", 4.0),
            // hardware
            ("hardware failure", 7.0),
            ("hardware", 4.0),
            ("device", 3.0),
            ("laptop", 3.0),
            ("printer", 3.0),
        ] {
            table = table.with_keyword(UrgencyTier::High, phrase, weight);
        }

        for (phrase, weight) in [
            ("help", 2.0),
            ("assistance", 2.0),
            ("support", 2.0),
            ("question", 2.0),
            ("how to", 2.0),
            ("configure", 2.0),
            ("setup", 2.0),
            ("install", 2.0),
            ("update", 2.0),
            ("upgrade", 2.0),
            ("request", 2.0),
            ("need", 2.0),
            ("would like", 2.0),
            ("minor", 1.0),
            ("small", 1.0),
            ("quick", 2.0),
            ("whenever convenient", 1.0),
            ("next week", 1.0),
            ("training", 2.0),
            ("documentation", 2.0),
            ("clarification", 2.0),
            ("guidance", 2.0),
            ("maintenance", 2.0),
            ("routine", 1.0),
            ("scheduled", 1.0),
            ("planned", 1.0),
        ] {
            table = table.with_keyword(UrgencyTier::Medium, phrase, weight);
        }

        for (phrase, weight) in [
            ("enhancement", 1.0),
            ("feature request", 1.0),
            ("improvement", 1.0),
            ("suggestion", 1.0),
            ("optimization", 1.0),
            ("nice to have", 0.5),
            ("when possible", 0.5),
            ("future", 0.5),
            ("eventually", 0.5),
            ("cosmetic", 0.5),
            ("aesthetic", 0.5),
            ("convenience", 1.0),
            ("preference", 0.5),
            ("general", 1.0),
            ("information", 1.0),
            ("inquiry", 1.0),
            ("feedback", 1.0),
        ] {
            table = table.with_keyword(UrgencyTier::Low, phrase, weight);
        }

        for (phrase, multiplier) in [
            // scope
            ("all users", 2.0),
            ("entire", 2.0),
            ("whole", 2.0),
            ("company", 2.0),
            ("organization", 2.0),
            ("everyone", 2.0),
            ("multiple departments", 1.8),
            ("department", 1.5),
            ("team", 1.3),
            ("group", 1.3),
            ("several users", 1.4),
            ("many users", 1.4),
            // business impact
            ("revenue", 2.5),
            ("business", 2.0),
            ("production", 2.5),
            ("customer", 2.0),
            ("client", 2.0),
            ("public", 2.0),
            ("external", 1.8),
            ("reputation", 2.0),
            ("brand", 2.0),
            ("compliance", 2.2),
            ("audit", 2.0),
            ("legal", 2.2),
            ("regulatory", 2.2),
            // time pressure
            ("now", 1.8),
            ("immediately", 2.0),
            ("asap", 1.8),
            ("urgent", 1.8),
            ("today", 1.5),
            ("this morning", 1.6),
            ("right now", 2.0),
            ("before", 1.5),
            ("deadline", 1.8),
            ("meeting", 1.4),
            ("presentation", 1.6),
            ("demo", 1.5),
            // recurrence
            ("again", 1.3),
            ("repeatedly", 1.5),
            ("frequently", 1.4),
            ("constantly", 1.6),
            ("always", 1.4),
            ("continuous", 1.5),
            ("ongoing", 1.4),
            ("persistent", 1.4),
        ] {
            table = table.with_impact(phrase, multiplier);
        }

        table
    }
}
