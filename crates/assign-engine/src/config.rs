use serde::{Deserialize, Serialize};

use crate::error::{AssignError, Result};
use crate::priority::tokenize;

/// Tolerance allowed when checking that scoring weights sum to 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Complete assignment engine configuration
///
/// Groups every tunable of the core so a run can be reproduced from one
/// value. All sections have defaults matching the production constants and
/// every section is `serde` (de)serializable, so the whole thing can be read
/// from a TOML or JSON file by a caller.
///
/// # Configuration Sections
///
/// - [`analyzer`]: urgency analysis tunables (baseline, negation, boosts)
/// - [`weights`]: composite score weights
/// - [`scoring`]: normalization constants for the score components
/// - [`eligibility`]: agent eligibility rules
///
/// # Examples
///
/// ## Default Configuration
///
/// ```
/// use helpdesk_assign_engine::config::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.weights.skill, 0.40);
/// assert!(config.eligibility.relax_skill_requirement);
/// assert!(config.validate().is_ok());
/// ```
///
/// ## Custom Configuration
///
/// ```
/// use helpdesk_assign_engine::config::{EngineConfig, ScoringWeights};
///
/// let mut config = EngineConfig::default();
/// config.weights = ScoringWeights {
///     skill: 0.55,
///     workload: 0.25,
///     experience: 0.10,
///     priority: 0.10,
/// };
/// config.eligibility.relax_skill_requirement = false;
///
/// config.validate().expect("Configuration should be valid");
/// ```
///
/// [`analyzer`]: EngineConfig::analyzer
/// [`weights`]: EngineConfig::weights
/// [`scoring`]: EngineConfig::scoring
/// [`eligibility`]: EngineConfig::eligibility
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Urgency analysis settings
    pub analyzer: AnalyzerSettings,

    /// Composite score weights
    pub weights: ScoringWeights,

    /// Score component normalization
    pub scoring: ScoringConfig,

    /// Agent eligibility rules
    pub eligibility: EligibilityConfig,
}

impl EngineConfig {
    /// Validate every section
    ///
    /// Returns the first problem found as a [`AssignError::Configuration`].
    pub fn validate(&self) -> Result<()> {
        self.analyzer.validate()?;
        self.weights.validate()?;
        self.scoring.validate()?;
        Ok(())
    }
}

/// Urgency analysis settings
///
/// These tune how keyword matches turn into a tier and a score. The keyword
/// table itself is passed separately to the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    /// Score given to text without any keyword match (tier MEDIUM)
    pub baseline_score: f64,

    /// Multiplier applied when two or more distinct keywords of the winning
    /// tier match without negation
    pub corroboration_multiplier: f64,

    /// Fraction of a keyword's weight kept when every occurrence is negated
    ///
    /// `0.0` ignores negated keywords, `1.0` ignores negation.
    pub negation_factor: f64,

    /// Words or phrases that negate an immediately following keyword
    pub negation_markers: Vec<String>,

    /// Any non-negated CRITICAL match classifies the ticket CRITICAL even if
    /// another tier accumulated more weight
    pub escalate_on_critical: bool,

    /// Scale the score by the strongest matched impact phrase
    pub apply_impact_multipliers: bool,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            baseline_score: 2.0,
            corroboration_multiplier: 1.25,
            negation_factor: 0.25,
            negation_markers: vec!["not".to_string(), "no longer".to_string()],
            escalate_on_critical: true,
            apply_impact_multipliers: true,
        }
    }
}

impl AnalyzerSettings {
    /// Validate analyzer settings
    pub fn validate(&self) -> Result<()> {
        if !self.baseline_score.is_finite() || self.baseline_score < 0.0 {
            return Err(AssignError::configuration(format!(
                "baseline_score must be a non-negative number, got {}",
                self.baseline_score
            )));
        }
        if !self.corroboration_multiplier.is_finite() || self.corroboration_multiplier < 1.0 {
            return Err(AssignError::configuration(format!(
                "corroboration_multiplier must be at least 1.0, got {}",
                self.corroboration_multiplier
            )));
        }
        if !(0.0..=1.0).contains(&self.negation_factor) {
            return Err(AssignError::configuration(format!(
                "negation_factor must be within 0.0..=1.0, got {}",
                self.negation_factor
            )));
        }
        if let Some(marker) = self
            .negation_markers
            .iter()
            .find(|marker| tokenize(marker).is_empty())
        {
            return Err(AssignError::configuration(format!(
                "negation marker '{}' contains no words",
                marker
            )));
        }
        Ok(())
    }
}

/// Weights of the four composite score components
///
/// The named production constants are skill 0.40, workload 0.25,
/// experience 0.20 and priority 0.15. Weights must be finite, non-negative
/// and sum to 1.0 within [`WEIGHT_SUM_TOLERANCE`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Skill proficiency weight
    pub skill: f64,
    /// Load-balancing weight
    pub workload: f64,
    /// Agent experience weight
    pub experience: f64,
    /// Ticket urgency weight
    pub priority: f64,
}

impl ScoringWeights {
    /// Production skill weight
    pub const SKILL: f64 = 0.40;
    /// Production workload weight
    pub const WORKLOAD: f64 = 0.25;
    /// Production experience weight
    pub const EXPERIENCE: f64 = 0.20;
    /// Production priority weight
    pub const PRIORITY: f64 = 0.15;

    /// Sum of all four weights
    pub fn sum(&self) -> f64 {
        self.skill + self.workload + self.experience + self.priority
    }

    /// Validate the weight set
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("skill", self.skill),
            ("workload", self.workload),
            ("experience", self.experience),
            ("priority", self.priority),
        ];
        for (name, weight) in named {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AssignError::configuration(format!(
                    "{} weight must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(AssignError::configuration(format!(
                "scoring weights must sum to 1.0, got {:.3}",
                sum
            )));
        }
        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: Self::SKILL,
            workload: Self::WORKLOAD,
            experience: Self::EXPERIENCE,
            priority: Self::PRIORITY,
        }
    }
}

/// How the priority component is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityModulation {
    /// Normalized ticket urgency only; identical for every agent
    TicketOnly,
    /// Normalized urgency scaled by `0.5 + 0.5 × experience component`, so
    /// senior agents gain more from urgent tickets
    ExperienceWeighted,
}

/// Normalization constants for the composite score components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Highest skill proficiency an agent record may carry
    pub max_proficiency: u8,

    /// Skill component used when the ticket has no skill requirement
    pub neutral_skill_score: f64,

    /// Years of experience at which the experience component saturates
    pub experience_cap_years: f64,

    /// Urgency score at which the priority component saturates
    pub urgency_ceiling: f64,

    /// Priority component derivation
    pub priority_modulation: PriorityModulation,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_proficiency: 10,
            neutral_skill_score: 0.5,
            experience_cap_years: 15.0,
            urgency_ceiling: 30.0,
            priority_modulation: PriorityModulation::TicketOnly,
        }
    }
}

impl ScoringConfig {
    /// Validate normalization constants
    pub fn validate(&self) -> Result<()> {
        if self.max_proficiency == 0 {
            return Err(AssignError::configuration("max_proficiency must be greater than 0"));
        }
        if !(0.0..=1.0).contains(&self.neutral_skill_score) {
            return Err(AssignError::configuration(format!(
                "neutral_skill_score must be within 0.0..=1.0, got {}",
                self.neutral_skill_score
            )));
        }
        if !self.experience_cap_years.is_finite() || self.experience_cap_years <= 0.0 {
            return Err(AssignError::configuration(format!(
                "experience_cap_years must be positive, got {}",
                self.experience_cap_years
            )));
        }
        if !self.urgency_ceiling.is_finite() || self.urgency_ceiling <= 0.0 {
            return Err(AssignError::configuration(format!(
                "urgency_ceiling must be positive, got {}",
                self.urgency_ceiling
            )));
        }
        Ok(())
    }
}

/// Agent eligibility rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityConfig {
    /// When no available agent has the ticket's required skill, fall back to
    /// every available agent instead of leaving the ticket unassigned
    pub relax_skill_requirement: bool,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            relax_skill_requirement: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.weights.sum() - 1.0).abs() < 1e-9);
        assert_eq!(config.scoring.priority_modulation, PriorityModulation::TicketOnly);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let weights = ScoringWeights {
            skill: 0.40,
            workload: 0.25,
            experience: 0.20,
            priority: 0.05,
        };
        match weights.validate() {
            Err(AssignError::Configuration(msg)) => assert!(msg.contains("0.900")),
            other => panic!("expected configuration error, got {:?}", other),
        }

        let within_tolerance = ScoringWeights {
            priority: 0.155,
            ..ScoringWeights::default()
        };
        assert!(within_tolerance.validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = ScoringWeights {
            skill: 0.70,
            workload: -0.05,
            experience: 0.20,
            priority: 0.15,
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_analyzer_settings_ranges() {
        let mut settings = AnalyzerSettings::default();
        settings.negation_factor = 1.5;
        assert!(settings.validate().is_err());

        let mut settings = AnalyzerSettings::default();
        settings.corroboration_multiplier = 0.9;
        assert!(settings.validate().is_err());

        let mut settings = AnalyzerSettings::default();
        settings.negation_markers.push("  ".to_string());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_punctuation_only_negation_marker_rejected() {
        for marker in ["--", "!!", " ... "] {
            let mut settings = AnalyzerSettings::default();
            settings.negation_markers.push(marker.to_string());
            match settings.validate() {
                Err(AssignError::Configuration(msg)) => assert!(msg.contains("contains no words")),
                other => panic!("expected configuration error for {:?}, got {:?}", marker, other),
            }
        }

        let mut settings = AnalyzerSettings::default();
        settings.negation_markers.push("never".to_string());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_scoring_config_ranges() {
        let mut scoring = ScoringConfig::default();
        scoring.urgency_ceiling = 0.0;
        assert!(scoring.validate().is_err());

        let mut scoring = ScoringConfig::default();
        scoring.max_proficiency = 0;
        assert!(scoring.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            [eligibility]
            relax_skill_requirement = false

            [scoring]
            priority_modulation = "experience_weighted"
            "#,
        )
        .unwrap();

        assert!(!config.eligibility.relax_skill_requirement);
        assert_eq!(config.scoring.priority_modulation, PriorityModulation::ExperienceWeighted);
        assert_eq!(config.scoring.urgency_ceiling, 30.0);
        assert_eq!(config.weights, ScoringWeights::default());
    }
}
