//! Composite agent suitability scoring
//!
//! Each (ticket, agent) pair gets four components normalized to `0.0..=1.0`
//! and a weighted total:
//!
//! | Component  | Value                                               |
//! |------------|-----------------------------------------------------|
//! | skill      | proficiency / max proficiency, neutral without need |
//! | workload   | `1 - current / busiest` over the eligible set       |
//! | experience | `min(years / cap, 1)`                               |
//! | priority   | `min(urgency / ceiling, 1)`                         |

use serde::Serialize;

use crate::config::{PriorityModulation, ScoringConfig, ScoringWeights};
use crate::error::Result;
use crate::model::{Agent, Ticket};

/// Normalized score components and their weighted total
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Skill fit
    pub skill: f64,
    /// Load-balancing pressure, higher for less loaded agents
    pub workload: f64,
    /// Agent seniority
    pub experience: f64,
    /// Ticket urgency
    pub priority: f64,
    /// Weighted sum of the four components
    pub total: f64,
}

/// Scores one agent against one ticket
///
/// # Examples
///
/// ```
/// use helpdesk_assign_engine::config::{ScoringConfig, ScoringWeights};
/// use helpdesk_assign_engine::model::{Agent, Ticket};
/// use helpdesk_assign_engine::priority::{PriorityAssessment, UrgencyTier};
/// use helpdesk_assign_engine::routing::CompositeScorer;
///
/// let scorer = CompositeScorer::new(ScoringWeights::default(), ScoringConfig::default()).unwrap();
/// let ticket = Ticket::new("T-1", "VPN down", 0, PriorityAssessment::manual(UrgencyTier::Critical, 30.0))
///     .requiring_skill("Networking");
/// let agent = Agent::new("agent_001", "Sarah").with_skill("Networking", 10).with_experience(15);
///
/// let breakdown = scorer.score(&ticket, &agent, 0, 0);
/// assert!((breakdown.total - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct CompositeScorer {
    weights: ScoringWeights,
    scoring: ScoringConfig,
}

impl CompositeScorer {
    /// Create a scorer, validating weights and normalization constants
    pub fn new(weights: ScoringWeights, scoring: ScoringConfig) -> Result<Self> {
        weights.validate()?;
        scoring.validate()?;
        Ok(Self { weights, scoring })
    }

    /// Weights in use
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score `agent` for `ticket`
    ///
    /// `current_workload` is the agent's workload at this point of the run
    /// and `busiest_workload` the highest current workload in the eligible
    /// set.
    pub fn score(
        &self,
        ticket: &Ticket,
        agent: &Agent,
        current_workload: u32,
        busiest_workload: u32,
    ) -> ScoreBreakdown {
        let skill = match ticket.required_skill() {
            Some(required) => {
                f64::from(agent.proficiency(required).min(self.scoring.max_proficiency))
                    / f64::from(self.scoring.max_proficiency)
            }
            None => self.scoring.neutral_skill_score,
        };

        let workload = if busiest_workload == 0 {
            1.0
        } else {
            (1.0 - f64::from(current_workload) / f64::from(busiest_workload)).clamp(0.0, 1.0)
        };

        let experience =
            (f64::from(agent.experience_level) / self.scoring.experience_cap_years).min(1.0);

        let urgency = (ticket.urgency_score().max(0.0) / self.scoring.urgency_ceiling).min(1.0);
        let priority = match self.scoring.priority_modulation {
            PriorityModulation::TicketOnly => urgency,
            PriorityModulation::ExperienceWeighted => urgency * (0.5 + 0.5 * experience),
        };

        let total = skill * self.weights.skill
            + workload * self.weights.workload
            + experience * self.weights.experience
            + priority * self.weights.priority;

        ScoreBreakdown {
            skill,
            workload,
            experience,
            priority,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority::{PriorityAssessment, UrgencyTier};

    fn scorer() -> CompositeScorer {
        CompositeScorer::new(ScoringWeights::default(), ScoringConfig::default()).unwrap()
    }

    fn ticket(score: f64, skill: Option<&str>) -> Ticket {
        let ticket = Ticket::new("T-1", "text", 0, PriorityAssessment::manual(UrgencyTier::High, score));
        match skill {
            Some(skill) => ticket.requiring_skill(skill),
            None => ticket,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_components() {
        let agent = Agent::new("agent_001", "A")
            .with_skill("Networking", 8)
            .with_experience(6);
        let breakdown = scorer().score(&ticket(15.0, Some("Networking")), &agent, 1, 4);

        assert!(close(breakdown.skill, 0.8));
        assert!(close(breakdown.workload, 0.75));
        assert!(close(breakdown.experience, 0.4));
        assert!(close(breakdown.priority, 0.5));
        assert!(close(
            breakdown.total,
            0.8 * 0.40 + 0.75 * 0.25 + 0.4 * 0.20 + 0.5 * 0.15
        ));
    }

    #[test]
    fn test_missing_skill_scores_zero_and_no_requirement_is_neutral() {
        let agent = Agent::new("agent_001", "A").with_skill("Networking", 8);
        assert_eq!(scorer().score(&ticket(2.0, Some("Database_SQL")), &agent, 0, 0).skill, 0.0);
        assert_eq!(scorer().score(&ticket(2.0, None), &agent, 0, 0).skill, 0.5);
    }

    #[test]
    fn test_workload_component() {
        let agent = Agent::new("agent_001", "A");
        let scorer = scorer();
        assert_eq!(scorer.score(&ticket(2.0, None), &agent, 0, 0).workload, 1.0);
        assert_eq!(scorer.score(&ticket(2.0, None), &agent, 3, 3).workload, 0.0);
        assert!(
            scorer.score(&ticket(2.0, None), &agent, 1, 3).workload
                > scorer.score(&ticket(2.0, None), &agent, 2, 3).workload
        );
    }

    #[test]
    fn test_caps_at_one() {
        let agent = Agent::new("agent_001", "A").with_experience(40);
        let breakdown = scorer().score(&ticket(90.0, None), &agent, 0, 0);
        assert_eq!(breakdown.experience, 1.0);
        assert_eq!(breakdown.priority, 1.0);
    }

    #[test]
    fn test_priority_is_ticket_only_by_default() {
        let junior = Agent::new("agent_001", "A").with_experience(1);
        let senior = Agent::new("agent_002", "B").with_experience(15);
        let t = ticket(15.0, None);
        assert_eq!(
            scorer().score(&t, &junior, 0, 0).priority,
            scorer().score(&t, &senior, 0, 0).priority
        );
    }

    #[test]
    fn test_experience_weighted_priority() {
        let scoring = ScoringConfig {
            priority_modulation: PriorityModulation::ExperienceWeighted,
            ..ScoringConfig::default()
        };
        let scorer = CompositeScorer::new(ScoringWeights::default(), scoring).unwrap();
        let junior = Agent::new("agent_001", "A");
        let senior = Agent::new("agent_002", "B").with_experience(15);
        let t = ticket(30.0, None);
        assert_eq!(scorer.score(&t, &junior, 0, 0).priority, 0.5);
        assert_eq!(scorer.score(&t, &senior, 0, 0).priority, 1.0);
    }

    #[test]
    fn test_custom_weights_change_total() {
        let weights = ScoringWeights {
            skill: 1.0,
            workload: 0.0,
            experience: 0.0,
            priority: 0.0,
        };
        let scorer = CompositeScorer::new(weights, ScoringConfig::default()).unwrap();
        let agent = Agent::new("agent_001", "A").with_skill("Networking", 7).with_experience(10);
        let breakdown = scorer.score(&ticket(10.0, Some("Networking")), &agent, 2, 5);
        assert!(close(breakdown.total, 0.7));
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let weights = ScoringWeights {
            skill: 0.9,
            ..ScoringWeights::default()
        };
        assert!(CompositeScorer::new(weights, ScoringConfig::default()).is_err());
    }
}
