//! Agent eligibility for a single ticket
//!
//! An agent is eligible when it is available and, if the ticket carries a
//! skill requirement, holds that skill at a proficiency above zero. When no
//! available agent holds the skill the filter either relaxes to availability
//! only or returns an empty set, depending on
//! [`EligibilityConfig::relax_skill_requirement`].

use serde::Serialize;
use tracing::debug;

use crate::config::EligibilityConfig;
use crate::model::{Agent, AgentId, Ticket};

/// How an eligible set was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityMode {
    /// Ticket has no skill requirement; every available agent qualifies
    Unrestricted,
    /// Only available agents holding the required skill qualify
    SkillMatched,
    /// Nobody holds the required skill; fell back to every available agent
    Relaxed,
    /// Nobody holds the required skill and relaxation is disabled
    Strict,
}

impl EligibilityMode {
    /// Whether the skill requirement was dropped to find candidates
    pub fn is_relaxed(self) -> bool {
        matches!(self, EligibilityMode::Relaxed)
    }
}

/// Eligible agents for one ticket, in ascending id order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibleSet {
    /// Eligible agent ids, ascending
    pub agent_ids: Vec<AgentId>,
    /// How the set was derived
    pub mode: EligibilityMode,
}

impl EligibleSet {
    /// True when no agent can take the ticket
    pub fn is_empty(&self) -> bool {
        self.agent_ids.is_empty()
    }

    /// Number of eligible agents
    pub fn len(&self) -> usize {
        self.agent_ids.len()
    }
}

/// Narrows an agent roster to the agents that may take a ticket
///
/// # Examples
///
/// ```
/// use helpdesk_assign_engine::config::EligibilityConfig;
/// use helpdesk_assign_engine::model::{Agent, Ticket};
/// use helpdesk_assign_engine::priority::{PriorityAssessment, UrgencyTier};
/// use helpdesk_assign_engine::routing::{EligibilityFilter, EligibilityMode};
///
/// let agents = vec![
///     Agent::new("agent_002", "Tom").with_skill("Networking", 6),
///     Agent::new("agent_001", "Ana").with_skill("Database_SQL", 8),
/// ];
/// let ticket = Ticket::new("T-1", "VPN drops", 0, PriorityAssessment::manual(UrgencyTier::High, 6.0))
///     .requiring_skill("Networking");
///
/// let filter = EligibilityFilter::new(&EligibilityConfig::default());
/// let set = filter.eligible(&ticket, &agents);
/// assert_eq!(set.mode, EligibilityMode::SkillMatched);
/// assert_eq!(set.agent_ids.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct EligibilityFilter {
    relax_skill_requirement: bool,
}

impl EligibilityFilter {
    /// Create a filter from eligibility configuration
    pub fn new(config: &EligibilityConfig) -> Self {
        Self {
            relax_skill_requirement: config.relax_skill_requirement,
        }
    }

    /// Whether the filter falls back to availability-only eligibility
    pub fn relaxes(&self) -> bool {
        self.relax_skill_requirement
    }

    /// Eligible agents for `ticket`
    pub fn eligible(&self, ticket: &Ticket, agents: &[Agent]) -> EligibleSet {
        let indices = self.eligible_indices(ticket, agents);
        let mut agent_ids: Vec<AgentId> = indices.0.iter().map(|i| agents[*i].id.clone()).collect();
        agent_ids.sort();
        EligibleSet {
            agent_ids,
            mode: indices.1,
        }
    }

    /// Positions of eligible agents in `agents`, in roster order
    pub(crate) fn eligible_indices(
        &self,
        ticket: &Ticket,
        agents: &[Agent],
    ) -> (Vec<usize>, EligibilityMode) {
        let available: Vec<usize> = agents
            .iter()
            .enumerate()
            .filter(|(_, agent)| agent.is_available())
            .map(|(index, _)| index)
            .collect();

        let Some(skill) = ticket.required_skill() else {
            return (available, EligibilityMode::Unrestricted);
        };

        let skilled: Vec<usize> = available
            .iter()
            .copied()
            .filter(|index| agents[*index].has_skill(skill))
            .collect();

        if !skilled.is_empty() {
            return (skilled, EligibilityMode::SkillMatched);
        }

        if self.relax_skill_requirement {
            debug!(
                "No available agent has skill '{}' for ticket {}; relaxing to availability only",
                skill,
                ticket.id()
            );
            (available, EligibilityMode::Relaxed)
        } else {
            (Vec::new(), EligibilityMode::Strict)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AvailabilityStatus;
    use crate::priority::{PriorityAssessment, UrgencyTier};

    fn ticket(skill: Option<&str>) -> Ticket {
        let ticket = Ticket::new("T-1", "text", 0, PriorityAssessment::manual(UrgencyTier::Medium, 2.0));
        match skill {
            Some(skill) => ticket.requiring_skill(skill),
            None => ticket,
        }
    }

    fn roster() -> Vec<Agent> {
        vec![
            Agent::new("agent_003", "C").with_skill("Networking", 5),
            Agent::new("agent_001", "A").with_skill("Networking", 0),
            Agent::new("agent_002", "B")
                .with_skill("Networking", 9)
                .with_status(AvailabilityStatus::Busy),
            Agent::new("agent_004", "D").with_skill("Database_SQL", 7),
        ]
    }

    fn ids(set: &EligibleSet) -> Vec<&str> {
        set.agent_ids.iter().map(|id| id.as_ref()).collect()
    }

    #[test]
    fn test_unrestricted_returns_available_sorted() {
        let filter = EligibilityFilter::new(&EligibilityConfig::default());
        let set = filter.eligible(&ticket(None), &roster());
        assert_eq!(set.mode, EligibilityMode::Unrestricted);
        assert_eq!(ids(&set), vec!["agent_001", "agent_003", "agent_004"]);
    }

    #[test]
    fn test_skill_match_requires_positive_proficiency() {
        let filter = EligibilityFilter::new(&EligibilityConfig::default());
        let set = filter.eligible(&ticket(Some("Networking")), &roster());
        assert_eq!(set.mode, EligibilityMode::SkillMatched);
        // agent_002 is busy, agent_001 has proficiency 0
        assert_eq!(ids(&set), vec!["agent_003"]);
    }

    #[test]
    fn test_relaxes_when_nobody_has_skill() {
        let filter = EligibilityFilter::new(&EligibilityConfig::default());
        let set = filter.eligible(&ticket(Some("Printer_Support")), &roster());
        assert_eq!(set.mode, EligibilityMode::Relaxed);
        assert!(set.mode.is_relaxed());
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_strict_mode_leaves_set_empty() {
        let filter = EligibilityFilter::new(&EligibilityConfig {
            relax_skill_requirement: false,
        });
        assert!(!filter.relaxes());
        let set = filter.eligible(&ticket(Some("Printer_Support")), &roster());
        assert_eq!(set.mode, EligibilityMode::Strict);
        assert!(set.is_empty());
    }

    #[test]
    fn test_no_available_agents() {
        let filter = EligibilityFilter::new(&EligibilityConfig::default());
        let agents = vec![Agent::new("agent_001", "A").with_status(AvailabilityStatus::Offline)];
        let set = filter.eligible(&ticket(Some("Networking")), &agents);
        assert!(set.is_empty());
        assert!(filter.eligible(&ticket(None), &[]).is_empty());
    }
}
