//! Assignment decisions and their rationales

use serde::Serialize;

use crate::model::{Agent, AgentId, Ticket, TicketId};
use crate::priority::UrgencyTier;
use crate::routing::{EligibilityMode, ScoreBreakdown};

/// Final state of a ticket after its decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DecisionOutcome {
    /// An agent was selected
    Assigned,
    /// No eligible agent existed at decision time
    Unassigned,
}

/// One entry of the engine's output sequence
///
/// Exactly one decision exists per ticket. Decisions are immutable once the
/// engine returns them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentDecision {
    /// 1-based position in decision order
    pub rank: usize,
    /// Decided ticket
    pub ticket_id: TicketId,
    /// Selected agent, absent when unassigned
    pub agent_id: Option<AgentId>,
    /// Assigned or unassigned
    pub outcome: DecisionOutcome,
    /// Ticket urgency tier
    pub tier: UrgencyTier,
    /// Ticket urgency score
    pub urgency_score: f64,
    /// Skill the ticket required, if any
    pub required_skill: Option<String>,
    /// How the eligible set was derived
    pub eligibility: EligibilityMode,
    /// Number of eligible agents that were scored
    pub candidates: usize,
    /// Score components of the selected agent
    pub breakdown: Option<ScoreBreakdown>,
    /// Selected agent's workload when the decision was made, before the
    /// increment
    pub workload_at_decision: Option<u32>,
    /// Human-readable explanation
    pub rationale: String,
}

impl AssignmentDecision {
    pub(crate) fn assigned(
        rank: usize,
        ticket: &Ticket,
        agent: &Agent,
        eligibility: EligibilityMode,
        candidates: usize,
        breakdown: ScoreBreakdown,
        workload: u32,
    ) -> Self {
        Self {
            rank,
            ticket_id: ticket.id().clone(),
            agent_id: Some(agent.id.clone()),
            outcome: DecisionOutcome::Assigned,
            tier: ticket.tier(),
            urgency_score: ticket.urgency_score(),
            required_skill: ticket.required_skill().map(str::to_string),
            eligibility,
            candidates,
            breakdown: Some(breakdown),
            workload_at_decision: Some(workload),
            rationale: assigned_rationale(ticket, agent, eligibility, &breakdown, workload),
        }
    }

    pub(crate) fn unassigned(rank: usize, ticket: &Ticket, eligibility: EligibilityMode) -> Self {
        Self {
            rank,
            ticket_id: ticket.id().clone(),
            agent_id: None,
            outcome: DecisionOutcome::Unassigned,
            tier: ticket.tier(),
            urgency_score: ticket.urgency_score(),
            required_skill: ticket.required_skill().map(str::to_string),
            eligibility,
            candidates: 0,
            breakdown: None,
            workload_at_decision: None,
            rationale: unassigned_rationale(ticket, eligibility),
        }
    }

    /// Whether an agent was selected
    pub fn is_assigned(&self) -> bool {
        self.outcome == DecisionOutcome::Assigned
    }
}

fn assigned_rationale(
    ticket: &Ticket,
    agent: &Agent,
    eligibility: EligibilityMode,
    breakdown: &ScoreBreakdown,
    workload: u32,
) -> String {
    let mut parts = vec![format!("Assigned to {} ({})", agent.name, agent.id)];

    match (ticket.required_skill(), eligibility) {
        (Some(skill), EligibilityMode::Relaxed) => {
            parts.push(format!("due to availability (no available agent has {})", skill))
        }
        (Some(_), _) if breakdown.skill > 0.7 => parts.push("based on excellent skill match".to_string()),
        (Some(_), _) if breakdown.skill > 0.4 => parts.push("based on good skill match".to_string()),
        (Some(_), _) if breakdown.skill > 0.1 => parts.push("based on partial skill match".to_string()),
        _ => parts.push("due to availability".to_string()),
    }

    if agent.experience_level >= 10 {
        parts.push(format!("and high experience level ({} years)", agent.experience_level));
    } else if agent.experience_level >= 5 {
        parts.push(format!("and good experience ({} years)", agent.experience_level));
    }

    if workload <= 2 {
        parts.push("with low current workload".to_string());
    } else if workload <= 4 {
        parts.push("with moderate workload".to_string());
    } else if workload > 6 {
        parts.push("despite high workload (best available)".to_string());
    }

    if matches!(ticket.tier(), UrgencyTier::Critical | UrgencyTier::High) {
        parts.push(format!("for this {} priority ticket", ticket.tier()));
    }

    parts.join(" ") + "."
}

fn unassigned_rationale(ticket: &Ticket, eligibility: EligibilityMode) -> String {
    match (eligibility, ticket.required_skill()) {
        (EligibilityMode::Strict, Some(skill)) => format!(
            "Left unassigned: no available agent has {} and the skill requirement is strict.",
            skill
        ),
        _ => format!(
            "Left unassigned: no agents available for this {} priority ticket.",
            ticket.tier()
        ),
    }
}
