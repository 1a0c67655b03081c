//! Run summary statistics
//!
//! Computed from a finished decision sequence without re-running anything,
//! so reporting collaborators can rebuild it from the decisions alone.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::engine::AssignmentDecision;
use crate::model::AgentId;
use crate::priority::{TierDistribution, UrgencyTier};

/// Aggregate view of one assignment run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Decisions made (one per accepted ticket)
    pub total_tickets: usize,
    /// Tickets that received an agent
    pub assigned: usize,
    /// Tickets left without an agent
    pub unassigned: usize,
    /// Records rejected before assignment
    pub failed_records: usize,
    /// Tickets per urgency tier
    pub priority_distribution: TierDistribution,
    /// Tickets assigned during the run per available agent, zeros included
    pub tickets_per_agent: BTreeMap<AgentId, u32>,
    /// Workload per agent after the run
    pub final_workloads: BTreeMap<AgentId, u32>,
    /// Evenness of `tickets_per_agent`, 1.0 is perfectly even
    pub load_balance_score: f64,
}

impl RunSummary {
    /// Summarize a decision sequence
    ///
    /// `tickets_per_agent` should list every agent that could receive
    /// tickets, including those that received none, so idle agents lower
    /// the balance score.
    pub fn from_decisions(
        decisions: &[AssignmentDecision],
        failed_records: usize,
        tickets_per_agent: BTreeMap<AgentId, u32>,
        final_workloads: BTreeMap<AgentId, u32>,
    ) -> Self {
        let mut priority_distribution: TierDistribution =
            UrgencyTier::ALL.iter().map(|tier| (*tier, 0)).collect();
        for decision in decisions {
            *priority_distribution.entry(decision.tier).or_insert(0) += 1;
        }

        let assigned = decisions.iter().filter(|d| d.is_assigned()).count();
        let counts: Vec<u32> = tickets_per_agent.values().copied().collect();

        Self {
            total_tickets: decisions.len(),
            assigned,
            unassigned: decisions.len() - assigned,
            failed_records,
            priority_distribution,
            load_balance_score: load_balance_score(&counts),
            tickets_per_agent,
            final_workloads,
        }
    }

    /// Share of decided tickets that received an agent, 0.0 without tickets
    pub fn assignment_rate(&self) -> f64 {
        if self.total_tickets == 0 {
            0.0
        } else {
            self.assigned as f64 / self.total_tickets as f64
        }
    }
}

/// Load balance score of a set of per-agent ticket counts
///
/// `1 - variance / mean²` clamped to `0.0..=1.0`. A single agent, or a zero
/// mean, counts as perfectly balanced; no agents at all scores 0.0.
///
/// # Examples
///
/// ```
/// use helpdesk_assign_engine::report::load_balance_score;
///
/// assert_eq!(load_balance_score(&[3, 3, 3]), 1.0);
/// assert_eq!(load_balance_score(&[]), 0.0);
/// assert!(load_balance_score(&[6, 0, 0]) < load_balance_score(&[3, 2, 1]));
/// ```
pub fn load_balance_score(counts: &[u32]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    if counts.len() == 1 {
        return 1.0;
    }

    let n = counts.len() as f64;
    let mean = counts.iter().map(|c| f64::from(*c)).sum::<f64>() / n;
    if mean == 0.0 {
        return 1.0;
    }
    let variance = counts
        .iter()
        .map(|c| (f64::from(*c) - mean).powi(2))
        .sum::<f64>()
        / n;

    (1.0 - variance / (mean * mean)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_balance_edge_cases() {
        assert_eq!(load_balance_score(&[]), 0.0);
        assert_eq!(load_balance_score(&[7]), 1.0);
        assert_eq!(load_balance_score(&[0, 0, 0]), 1.0);
        assert_eq!(load_balance_score(&[2, 2]), 1.0);
    }

    #[test]
    fn test_load_balance_values() {
        // mean 2, variance (1 + 0 + 1) / 3
        let score = load_balance_score(&[1, 2, 3]);
        assert!((score - (1.0 - (2.0 / 3.0) / 4.0)).abs() < 1e-12);

        // mean 1, variance 2: clamped
        assert_eq!(load_balance_score(&[3, 0, 0]), 0.0);
    }

    #[test]
    fn test_assignment_rate() {
        let summary = RunSummary::from_decisions(&[], 2, BTreeMap::new(), BTreeMap::new());
        assert_eq!(summary.assignment_rate(), 0.0);
        assert_eq!(summary.failed_records, 2);
        assert_eq!(summary.priority_distribution.len(), 4);
        assert_eq!(summary.load_balance_score, 0.0);
    }
}
