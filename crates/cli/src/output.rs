//! Output file formats and terminal tables

use std::collections::BTreeMap;

use helpdesk_assign_engine::prelude::*;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// One line of the submission file
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionEntry {
    pub ticket_id: String,
    pub assigned_agent_id: Option<String>,
    pub rationale: String,
}

/// Detailed per-ticket record of the report file
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub rank: usize,
    pub ticket_id: String,
    pub assigned_agent_id: Option<String>,
    pub outcome: DecisionOutcome,
    pub priority_level: UrgencyTier,
    pub priority_score: f64,
    pub required_skill: Option<String>,
    pub eligibility: EligibilityMode,
    pub skill_match_score: Option<f64>,
    pub workload_factor: Option<f64>,
    pub experience_factor: Option<f64>,
    pub priority_factor: Option<f64>,
    pub final_score: Option<f64>,
    pub workload_at_decision: Option<u32>,
    pub rationale: String,
}

/// Detailed report file
#[derive(Debug, Clone, Serialize)]
pub struct DetailedReport {
    pub run_id: String,
    pub summary: RunSummary,
    pub failures: Vec<FailureEntry>,
    pub assignments: Vec<ReportEntry>,
}

/// Rejected input record
#[derive(Debug, Clone, Serialize)]
pub struct FailureEntry {
    pub record_id: Option<String>,
    pub error: String,
}

fn round(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Submission entries in decision order
pub fn submission(run: &AssignmentRun) -> Vec<SubmissionEntry> {
    run.decisions
        .iter()
        .map(|decision| SubmissionEntry {
            ticket_id: decision.ticket_id.to_string(),
            assigned_agent_id: decision.agent_id.as_ref().map(ToString::to_string),
            rationale: decision.rationale.clone(),
        })
        .collect()
}

/// Detailed report with scores rounded for reading
pub fn detailed_report(run: &AssignmentRun) -> DetailedReport {
    let assignments = run
        .decisions
        .iter()
        .map(|decision| {
            let breakdown = decision.breakdown.as_ref();
            ReportEntry {
                rank: decision.rank,
                ticket_id: decision.ticket_id.to_string(),
                assigned_agent_id: decision.agent_id.as_ref().map(ToString::to_string),
                outcome: decision.outcome,
                priority_level: decision.tier,
                priority_score: round(decision.urgency_score, 2),
                required_skill: decision.required_skill.clone(),
                eligibility: decision.eligibility,
                skill_match_score: breakdown.map(|b| round(b.skill, 3)),
                workload_factor: breakdown.map(|b| round(b.workload, 3)),
                experience_factor: breakdown.map(|b| round(b.experience, 3)),
                priority_factor: breakdown.map(|b| round(b.priority, 3)),
                final_score: breakdown.map(|b| round(b.total, 3)),
                workload_at_decision: decision.workload_at_decision,
                rationale: decision.rationale.clone(),
            }
        })
        .collect();

    let failures = run
        .failures
        .iter()
        .map(|error| FailureEntry {
            record_id: error.record_id().map(str::to_string),
            error: error.to_string(),
        })
        .collect();

    DetailedReport {
        run_id: run.run_id.to_string(),
        summary: run.summary.clone(),
        failures,
        assignments,
    }
}

#[derive(Tabled)]
struct AgentRow {
    #[tabled(rename = "Agent")]
    agent: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Assigned")]
    assigned: u32,
    #[tabled(rename = "Final Load")]
    final_load: u32,
}

#[derive(Tabled)]
struct TierRow {
    #[tabled(rename = "Priority")]
    tier: String,
    #[tabled(rename = "Tickets")]
    tickets: usize,
}

/// Terminal summary of a run
pub fn summary_table(run: &AssignmentRun) -> String {
    let summary = &run.summary;

    let tiers: Vec<TierRow> = summary
        .priority_distribution
        .iter()
        .map(|(tier, count)| TierRow {
            tier: tier.to_string(),
            tickets: *count,
        })
        .collect();

    let assigned_per_agent: BTreeMap<&AgentId, u32> = run
        .decisions
        .iter()
        .filter_map(|decision| decision.agent_id.as_ref())
        .fold(BTreeMap::new(), |mut counts, id| {
            *counts.entry(id).or_insert(0) += 1;
            counts
        });

    let agents: Vec<AgentRow> = run
        .agents
        .iter()
        .map(|agent| AgentRow {
            agent: agent.id.to_string(),
            name: agent.name.clone(),
            status: agent.status.to_string(),
            assigned: assigned_per_agent.get(&agent.id).copied().unwrap_or(0),
            final_load: run.final_workloads.get(&agent.id).copied().unwrap_or(0),
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format!(
        "Tickets: {}  Assigned: {}  Unassigned: {}  Failed records: {}\n",
        summary.total_tickets, summary.assigned, summary.unassigned, summary.failed_records
    ));
    out.push_str(&format!(
        "Assignment rate: {:.1}%  Load balance score: {:.3}\n\n",
        summary.assignment_rate() * 100.0,
        summary.load_balance_score
    ));
    out.push_str(&Table::new(tiers).with(Style::rounded()).to_string());
    out.push('\n');
    out.push_str(&Table::new(agents).with(Style::rounded()).to_string());
    out.push('\n');
    out
}
