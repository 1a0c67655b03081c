//! # Assignment Engine
//!
//! Greedy, sequential, priority-ordered allocation of tickets to agents.
//!
//! ## Algorithm
//!
//! 1. Order tickets by urgency score, highest first; equal scores keep
//!    creation order.
//! 2. For each ticket, compute the eligible set. An empty set yields an
//!    unassigned decision.
//! 3. Score every eligible agent with its *current* workload.
//! 4. Pick the highest total; ties go to the lower current workload, then
//!    the lower agent id.
//! 5. Record the decision and add one to the chosen agent's workload.
//!
//! Decisions are final once made. A later ticket never takes an agent back
//! from an earlier one, even when that would have produced a better overall
//! match.
//!
//! ## Examples
//!
//! ```rust
//! use helpdesk_assign_engine::prelude::*;
//!
//! # fn example() -> helpdesk_assign_engine::Result<()> {
//! let engine = AssignmentEngine::new(EngineConfig::default())?;
//!
//! let agents = vec![
//!     Agent::new("agent_001", "Sarah Chen").with_skill("Networking", 9).with_experience(12),
//!     Agent::new("agent_002", "Tom Reyes").with_skill("Networking", 9).with_experience(12).with_workload(3),
//! ];
//! let tickets = vec![
//!     engine.prepare_ticket("TKT-1", "Network down on the third floor", 0),
//!     engine.prepare_ticket("TKT-2", "How to configure the guest wifi", 1),
//! ];
//!
//! let decisions = engine.assign(&tickets, &agents);
//! assert_eq!(decisions.len(), 2);
//! assert_eq!(decisions[0].ticket_id.as_ref(), "TKT-1");
//! assert_eq!(decisions[0].agent_id.as_ref().map(|id| id.as_ref()), Some("agent_001"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod decision;
mod ledger;

pub use decision::{AssignmentDecision, DecisionOutcome};

use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use tracing::{debug, info, warn};
use uuid::Uuid;

use self::ledger::WorkloadLedger;
use crate::config::EngineConfig;
use crate::error::{AssignError, Result};
use crate::model::{ingest_agents, ingest_tickets, Agent, AgentId, Dataset, Ticket, TicketId};
use crate::priority::{KeywordTable, PriorityAnalyzer};
use crate::report::RunSummary;
use crate::routing::{CompositeScorer, EligibilityFilter, ScoreBreakdown, SkillInferer, SkillKeywordTable};

/// Outcome of a full run over a dataset
#[derive(Debug, Clone)]
pub struct AssignmentRun {
    /// Identifier for correlating log lines of this run
    pub run_id: Uuid,
    /// One decision per accepted ticket, in decision order
    pub decisions: Vec<AssignmentDecision>,
    /// Records rejected during ingestion, agents first
    pub failures: Vec<AssignError>,
    /// Agents accepted for the run, in input order
    pub agents: Vec<Agent>,
    /// Workload per agent after the run
    pub final_workloads: BTreeMap<AgentId, u32>,
    /// Aggregate statistics
    pub summary: RunSummary,
}

/// Assignment engine
///
/// Immutable after construction: it holds the analyzer, skill inferer,
/// eligibility filter and scorer built from one [`EngineConfig`]. All
/// workload state lives in a ledger local to each call of
/// [`assign`](Self::assign) or [`run`](Self::run), so one engine can serve
/// any number of runs.
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    config: EngineConfig,
    analyzer: PriorityAnalyzer,
    inferer: SkillInferer,
    filter: EligibilityFilter,
    scorer: CompositeScorer,
}

impl AssignmentEngine {
    /// Engine with the standard keyword and skill tables
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_tables(config, KeywordTable::standard(), SkillKeywordTable::standard())
    }

    /// Engine with custom urgency and skill tables
    ///
    /// Fails with [`AssignError::Configuration`] before anything runs if the
    /// configuration or either table is invalid.
    pub fn with_tables(
        config: EngineConfig,
        keywords: KeywordTable,
        skills: SkillKeywordTable,
    ) -> Result<Self> {
        config.validate()?;
        let analyzer = PriorityAnalyzer::new(keywords, config.analyzer.clone())?;
        let inferer = SkillInferer::new(skills)?;
        let filter = EligibilityFilter::new(&config.eligibility);
        let scorer = CompositeScorer::new(config.weights, config.scoring.clone())?;

        info!(
            "Assignment engine ready: {} urgency keywords, {} skills, relaxation {}",
            analyzer.table().keyword_count(),
            inferer.table().skills.len(),
            if filter.relaxes() { "on" } else { "off" }
        );

        Ok(Self {
            config,
            analyzer,
            inferer,
            filter,
            scorer,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Urgency analyzer in use
    pub fn analyzer(&self) -> &PriorityAnalyzer {
        &self.analyzer
    }

    /// Skill inferer in use
    pub fn inferer(&self) -> &SkillInferer {
        &self.inferer
    }

    /// Build an analyzed ticket with an inferred skill requirement
    pub fn prepare_ticket(&self, id: impl Into<TicketId>, text: &str, creation_order: usize) -> Ticket {
        let skill = self.inferer.infer(text).map(|inference| inference.skill);
        Ticket::analyzed(id, text, creation_order, &self.analyzer).with_required_skill(skill)
    }

    /// Assign tickets to agents
    ///
    /// Returns exactly one decision per ticket, in decision order.
    pub fn assign(&self, tickets: &[Ticket], agents: &[Agent]) -> Vec<AssignmentDecision> {
        self.assign_with_ledger(tickets, agents).0
    }

    /// Ingest a dataset, assign it and summarize the result
    ///
    /// Malformed records are reported in [`AssignmentRun::failures`] and
    /// every other record is still processed.
    pub fn run(&self, dataset: &Dataset) -> AssignmentRun {
        let run_id = Uuid::new_v4();
        info!(
            "🚀 Starting assignment run {} with {} ticket and {} agent records",
            run_id,
            dataset.tickets.len(),
            dataset.agents.len()
        );

        let agents = ingest_agents(&dataset.agents, self.config.scoring.max_proficiency);
        let tickets = ingest_tickets(&dataset.tickets, &self.analyzer, &self.inferer);

        let mut failures = agents.failures;
        failures.extend(tickets.failures);
        if !failures.is_empty() {
            warn!("Run {}: {} record(s) rejected", run_id, failures.len());
        }

        let agents = agents.accepted;
        let (decisions, ledger) = self.assign_with_ledger(&tickets.accepted, &agents);

        let final_workloads = ledger.final_workloads(&agents);
        let tickets_per_agent: BTreeMap<AgentId, u32> = ledger
            .assignment_counts(&agents)
            .into_iter()
            .filter(|(id, _)| agents.iter().any(|agent| &agent.id == id && agent.is_available()))
            .collect();
        let summary = RunSummary::from_decisions(
            &decisions,
            failures.len(),
            tickets_per_agent,
            final_workloads.clone(),
        );

        info!(
            "✅ Run {} finished: {} assigned, {} unassigned, {} failed, load balance {:.3}",
            run_id, summary.assigned, summary.unassigned, summary.failed_records, summary.load_balance_score
        );

        AssignmentRun {
            run_id,
            decisions,
            failures,
            agents,
            final_workloads,
            summary,
        }
    }

    fn assign_with_ledger(
        &self,
        tickets: &[Ticket],
        agents: &[Agent],
    ) -> (Vec<AssignmentDecision>, WorkloadLedger) {
        let mut ledger = WorkloadLedger::seeded(agents);
        let mut decisions = Vec::with_capacity(tickets.len());

        let mut order: Vec<&Ticket> = tickets.iter().collect();
        // stable sort keeps input order for tickets equal on both keys
        order.sort_by_key(|ticket| (Reverse(OrderedFloat(ticket.urgency_score())), ticket.creation_order()));

        for (position, ticket) in order.into_iter().enumerate() {
            let rank = position + 1;
            let (eligible, mode) = self.filter.eligible_indices(ticket, agents);

            if eligible.is_empty() {
                warn!(
                    "Ticket {} ({}) left unassigned: no eligible agents ({:?})",
                    ticket.id(),
                    ticket.tier(),
                    mode
                );
                decisions.push(AssignmentDecision::unassigned(rank, ticket, mode));
                continue;
            }

            let busiest = ledger.busiest(&eligible);
            let mut best: Option<(usize, ScoreBreakdown)> = None;
            for index in &eligible {
                let breakdown = self.scorer.score(ticket, &agents[*index], ledger.current(*index), busiest);
                let better = match &best {
                    None => true,
                    Some((best_index, best_breakdown)) => {
                        Self::prefer(agents, &ledger, (*index, &breakdown), (*best_index, best_breakdown))
                            == Ordering::Greater
                    }
                };
                if better {
                    best = Some((*index, breakdown));
                }
            }

            // eligible is non-empty, so a best candidate exists
            if let Some((index, breakdown)) = best {
                let agent = &agents[index];
                let workload = ledger.current(index);
                debug!(
                    "#{} ticket {} -> {} (total {:.3}, workload {}, {} candidates)",
                    rank,
                    ticket.id(),
                    agent.id,
                    breakdown.total,
                    workload,
                    eligible.len()
                );
                decisions.push(AssignmentDecision::assigned(
                    rank,
                    ticket,
                    agent,
                    mode,
                    eligible.len(),
                    breakdown,
                    workload,
                ));
                ledger.record_assignment(index);
            }
        }

        (decisions, ledger)
    }

    /// Compare two candidates: higher total, then lower current workload,
    /// then lower agent id
    fn prefer(
        agents: &[Agent],
        ledger: &WorkloadLedger,
        candidate: (usize, &ScoreBreakdown),
        incumbent: (usize, &ScoreBreakdown),
    ) -> Ordering {
        OrderedFloat(candidate.1.total)
            .cmp(&OrderedFloat(incumbent.1.total))
            .then_with(|| ledger.current(incumbent.0).cmp(&ledger.current(candidate.0)))
            .then_with(|| agents[incumbent.0].id.cmp(&agents[candidate.0].id))
    }
}
