//! # Helpdesk Assignment Engine
//!
//! Routes support tickets to support agents. Every ticket's urgency is
//! estimated from its text, then tickets are handed out one by one, most
//! urgent first, to the best scoring eligible agent.
//!
//! ## Components
//!
//! - **Priority Analyzer** ([`priority`]): ticket text to urgency tier and
//!   score, driven by an explicit keyword table
//! - **Skill Inference** ([`routing::skills`]): ticket text to an optional
//!   skill requirement
//! - **Eligibility Filter** ([`routing::eligibility`]): available agents,
//!   optionally restricted to those holding the required skill
//! - **Composite Scorer** ([`routing::scoring`]): skill, workload,
//!   experience and priority components with configurable weights
//! - **Assignment Engine** ([`engine`]): the greedy sequential allocator
//! - **Run report** ([`report`]): distribution and load-balance statistics
//!
//! ## Quick Start
//!
//! ```rust
//! use helpdesk_assign_engine::prelude::*;
//!
//! # fn example() -> helpdesk_assign_engine::Result<()> {
//! let engine = AssignmentEngine::new(EngineConfig::default())?;
//!
//! let dataset = Dataset {
//!     agents: vec![AgentRecord::new("agent_001")],
//!     tickets: vec![
//!         TicketRecord::new("TKT-1", "All users affected: production server completely down"),
//!         TicketRecord::new("TKT-2", "Feature request: dark mode for the portal"),
//!     ],
//! };
//!
//! let run = engine.run(&dataset);
//! assert_eq!(run.decisions.len(), 2);
//! assert_eq!(run.decisions[0].tier, UrgencyTier::Critical);
//! for decision in &run.decisions {
//!     println!("#{} {}: {}", decision.rank, decision.ticket_id, decision.rationale);
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Determinism
//!
//! Given the same tickets, agents and configuration, [`AssignmentEngine::assign`]
//! always returns the same decisions. Ties are broken by creation order for
//! tickets and by workload then id for agents, never by iteration order.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod priority;
pub mod report;
pub mod routing;

pub use config::EngineConfig;
pub use engine::{AssignmentDecision, AssignmentEngine, AssignmentRun, DecisionOutcome};
pub use error::{AssignError, Result};

pub mod prelude {
    //! Commonly used types for assignment runs
    //!
    //! A single import that covers building an engine, feeding it records
    //! and reading its decisions.

    pub use crate::{AssignError, EngineConfig, Result};

    pub use crate::config::{
        AnalyzerSettings, EligibilityConfig, PriorityModulation, ScoringConfig, ScoringWeights,
    };

    pub use crate::engine::{AssignmentDecision, AssignmentEngine, AssignmentRun, DecisionOutcome};

    pub use crate::model::{
        ingest_agents, ingest_tickets, Agent, AgentId, AgentRecord, AvailabilityStatus, Dataset,
        Ingested, Ticket, TicketId, TicketRecord, MAX_BASELINE_WORKLOAD,
    };

    pub use crate::priority::{KeywordTable, PriorityAnalyzer, PriorityAssessment, UrgencyTier};

    pub use crate::routing::{
        CompositeScorer, EligibilityFilter, EligibilityMode, EligibleSet, ScoreBreakdown,
        SkillInferer, SkillKeywordTable,
    };

    pub use crate::report::{load_balance_score, RunSummary};
}
