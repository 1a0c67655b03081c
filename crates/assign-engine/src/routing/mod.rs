//! # Ticket Routing Primitives
//!
//! The pieces the assignment engine composes for every ticket:
//!
//! - [`skills`]: infers a skill requirement from ticket text
//! - [`eligibility`]: narrows the roster to agents who may take the ticket
//! - [`scoring`]: ranks eligible agents with a weighted composite score
//!
//! All three are immutable after construction and never touch workload
//! state; the engine passes current workloads in explicitly.

pub mod eligibility;
pub mod scoring;
pub mod skills;

pub use eligibility::{EligibilityFilter, EligibilityMode, EligibleSet};
pub use scoring::{CompositeScorer, ScoreBreakdown};
pub use skills::{SkillInference, SkillInferer, SkillKeywordTable, SkillKeywords};
