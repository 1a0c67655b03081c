//! Data model for tickets, agents and their raw input records
//!
//! [`Ticket`] and [`Agent`] are the validated types the assignment engine
//! works on. [`TicketRecord`], [`AgentRecord`] and [`Dataset`] mirror the
//! ingestion format and convert into the validated types one record at a
//! time, so a single malformed record never stops a batch.

pub mod agent;
pub mod record;
pub mod ticket;

pub use agent::{Agent, AgentId, AvailabilityStatus, MAX_BASELINE_WORKLOAD};
pub use record::{ingest_agents, ingest_tickets, AgentRecord, Dataset, Ingested, TicketRecord};
pub use ticket::{Ticket, TicketId};
