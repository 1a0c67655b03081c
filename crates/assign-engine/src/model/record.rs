//! Raw ingestion records and their conversion into validated types
//!
//! Field names follow the dataset format (`ticket_id`, `availability_status`,
//! `current_load`, ...). Every field is optional on the record so that a
//! missing value is detected here and reported against the record instead of
//! failing deserialization of the whole dataset.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::agent::{Agent, AgentId, AvailabilityStatus, MAX_BASELINE_WORKLOAD};
use super::ticket::{Ticket, TicketId};
use crate::error::{AssignError, Result};
use crate::priority::PriorityAnalyzer;
use crate::routing::SkillInferer;

/// Ticket as received from ingestion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    /// Unique ticket identifier (required)
    pub ticket_id: Option<String>,
    /// Short title, joined in front of the description when present
    #[serde(default)]
    pub title: Option<String>,
    /// Free-text description (required)
    pub description: Option<String>,
    /// Submission time as given by the source system; informational only
    #[serde(default)]
    pub creation_timestamp: Option<String>,
    /// Explicit skill requirement, takes precedence over inference
    #[serde(default)]
    pub required_skill: Option<String>,
}

impl TicketRecord {
    /// Record with an id and description
    pub fn new(ticket_id: &str, description: &str) -> Self {
        Self {
            ticket_id: Some(ticket_id.to_string()),
            description: Some(description.to_string()),
            ..Self::default()
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Identifier used in error reports: the ticket id, or the record's
    /// position when the id is missing
    pub fn record_id(&self, position: usize) -> String {
        non_blank(&self.ticket_id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("ticket#{}", position))
    }

    /// Validate the record and build an analyzed [`Ticket`]
    ///
    /// `position` is the record's index in its batch and becomes the
    /// ticket's creation order.
    pub fn into_ticket(
        self,
        position: usize,
        analyzer: &PriorityAnalyzer,
        inferer: &SkillInferer,
    ) -> Result<Ticket> {
        let record_id = self.record_id(position);
        let id = non_blank(&self.ticket_id)
            .ok_or_else(|| AssignError::malformed(&record_id, "missing field 'ticket_id'"))?
            .to_string();
        let description = non_blank(&self.description)
            .ok_or_else(|| AssignError::malformed(&record_id, "missing field 'description'"))?;

        let text = match non_blank(&self.title) {
            Some(title) => format!("{} {}", title, description),
            None => description.to_string(),
        };

        let required_skill = match non_blank(&self.required_skill) {
            Some(skill) => Some(skill.to_string()),
            None => inferer.infer(&text).map(|inference| inference.skill),
        };

        Ok(Ticket::analyzed(TicketId(id), text, position, analyzer).with_required_skill(required_skill))
    }
}

/// Agent as received from ingestion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Unique agent identifier (required)
    pub agent_id: Option<String>,
    /// Display name, defaults to the id
    #[serde(default)]
    pub name: Option<String>,
    /// Skill name to proficiency (required, may be empty)
    pub skills: Option<BTreeMap<String, i64>>,
    /// "Available", "Busy", "Offline" or "On Leave" (required)
    pub availability_status: Option<String>,
    /// Years of experience (required)
    pub experience_level: Option<i64>,
    /// Open tickets before the run, defaults to 0
    #[serde(default)]
    pub current_load: Option<i64>,
}

impl AgentRecord {
    /// Available record with no skills, experience or load
    pub fn new(agent_id: &str) -> Self {
        Self {
            agent_id: Some(agent_id.to_string()),
            skills: Some(BTreeMap::new()),
            availability_status: Some("Available".to_string()),
            experience_level: Some(0),
            ..Self::default()
        }
    }

    /// Identifier used in error reports
    pub fn record_id(&self, position: usize) -> String {
        non_blank(&self.agent_id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("agent#{}", position))
    }

    /// Validate the record and build an [`Agent`]
    ///
    /// Proficiencies must lie within `0..=max_proficiency`; experience and
    /// load must be non-negative.
    pub fn into_agent(self, position: usize, max_proficiency: u8) -> Result<Agent> {
        let record_id = self.record_id(position);
        let malformed = |reason: String| AssignError::malformed(&record_id, reason);

        let id = non_blank(&self.agent_id)
            .ok_or_else(|| malformed("missing field 'agent_id'".to_string()))?
            .to_string();

        let raw_skills = self
            .skills
            .ok_or_else(|| malformed("missing field 'skills'".to_string()))?;
        let mut skills = BTreeMap::new();
        for (skill, level) in raw_skills {
            if skill.trim().is_empty() {
                return Err(malformed("skill with an empty name".to_string()));
            }
            let level = u8::try_from(level)
                .ok()
                .filter(|level| *level <= max_proficiency)
                .ok_or_else(|| {
                    malformed(format!(
                        "proficiency {} for skill '{}' outside 0..={}",
                        level, skill, max_proficiency
                    ))
                })?;
            skills.insert(skill, level);
        }

        let status: AvailabilityStatus = non_blank(&self.availability_status)
            .ok_or_else(|| malformed("missing field 'availability_status'".to_string()))?
            .parse()
            .map_err(malformed)?;

        let experience = self
            .experience_level
            .ok_or_else(|| malformed("missing field 'experience_level'".to_string()))?;
        let experience_level = u32::try_from(experience)
            .map_err(|_| malformed(format!("experience_level {} is not a valid year count", experience)))?;

        let load = self.current_load.unwrap_or(0);
        let baseline_workload = u32::try_from(load)
            .ok()
            .filter(|load| *load <= MAX_BASELINE_WORKLOAD)
            .ok_or_else(|| {
                malformed(format!(
                    "current_load {} is not a ticket count within 0..={}",
                    load, MAX_BASELINE_WORKLOAD
                ))
            })?;

        let name = non_blank(&self.name).map(str::to_string).unwrap_or_else(|| id.clone());

        Ok(Agent {
            id: AgentId(id),
            name,
            skills,
            experience_level,
            status,
            baseline_workload,
        })
    }
}

/// Complete input of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Agent roster
    #[serde(default)]
    pub agents: Vec<AgentRecord>,
    /// Tickets to assign, in creation order
    #[serde(default)]
    pub tickets: Vec<TicketRecord>,
}

/// Records that converted cleanly plus one error per rejected record
#[derive(Debug, Clone)]
pub struct Ingested<T> {
    /// Validated values in input order
    pub accepted: Vec<T>,
    /// Rejected records in input order
    pub failures: Vec<AssignError>,
}

/// Convert agent records, isolating failures per record
///
/// An agent whose id repeats an earlier accepted agent is rejected.
pub fn ingest_agents(records: &[AgentRecord], max_proficiency: u8) -> Ingested<Agent> {
    let mut seen = HashSet::new();
    let mut accepted = Vec::with_capacity(records.len());
    let mut failures = Vec::new();

    for (position, record) in records.iter().enumerate() {
        let result = record.clone().into_agent(position, max_proficiency).and_then(|agent| {
            if seen.insert(agent.id.clone()) {
                Ok(agent)
            } else {
                Err(AssignError::malformed(agent.id.as_ref(), "duplicate agent_id"))
            }
        });
        match result {
            Ok(agent) => accepted.push(agent),
            Err(e) => {
                warn!("Skipping agent record {}: {}", position, e);
                failures.push(e);
            }
        }
    }

    Ingested { accepted, failures }
}

/// Convert and analyze ticket records, isolating failures per record
///
/// A ticket whose id repeats an earlier accepted ticket is rejected.
pub fn ingest_tickets(
    records: &[TicketRecord],
    analyzer: &PriorityAnalyzer,
    inferer: &SkillInferer,
) -> Ingested<Ticket> {
    let mut seen = HashSet::new();
    let mut accepted = Vec::with_capacity(records.len());
    let mut failures = Vec::new();

    for (position, record) in records.iter().enumerate() {
        let result = record
            .clone()
            .into_ticket(position, analyzer, inferer)
            .and_then(|ticket| {
                if seen.insert(ticket.id().clone()) {
                    Ok(ticket)
                } else {
                    Err(AssignError::malformed(ticket.id().as_ref(), "duplicate ticket_id"))
                }
            });
        match result {
            Ok(ticket) => accepted.push(ticket),
            Err(e) => {
                warn!("Skipping ticket record {}: {}", position, e);
                failures.push(e);
            }
        }
    }

    Ingested { accepted, failures }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority::UrgencyTier;

    fn analyzer() -> PriorityAnalyzer {
        PriorityAnalyzer::standard()
    }

    #[test]
    fn test_ticket_record_joins_title_and_description() {
        let record = TicketRecord::new("TKT-1", "users cannot reach the intranet").with_title("VPN outage");
        let ticket = record.into_ticket(4, &analyzer(), &SkillInferer::standard()).unwrap();
        assert_eq!(ticket.text(), "VPN outage users cannot reach the intranet");
        assert_eq!(ticket.creation_order(), 4);
        assert_eq!(ticket.tier(), UrgencyTier::Critical);
        assert!(ticket.required_skill().is_some());
    }

    #[test]
    fn test_explicit_skill_beats_inference() {
        let mut record = TicketRecord::new("TKT-2", "VPN tunnel drops");
        record.required_skill = Some("Networking".to_string());
        let ticket = record.into_ticket(0, &analyzer(), &SkillInferer::standard()).unwrap();
        assert_eq!(ticket.required_skill(), Some("Networking"));
    }

    #[test]
    fn test_ticket_missing_fields() {
        let inferer = SkillInferer::standard();

        let no_id = TicketRecord {
            description: Some("help".to_string()),
            ..TicketRecord::default()
        };
        let error = no_id.into_ticket(7, &analyzer(), &inferer).unwrap_err();
        assert_eq!(error.record_id(), Some("ticket#7"));

        let blank_description = TicketRecord::new("TKT-3", "   ");
        let error = blank_description.into_ticket(0, &analyzer(), &inferer).unwrap_err();
        assert_eq!(error.record_id(), Some("TKT-3"));
        assert!(error.to_string().contains("description"));
    }

    #[test]
    fn test_agent_record_conversion() {
        let mut record = AgentRecord::new("agent_001");
        record.name = Some("Sarah Chen".to_string());
        record.skills = Some(BTreeMap::from([("Networking".to_string(), 9)]));
        record.availability_status = Some("On Leave".to_string());
        record.experience_level = Some(12);
        record.current_load = Some(3);

        let agent = record.into_agent(0, 10).unwrap();
        assert_eq!(agent.proficiency("Networking"), 9);
        assert_eq!(agent.status, AvailabilityStatus::OnLeave);
        assert_eq!(agent.baseline_workload, 3);
        assert_eq!(agent.experience_level, 12);
    }

    #[test]
    fn test_agent_name_defaults_to_id() {
        let agent = AgentRecord::new("agent_002").into_agent(0, 10).unwrap();
        assert_eq!(agent.name, "agent_002");
        assert_eq!(agent.baseline_workload, 0);
    }

    #[test]
    fn test_agent_out_of_range_values() {
        let mut record = AgentRecord::new("agent_003");
        record.skills = Some(BTreeMap::from([("Networking".to_string(), 11)]));
        assert!(record.into_agent(0, 10).is_err());

        let mut record = AgentRecord::new("agent_004");
        record.experience_level = Some(-1);
        assert!(record.into_agent(0, 10).is_err());

        let mut record = AgentRecord::new("agent_005");
        record.current_load = Some(-2);
        assert!(record.into_agent(0, 10).is_err());

        for load in [i64::from(u32::MAX), i64::from(MAX_BASELINE_WORKLOAD) + 1] {
            let mut record = AgentRecord::new("agent_008");
            record.current_load = Some(load);
            let error = record.into_agent(0, 10).unwrap_err();
            assert!(error.to_string().contains("current_load"));
        }
        let mut record = AgentRecord::new("agent_009");
        record.current_load = Some(i64::from(MAX_BASELINE_WORKLOAD));
        assert_eq!(record.into_agent(0, 10).unwrap().baseline_workload, MAX_BASELINE_WORKLOAD);

        let mut record = AgentRecord::new("agent_006");
        record.availability_status = Some("vacation".to_string());
        let error = record.into_agent(0, 10).unwrap_err();
        assert!(error.to_string().contains("vacation"));

        let mut record = AgentRecord::new("agent_007");
        record.experience_level = None;
        assert!(record.into_agent(0, 10).is_err());
    }

    #[test]
    fn test_ingest_isolates_failures_and_duplicates() {
        let mut broken = AgentRecord::new("agent_002");
        broken.skills = None;
        let records = vec![
            AgentRecord::new("agent_001"),
            broken,
            AgentRecord::new("agent_001"),
            AgentRecord::new("agent_003"),
        ];

        let ingested = ingest_agents(&records, 10);
        let ids: Vec<&str> = ingested.accepted.iter().map(|a| a.id.as_ref()).collect();
        assert_eq!(ids, vec!["agent_001", "agent_003"]);
        assert_eq!(ingested.failures.len(), 2);
        assert_eq!(ingested.failures[0].record_id(), Some("agent_002"));
        assert!(ingested.failures[1].to_string().contains("duplicate"));
    }

    #[test]
    fn test_ingest_tickets_keeps_input_positions() {
        let records = vec![
            TicketRecord::new("TKT-1", "question about invoices"),
            TicketRecord::default(),
            TicketRecord::new("TKT-3", "printer is slow"),
            TicketRecord::new("TKT-1", "duplicate"),
        ];
        let ingested = ingest_tickets(&records, &analyzer(), &SkillInferer::standard());
        assert_eq!(ingested.accepted.len(), 2);
        assert_eq!(ingested.accepted[1].creation_order(), 2);
        assert_eq!(ingested.failures.len(), 2);
    }

    #[test]
    fn test_dataset_from_json() {
        let dataset: Dataset = serde_json::from_str(
            r#"{
                "agents": [{
                    "agent_id": "agent_001",
                    "name": "Sarah Chen",
                    "skills": {"Networking": 9},
                    "availability_status": "Available",
                    "experience_level": 12,
                    "current_load": 2
                }],
                "tickets": [{
                    "ticket_id": "TKT-2024-001",
                    "title": "Site-to-site VPN down",
                    "description": "Branch office cannot reach HQ",
                    "creation_timestamp": "2024-05-01T09:00:00Z"
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(dataset.agents.len(), 1);
        assert_eq!(dataset.tickets[0].ticket_id.as_deref(), Some("TKT-2024-001"));
        assert_eq!(dataset.agents[0].current_load, Some(2));
    }
}
