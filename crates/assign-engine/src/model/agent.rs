//! Core types for support agents

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Highest workload an agent may bring into a run
///
/// Leaves room in a `u32` counter for every ticket of any batch.
pub const MAX_BASELINE_WORKLOAD: u32 = 1_000_000;

/// Agent identifier type for strongly-typed agent references
///
/// Ordering is plain string ordering; the assignment engine uses it as the
/// final tie-breaker between otherwise equal agents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub String);

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        AgentId(s)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        AgentId(s.to_string())
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for AgentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Agent availability status
///
/// Only `Available` agents are eligible for new tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailabilityStatus {
    /// Agent can take tickets
    Available,
    /// Agent is working and not taking new tickets
    Busy,
    /// Agent is logged out
    Offline,
    /// Agent is away for an extended period
    OnLeave,
}

impl AvailabilityStatus {
    /// Whether the status allows new assignments
    pub fn is_available(self) -> bool {
        matches!(self, AvailabilityStatus::Available)
    }
}

impl std::str::FromStr for AvailabilityStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(|c: char| c == '_' || c == '-', " ").as_str() {
            "available" => Ok(AvailabilityStatus::Available),
            "busy" => Ok(AvailabilityStatus::Busy),
            "offline" => Ok(AvailabilityStatus::Offline),
            "on leave" | "onleave" => Ok(AvailabilityStatus::OnLeave),
            _ => Err(format!("Unknown availability status: {}", s)),
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "Available"),
            AvailabilityStatus::Busy => write!(f, "Busy"),
            AvailabilityStatus::Offline => write!(f, "Offline"),
            AvailabilityStatus::OnLeave => write!(f, "On Leave"),
        }
    }
}

/// Support agent profile
///
/// Agents are read-only inputs to a run. The workload counter that evolves
/// during assignment lives in the engine's run-scoped ledger, seeded from
/// `baseline_workload`.
///
/// # Examples
///
/// ```
/// use helpdesk_assign_engine::model::{Agent, AvailabilityStatus};
///
/// let agent = Agent::new("agent_001", "Sarah Chen")
///     .with_skill("Networking", 9)
///     .with_skill("Linux_Administration", 7)
///     .with_experience(12)
///     .with_workload(2);
///
/// assert!(agent.is_available());
/// assert_eq!(agent.proficiency("networking"), 9);
/// assert_eq!(agent.proficiency("Printer_Support"), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique agent identifier
    pub id: AgentId,

    /// Human-readable agent name
    pub name: String,

    /// Skill name to proficiency level (0 = none)
    pub skills: BTreeMap<String, u8>,

    /// Years of experience
    pub experience_level: u32,

    /// Current availability
    pub status: AvailabilityStatus,

    /// Open tickets the agent already holds before this run
    pub baseline_workload: u32,
}

impl Agent {
    /// New available agent with no skills, experience or workload
    pub fn new(id: impl Into<AgentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            skills: BTreeMap::new(),
            experience_level: 0,
            status: AvailabilityStatus::Available,
            baseline_workload: 0,
        }
    }

    /// Add or replace a skill
    pub fn with_skill(mut self, skill: &str, proficiency: u8) -> Self {
        self.skills.insert(skill.to_string(), proficiency);
        self
    }

    /// Set years of experience
    pub fn with_experience(mut self, years: u32) -> Self {
        self.experience_level = years;
        self
    }

    /// Set the baseline workload, capped at [`MAX_BASELINE_WORKLOAD`]
    pub fn with_workload(mut self, open_tickets: u32) -> Self {
        self.baseline_workload = open_tickets.min(MAX_BASELINE_WORKLOAD);
        self
    }

    /// Set the availability status
    pub fn with_status(mut self, status: AvailabilityStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the agent can take new tickets
    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }

    /// Proficiency in a skill, 0 when the agent lacks it
    ///
    /// Skill names compare case-insensitively.
    pub fn proficiency(&self, skill: &str) -> u8 {
        if let Some(level) = self.skills.get(skill) {
            return *level;
        }
        self.skills
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(skill))
            .map(|(_, level)| *level)
            .unwrap_or(0)
    }

    /// Whether the agent has a skill at proficiency above zero
    pub fn has_skill(&self, skill: &str) -> bool {
        self.proficiency(skill) > 0
    }
}
