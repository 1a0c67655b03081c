//! Core types for support tickets

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::priority::{PriorityAnalyzer, PriorityAssessment, UrgencyTier};

/// Ticket identifier type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub String);

impl From<String> for TicketId {
    fn from(s: String) -> Self {
        TicketId(s)
    }
}

impl From<&str> for TicketId {
    fn from(s: &str) -> Self {
        TicketId(s.to_string())
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TicketId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Support ticket ready for assignment
///
/// A ticket is built once at ingestion: its urgency assessment and skill
/// requirement are fixed at that point and the type offers no way to change
/// them afterwards. The assignment engine only ever reads tickets.
///
/// # Examples
///
/// ```
/// use helpdesk_assign_engine::model::Ticket;
/// use helpdesk_assign_engine::priority::{PriorityAnalyzer, UrgencyTier};
///
/// let analyzer = PriorityAnalyzer::standard();
/// let ticket = Ticket::analyzed("TKT-2024-001", "Database down for finance", 0, &analyzer)
///     .requiring_skill("Database_SQL");
///
/// assert_eq!(ticket.tier(), UrgencyTier::Critical);
/// assert_eq!(ticket.required_skill(), Some("Database_SQL"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    id: TicketId,
    text: String,
    creation_order: usize,
    assessment: PriorityAssessment,
    required_skill: Option<String>,
}

impl Ticket {
    /// Ticket with a precomputed assessment
    pub fn new(
        id: impl Into<TicketId>,
        text: impl Into<String>,
        creation_order: usize,
        assessment: PriorityAssessment,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            creation_order,
            assessment,
            required_skill: None,
        }
    }

    /// Ticket whose urgency is derived from its text
    pub fn analyzed(
        id: impl Into<TicketId>,
        text: impl Into<String>,
        creation_order: usize,
        analyzer: &PriorityAnalyzer,
    ) -> Self {
        let text = text.into();
        let assessment = analyzer.analyze(&text);
        Self::new(id, text, creation_order, assessment)
    }

    /// Attach a skill requirement
    pub fn requiring_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skill = Some(skill.into());
        self
    }

    pub(crate) fn with_required_skill(mut self, skill: Option<String>) -> Self {
        self.required_skill = skill;
        self
    }

    /// Ticket identifier
    pub fn id(&self) -> &TicketId {
        &self.id
    }

    /// Full ticket text (title and description)
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position of the ticket in its input batch
    pub fn creation_order(&self) -> usize {
        self.creation_order
    }

    /// Urgency assessment
    pub fn assessment(&self) -> &PriorityAssessment {
        &self.assessment
    }

    /// Urgency tier
    pub fn tier(&self) -> UrgencyTier {
        self.assessment.tier
    }

    /// Urgency score
    pub fn urgency_score(&self) -> f64 {
        self.assessment.score
    }

    /// Required skill, explicit or inferred
    pub fn required_skill(&self) -> Option<&str> {
        self.required_skill.as_deref()
    }
}
