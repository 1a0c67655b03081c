use thiserror::Error;

/// Error types for the assignment core
///
/// The core distinguishes between problems with a single input record, which
/// are isolated to that record, and configuration problems, which stop a run
/// before any ticket is processed. A ticket that no agent can take is not an
/// error at all: it is reported as an unassigned decision.
///
/// # Examples
///
/// ```
/// use helpdesk_assign_engine::{AssignError, Result};
///
/// fn load_weight(raw: f64) -> Result<f64> {
///     if !raw.is_finite() {
///         return Err(AssignError::configuration("weight must be finite"));
///     }
///     Ok(raw)
/// }
///
/// match load_weight(f64::NAN) {
///     Ok(_) => println!("weight accepted"),
///     Err(AssignError::Configuration(msg)) => println!("Bad config: {}", msg),
///     Err(e) => println!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssignError {
    /// A ticket or agent record reached the core without a required field,
    /// with an out-of-range value, or with an identifier already in use
    ///
    /// The record is skipped and every other record is still processed.
    ///
    /// # Examples
    /// - Ticket without `ticket_id`
    /// - Agent without `availability_status`
    /// - Skill proficiency above 10
    /// - Two agents sharing one `agent_id`
    #[error("Malformed input record '{record_id}': {reason}")]
    MalformedInput {
        /// Identifier of the offending record, or its position when the
        /// identifier itself is missing
        record_id: String,
        /// What was wrong with it
        reason: String,
    },

    /// Configuration validation errors
    ///
    /// Raised while building an analyzer or engine, never in the middle of
    /// a run.
    ///
    /// # Examples
    /// - Scoring weights that do not sum to 1.0
    /// - A keyword tier with no keywords
    /// - A negative or non-finite keyword weight
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AssignError {
    /// Create a new MalformedInput error for the given record
    ///
    /// # Examples
    ///
    /// ```
    /// use helpdesk_assign_engine::AssignError;
    ///
    /// let error = AssignError::malformed("TKT-2024-001", "missing field 'description'");
    /// assert_eq!(
    ///     error.to_string(),
    ///     "Malformed input record 'TKT-2024-001': missing field 'description'"
    /// );
    /// ```
    pub fn malformed<I: Into<String>, R: Into<String>>(record_id: I, reason: R) -> Self {
        Self::MalformedInput {
            record_id: record_id.into(),
            reason: reason.into(),
        }
    }

    /// Create a new Configuration error with the provided message
    ///
    /// # Examples
    ///
    /// ```
    /// use helpdesk_assign_engine::AssignError;
    ///
    /// let error = AssignError::configuration("scoring weights sum to 0.90");
    /// println!("{}", error);
    /// ```
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Identifier of the record this error belongs to, if any
    pub fn record_id(&self) -> Option<&str> {
        match self {
            Self::MalformedInput { record_id, .. } => Some(record_id),
            Self::Configuration(_) => None,
        }
    }
}

/// Result type for assignment core operations
///
/// This is a type alias for `std::result::Result<T, AssignError>`.
pub type Result<T> = std::result::Result<T, AssignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_carries_record_id() {
        let err = AssignError::malformed("agent_007", "missing field 'skills'");
        assert_eq!(err.record_id(), Some("agent_007"));
        assert!(err.to_string().contains("agent_007"));
    }

    #[test]
    fn test_configuration_has_no_record() {
        let err = AssignError::configuration("empty keyword tier");
        assert_eq!(err.record_id(), None);
        assert_eq!(err.to_string(), "Configuration error: empty keyword tier");
    }
}
