//! Error types for skillgauge-core

use thiserror::Error;

use crate::types::SessionId;

/// Error type for scoring and assessment operations
#[derive(Debug, Error)]
pub enum Error {
    /// No live assessment or archived report exists for the session
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// `start_assessment` was called for a session that is already active
    #[error("Session already active: {0}")]
    SessionAlreadyActive(SessionId),

    /// A final report was already archived for the session
    #[error("Report already exists for session: {0}")]
    ReportExists(SessionId),

    /// Another update for the same session is still being applied
    #[error("Concurrent update rejected for session: {0}")]
    ConcurrentUpdate(SessionId),

    /// Required scenario or resolution data is missing or out of range
    #[error("Invalid scoring context for session {session_id}: {reason}")]
    InvalidContext {
        session_id: SessionId,
        reason: String,
    },

    /// Aggregation produced a value that cannot be reported
    #[error("Scoring computation failed: {0}")]
    ComputationFailure(String),

    /// Configuration values violate an invariant
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_context(session_id: &SessionId, reason: impl Into<String>) -> Self {
        Self::InvalidContext {
            session_id: session_id.clone(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for skillgauge operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_not_found_display() {
        let err = Error::SessionNotFound(SessionId::new("sess-42"));
        assert_eq!(err.to_string(), "Session not found: sess-42");
    }

    #[test]
    fn test_invalid_context_mentions_reason() {
        let err = Error::invalid_context(&"sess-1".into(), "scenario category is empty");
        let msg = err.to_string();
        assert!(msg.contains("sess-1"));
        assert!(msg.contains("scenario category is empty"));
    }

    #[test]
    fn test_report_exists_display() {
        let err = Error::ReportExists(SessionId::new("sess-9"));
        assert_eq!(err.to_string(), "Report already exists for session: sess-9");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
