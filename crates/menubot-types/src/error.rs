use thiserror::Error;

/// Errors from the catalog store port.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item not found")]
    NotFound,

    #[error("storage error: {0}")]
    Backend(String),
}

/// Errors from the scoring source port.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("scoring source error: {0}")]
    Source(String),

    #[error("question index {0} out of range")]
    QuestionOutOfRange(usize),

    #[error("no style profile for dimension {0}")]
    MissingStyle(usize),
}

/// Errors surfaced while loading bot configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("bot token is not set (MENUBOT_TOKEN or TELEGRAM_TOKEN)")]
    MissingToken,

    #[error("ADMIN_ID is not set")]
    MissingAdminId,

    #[error("invalid ADMIN_ID: '{0}'")]
    InvalidAdminId(String),
}

/// External-collaborator failure during one event's processing.
///
/// Per-event fatal only: the dispatcher logs it, replies with a fixed
/// "temporarily unavailable" message, and leaves the session untouched.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Backend("disk full".to_string());
        assert_eq!(err.to_string(), "storage error: disk full");
        assert_eq!(StoreError::NotFound.to_string(), "item not found");
    }

    #[test]
    fn test_scoring_error_display() {
        assert_eq!(
            ScoringError::MissingStyle(3).to_string(),
            "no style profile for dimension 3"
        );
    }

    #[test]
    fn test_dispatch_error_from_store() {
        let err: DispatchError = StoreError::NotFound.into();
        assert_eq!(err.to_string(), "item not found");
    }

    #[test]
    fn test_config_error_display() {
        assert!(ConfigError::MissingToken.to_string().contains("MENUBOT_TOKEN"));
        assert!(
            ConfigError::InvalidAdminId("x".to_string())
                .to_string()
                .contains("'x'")
        );
    }
}
