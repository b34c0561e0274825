//! Error types for configuration loading

/// Errors that can occur while resolving credentials and endpoints
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable not set
    #[error("{0} environment variable not set")]
    EnvVarNotSet(String),

    /// Environment variable set but not valid unicode
    #[error("{0} environment variable is not valid unicode")]
    EnvVarNotUnicode(String),

    /// A value was present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::EnvVarNotSet("APCA_API_KEY_ID".to_string());
        assert_eq!(err.to_string(), "APCA_API_KEY_ID environment variable not set");
    }
}
