//! Gx policy translation error types

use thiserror::Error;

/// Gx policy translation error type
#[derive(Error, Debug)]
pub enum GxPolicyError {
    #[error("Rule directory lookup failed for base names {base_names:?}: {source}")]
    DirectoryLookup {
        base_names: Vec<String>,
        #[source]
        source: DirectoryError,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Gx policy translation result type
pub type GxPolicyResult<T> = Result<T, GxPolicyError>;

/// Failure reported by a rule directory backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Rule directory unavailable: {0}")]
    Unavailable(String),

    #[error("Rule directory backend error: {0}")]
    Backend(String),
}

/// Failure to parse a single flow description string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),

    #[error("Missing keyword: {0}")]
    MissingKeyword(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Invalid direction: {0}")]
    InvalidDirection(String),

    #[error("Invalid protocol: {0}")]
    InvalidProtocol(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid port: {0}")]
    InvalidPort(String),
}

/// Result type for flow parsing
pub type FlowResult<T> = Result<T, FlowError>;

/// Failure to convert a native time into a protocol timestamp
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("Timestamp out of range: {seconds} seconds from the Unix epoch")]
    OutOfRange { seconds: i128 },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_lookup_error_display() {
        let err = GxPolicyError::DirectoryLookup {
            base_names: vec!["BN1".to_string()],
            source: DirectoryError::Unavailable("connection refused".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("BN1"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_flow_error_display() {
        let err = FlowError::MissingKeyword("from".to_string());
        assert_eq!(err.to_string(), "Missing keyword: from");
    }

    #[test]
    fn test_config_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gxpolicy.yaml");
        let err: GxPolicyError = ConfigError::from(io).into();
        assert!(matches!(err, GxPolicyError::Config(ConfigError::Io(_))));
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
