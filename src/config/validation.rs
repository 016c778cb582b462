//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (backlog bounded, buffer and interval non-zero)
//! - Check the storage path and log level are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::ServerConfig;

/// Upper bound on the accept backlog. The backlog is configurable but never
/// unlimited.
pub const MAX_BACKLOG: u32 = 4096;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    ZeroBacklog,
    BacklogTooLarge(u32),
    ZeroPollInterval,
    ZeroReadBuffer,
    EmptyStoragePath,
    EmptyHost,
    UnknownLogLevel(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ZeroBacklog => write!(f, "listener.backlog must be at least 1"),
            ValidationError::BacklogTooLarge(v) => {
                write!(f, "listener.backlog {} exceeds maximum {}", v, MAX_BACKLOG)
            }
            ValidationError::ZeroPollInterval => {
                write!(f, "poll.interval_ms must be at least 1")
            }
            ValidationError::ZeroReadBuffer => {
                write!(f, "poll.read_buffer_bytes must be at least 1")
            }
            ValidationError::EmptyStoragePath => write!(f, "storage.path must not be empty"),
            ValidationError::EmptyHost => write!(f, "listener.host must not be empty"),
            ValidationError::UnknownLogLevel(level) => {
                write!(f, "unknown observability.log_level '{}'", level)
            }
        }
    }
}

/// Validate a deserialized configuration, collecting every failure.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if config.listener.backlog == 0 {
        errors.push(ValidationError::ZeroBacklog);
    } else if config.listener.backlog > MAX_BACKLOG {
        errors.push(ValidationError::BacklogTooLarge(config.listener.backlog));
    }

    if config.poll.interval_ms == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }
    if config.poll.read_buffer_bytes == 0 {
        errors.push(ValidationError::ZeroReadBuffer);
    }

    if config.storage.path.is_empty() {
        errors.push(ValidationError::EmptyStoragePath);
    }

    match config.observability.log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        other => errors.push(ValidationError::UnknownLogLevel(other.to_string())),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = ServerConfig::default();
        config.listener.backlog = 0;
        config.poll.read_buffer_bytes = 0;
        config.observability.log_level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroBacklog));
        assert!(errors.contains(&ValidationError::ZeroReadBuffer));
    }

    #[test]
    fn backlog_is_bounded() {
        let mut config = ServerConfig::default();
        config.listener.backlog = MAX_BACKLOG + 1;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::BacklogTooLarge(MAX_BACKLOG + 1)]);
    }
}
