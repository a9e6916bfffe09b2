// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as chunking geometry and bind addresses.

use crate::diagnostic::ConfigError;
use crate::model::KotaeConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &KotaeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.rag.chunk_size == 0 {
        errors.push(ConfigError::Validation {
            message: "rag.chunk_size must be greater than zero".to_string(),
        });
    }

    if config.rag.chunk_overlap >= config.rag.chunk_size && config.rag.chunk_size > 0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "rag.chunk_overlap ({}) must be smaller than rag.chunk_size ({})",
                config.rag.chunk_overlap, config.rag.chunk_size
            ),
        });
    }

    if config.rag.top_k == 0 {
        errors.push(ConfigError::Validation {
            message: "rag.top_k must be at least 1".to_string(),
        });
    }

    if config.history.max_turns == 0 {
        errors.push(ConfigError::Validation {
            message: "history.max_turns must be at least 1".to_string(),
        });
    }

    if !(0.0..=2.0).contains(&config.gemini.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "gemini.temperature must be between 0.0 and 2.0, got {}",
                config.gemini.temperature
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&KotaeConfig::default()).is_ok());
    }

    #[test]
    fn overlap_must_be_smaller_than_chunk_size() {
        let mut config = KotaeConfig::default();
        config.rag.chunk_size = 100;
        config.rag.chunk_overlap = 100;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("chunk_overlap")));
    }

    #[test]
    fn zero_max_turns_rejected() {
        let mut config = KotaeConfig::default();
        config.history.max_turns = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn empty_host_rejected() {
        let mut config = KotaeConfig::default();
        config.server.host = "  ".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = KotaeConfig::default();
        config.history.max_turns = 0;
        config.rag.top_k = 0;
        config.gemini.temperature = 5.0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
