//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: IamConfig → Result<(), Vec<ValidationError>>
//! - Runs before a resolver is constructed; a resolver never sees an
//!   unvalidated config

use url::Url;

use crate::config::schema::IamConfig;

/// A single semantic violation found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate semantic constraints; serde has already handled syntax.
pub fn validate_config(config: &IamConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.endpoint.is_empty() {
        push(&mut errors, "endpoint", "must not be empty".to_string());
    } else {
        match Url::parse(&config.endpoint) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => push(
                &mut errors,
                "endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            ),
            Err(e) => push(&mut errors, "endpoint", format!("not a valid URL: {}", e)),
        }
    }

    if config.access_key.is_empty() {
        push(&mut errors, "access_key", "must not be empty".to_string());
    }
    if config.secret_key.is_empty() {
        push(&mut errors, "secret_key", "must not be empty".to_string());
    }
    if config.lookup_timeout_secs == 0 {
        push(&mut errors, "lookup_timeout_secs", "must be > 0".to_string());
    }
    if config.page_timeout_secs == 0 {
        push(&mut errors, "page_timeout_secs", "must be > 0".to_string());
    }
    if config.circuit_breaker.failure_threshold == 0 {
        push(
            &mut errors,
            "circuit_breaker.failure_threshold",
            "must be > 0".to_string(),
        );
    }
    if config.circuit_breaker.recovery_timeout_secs == 0 {
        push(
            &mut errors,
            "circuit_breaker.recovery_timeout_secs",
            "must be > 0".to_string(),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn push(errors: &mut Vec<ValidationError>, field: &'static str, message: String) {
    errors.push(ValidationError { field, message });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> IamConfig {
        IamConfig {
            endpoint: "http://iam.internal:8080/query".to_string(),
            access_key: "gw-key".to_string(),
            secret_key: "gw-secret".to_string(),
            ..IamConfig::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let config = IamConfig::default();
        let errors = validate_config(&config).unwrap_err();
        // endpoint, access_key, secret_key all missing at once
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.field == "endpoint"));
        assert!(errors.iter().any(|e| e.field == "access_key"));
        assert!(errors.iter().any(|e| e.field == "secret_key"));
    }

    #[test]
    fn test_rejects_bad_scheme() {
        let mut config = valid_config();
        config.endpoint = "ftp://iam.internal/query".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("unsupported scheme"));
    }

    #[test]
    fn test_rejects_unparseable_url() {
        let mut config = valid_config();
        config.endpoint = "not a url".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "endpoint");
    }

    #[test]
    fn test_rejects_zero_timeouts() {
        let mut config = valid_config();
        config.lookup_timeout_secs = 0;
        config.circuit_breaker.failure_threshold = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
