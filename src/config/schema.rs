//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the credential resolver.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IamConfig {
    /// Identity authority endpoint (e.g. "http://iam.internal:8080/query").
    pub endpoint: String,

    /// Static key presented to the authority in the `X-Le-Key` header.
    pub access_key: String,

    /// Static secret presented to the authority in the `X-Le-Secret` header.
    pub secret_key: String,

    /// Deadline for single-key lookups, in seconds. Key lookups sit on the
    /// request hot path and get their own, typically tighter, deadline.
    pub lookup_timeout_secs: u64,

    /// Per-page deadline for bulk enumeration, in seconds.
    pub page_timeout_secs: u64,

    /// Circuit breaker settings for the shared transport.
    pub circuit_breaker: CircuitBreakerConfig,
}

impl Default for IamConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            lookup_timeout_secs: default_lookup_timeout_secs(),
            page_timeout_secs: default_page_timeout_secs(),
            circuit_breaker: CircuitBreakerConfig::default(),
        }
    }
}

fn default_lookup_timeout_secs() -> u64 {
    10
}

fn default_page_timeout_secs() -> u64 {
    10
}

/// Circuit breaker tuning for the authority transport.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CircuitBreakerConfig {
    /// Consecutive transport failures before the circuit opens.
    pub failure_threshold: u32,

    /// Seconds the circuit stays open before admitting a probe.
    pub recovery_timeout_secs: u64,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            recovery_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IamConfig::default();
        assert_eq!(config.lookup_timeout_secs, 10);
        assert_eq!(config.page_timeout_secs, 10);
        assert_eq!(config.circuit_breaker.failure_threshold, 5);
        assert_eq!(config.circuit_breaker.recovery_timeout_secs, 30);
    }

    #[test]
    fn test_minimal_toml() {
        let config: IamConfig = toml::from_str(
            r#"
            endpoint = "http://iam.internal:8080/query"
            access_key = "gw-key"
            secret_key = "gw-secret"
            "#,
        )
        .unwrap();
        assert_eq!(config.endpoint, "http://iam.internal:8080/query");
        assert_eq!(config.lookup_timeout_secs, 10);
        assert_eq!(config.circuit_breaker.failure_threshold, 5);
    }
}
