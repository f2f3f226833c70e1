//! Identity-authority wire types and error definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transport::TransportError;

/// A resolved credential for one access key.
///
/// Produced only by decoding a record served by the authority; owned by the
/// caller after return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Owning project (the authority's account identifier).
    pub project_id: String,
    /// Human-readable account name.
    pub display_name: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Whether other accounts may act through this key.
    pub allow_delegated_access: bool,
}

/// One raw record as served by the authority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessKeyRecord {
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub name: String,
    #[serde(rename = "accessKey")]
    pub access_key: String,
    #[serde(rename = "accessSecret")]
    pub access_secret: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub updated: String,
}

impl From<AccessKeyRecord> for Credential {
    fn from(record: AccessKeyRecord) -> Self {
        Self {
            project_id: record.project_id,
            display_name: record.name,
            access_key_id: record.access_key,
            secret_access_key: record.access_secret,
            // The authority does not model delegated access; always deny.
            allow_delegated_access: false,
        }
    }
}

/// Filter parameters for one request to the authority.
///
/// Built fresh per page; each page carries its own offset. Empty filters and
/// a zero offset are omitted from the wire form.
#[derive(Debug, Clone, Serialize)]
pub struct Query {
    pub action: String,
    #[serde(rename = "projectId", skip_serializing_if = "String::is_empty")]
    pub project_id: String,
    #[serde(rename = "accessKeys", skip_serializing_if = "Vec::is_empty")]
    pub access_keys: Vec<String>,
    #[serde(skip_serializing_if = "offset_is_default")]
    pub offset: usize,
}

fn offset_is_default(offset: &usize) -> bool {
    *offset == 0
}

/// Action name understood by the identity authority.
pub const ACTION_DESCRIBE_ACCESS_KEYS: &str = "DescribeAccessKeys";

impl Query {
    /// Enumerate every access key owned by a project.
    pub fn keys_for_project(project_id: impl Into<String>) -> Self {
        Self {
            action: ACTION_DESCRIBE_ACCESS_KEYS.to_string(),
            project_id: project_id.into(),
            access_keys: Vec::new(),
            offset: 0,
        }
    }

    /// Look up a single access key.
    pub fn for_access_key(access_key: impl Into<String>) -> Self {
        Self {
            action: ACTION_DESCRIBE_ACCESS_KEYS.to_string(),
            project_id: String::new(),
            access_keys: vec![access_key.into()],
            offset: 0,
        }
    }

    /// The same query aimed at a different page.
    pub fn with_offset(&self, offset: usize) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }
}

/// One page of a larger result set, already validated by the codec.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultPage {
    #[serde(default)]
    pub limit: usize,
    pub total: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(rename = "accessKeySet", default)]
    pub records: Vec<AccessKeyRecord>,
}

/// Errors crossing the resolver boundary.
///
/// A closed taxonomy: callers branch on the variant, never on message text.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The network call itself failed (connection, DNS, TLS, open circuit).
    #[error("transport failure: {0}")]
    TransportFailure(#[from] TransportError),

    /// The authority answered but refused or failed the request.
    #[error("identity authority rejected request: {0}")]
    RemoteRejected(String),

    /// The response could not be decoded, or pagination invariants broke.
    #[error("protocol error: {0}")]
    ProtocolError(String),

    /// The call did not complete within the enforced deadline.
    #[error("identity query timed out after {0:?}")]
    Timeout(Duration),

    /// The authority affirmatively reported zero matches for a key lookup.
    #[error("access key '{access_key}' does not exist")]
    NotFound { access_key: String },
}

impl ResolutionError {
    /// Stable label for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolutionError::TransportFailure(_) => "transport_failure",
            ResolutionError::RemoteRejected(_) => "remote_rejected",
            ResolutionError::ProtocolError(_) => "protocol_error",
            ResolutionError::Timeout(_) => "timeout",
            ResolutionError::NotFound { .. } => "not_found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_to_credential() {
        let record = AccessKeyRecord {
            project_id: "p-100".to_string(),
            name: "tenant-a".to_string(),
            access_key: "AK100".to_string(),
            access_secret: "SK100".to_string(),
            status: "active".to_string(),
            updated: "2021-06-01".to_string(),
        };
        let credential = Credential::from(record);
        assert_eq!(credential.project_id, "p-100");
        assert_eq!(credential.display_name, "tenant-a");
        assert_eq!(credential.access_key_id, "AK100");
        assert_eq!(credential.secret_access_key, "SK100");
        assert!(!credential.allow_delegated_access);
    }

    #[test]
    fn test_with_offset_keeps_filters() {
        let base = Query::keys_for_project("p-100");
        let page2 = base.with_offset(40);
        assert_eq!(page2.project_id, "p-100");
        assert_eq!(page2.offset, 40);
        assert_eq!(base.offset, 0);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            ResolutionError::Timeout(Duration::from_secs(10)).kind(),
            "timeout"
        );
        assert_eq!(
            ResolutionError::NotFound {
                access_key: "AK1".to_string()
            }
            .kind(),
            "not_found"
        );
    }
}
