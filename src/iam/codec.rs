//! Request/response codec for the identity authority protocol.
//!
//! Wire format, as the authority speaks it:
//!
//! ```text
//! request body:  {"action": "...", "projectId"?, "accessKeys"?, "offset"?}
//! response body: {"message": "...", "retCode": 0,
//!                 "data": {"limit", "total", "offset", "accessKeySet": [...]}}
//! ```
//!
//! The `retCode` gate runs before any payload inspection: a non-zero code is
//! a rejection even when a data object is present. Decoding yields either a
//! complete valid page or an error, never both.

use serde::Deserialize;

use crate::iam::types::{Query, ResolutionError, ResultPage};

/// Top-level response envelope. Codec-internal; the rest of the crate only
/// ever sees a validated `ResultPage`.
#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    message: String,
    #[serde(rename = "retCode")]
    ret_code: i64,
    #[serde(default)]
    data: serde_json::Value,
}

/// Serialize a query into the JSON request body.
///
/// Empty filters and a zero offset are omitted so the first page request is
/// byte-minimal.
pub fn encode_query(query: &Query) -> Result<Vec<u8>, ResolutionError> {
    serde_json::to_vec(query)
        .map_err(|e| ResolutionError::ProtocolError(format!("encode query: {}", e)))
}

/// Decode a response body into a complete result page.
pub fn decode_response(body: &[u8]) -> Result<ResultPage, ResolutionError> {
    let envelope: ResponseEnvelope = serde_json::from_slice(body)
        .map_err(|e| ResolutionError::ProtocolError(format!("decode response envelope: {}", e)))?;

    if envelope.ret_code != 0 {
        let message = if envelope.message.is_empty() {
            "no message".to_string()
        } else {
            envelope.message
        };
        return Err(ResolutionError::RemoteRejected(format!(
            "retCode {}: {}",
            envelope.ret_code, message
        )));
    }

    if envelope.data.is_null() {
        return Err(ResolutionError::ProtocolError(
            "retCode 0 but response carries no data object".to_string(),
        ));
    }
    let page: ResultPage = serde_json::from_value(envelope.data)
        .map_err(|e| ResolutionError::ProtocolError(format!("decode result page: {}", e)))?;

    if page.offset + page.records.len() > page.total {
        return Err(ResolutionError::ProtocolError(format!(
            "page overruns reported total: offset {} + {} records > total {}",
            page.offset,
            page.records.len(),
            page.total
        )));
    }

    Ok(page)
}
