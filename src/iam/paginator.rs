//! Cursor-walking accumulation over paged results.

use std::time::Duration;

use crate::iam::executor::QueryExecutor;
use crate::iam::types::{Credential, Query, ResolutionError};

/// Fetch every page of a query, accumulating decoded credentials.
///
/// The cursor starts at 0 and advances to the server-reported
/// `offset + count` after each page; the walk ends when the cursor reaches
/// the reported total. Any page failure aborts the whole walk and discards
/// the accumulator — pagination is all-or-nothing for the caller.
///
/// A server that never lets the cursor advance (empty page short of the
/// total, or a repeated/rewound offset) would loop forever; that is reported
/// as a protocol error instead.
pub async fn fetch_all(
    executor: &QueryExecutor,
    base_query: &Query,
    page_deadline: Duration,
) -> Result<Vec<Credential>, ResolutionError> {
    let mut credentials: Vec<Credential> = Vec::new();
    let mut cursor = 0usize;

    loop {
        let query = base_query.with_offset(cursor);
        let page = executor.execute(&query, page_deadline).await?;

        let count = page.records.len();
        for record in page.records {
            credentials.push(Credential::from(record));
        }

        let next = page.offset + count;
        if next >= page.total {
            tracing::debug!(total = page.total, cursor = next, "pagination complete");
            return Ok(credentials);
        }
        if next <= cursor {
            return Err(ResolutionError::ProtocolError(format!(
                "pagination stalled at offset {}: server reported offset {} with {} records of total {}",
                cursor, page.offset, count, page.total
            )));
        }
        cursor = next;
    }
}
