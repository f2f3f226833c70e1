//! Credential resolution facade.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::IamConfig;
use crate::iam::executor::QueryExecutor;
use crate::iam::paginator;
use crate::iam::types::{Credential, Query, ResolutionError};
use crate::observability::metrics;
use crate::transport::Transport;

/// Client facade over the identity authority.
///
/// Cheap to clone and safe for concurrent use; the transport (with its
/// circuit breaker) is the only shared state. Both the configuration and the
/// transport are explicit dependencies — there are no ambient globals.
#[derive(Clone)]
pub struct IamResolver {
    executor: Arc<QueryExecutor>,
    lookup_timeout: Duration,
    page_timeout: Duration,
}

impl IamResolver {
    /// Build a resolver from a validated configuration and a transport.
    pub fn new(config: &IamConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            executor: Arc::new(QueryExecutor::new(
                transport,
                config.endpoint.clone(),
                config.access_key.clone(),
                config.secret_key.clone(),
            )),
            lookup_timeout: Duration::from_secs(config.lookup_timeout_secs),
            page_timeout: Duration::from_secs(config.page_timeout_secs),
        }
    }

    /// Resolve every credential owned by a project, walking all pages.
    ///
    /// An empty result set is a success, not an error.
    pub async fn resolve_all_for_identity(
        &self,
        project_id: &str,
    ) -> Result<Vec<Credential>, ResolutionError> {
        let query = Query::keys_for_project(project_id);
        let started = Instant::now();
        let result = paginator::fetch_all(&self.executor, &query, self.page_timeout).await;

        metrics::record_resolution_duration("enumerate_keys", started.elapsed().as_secs_f64());
        match &result {
            Ok(credentials) => {
                tracing::debug!(project_id, count = credentials.len(), "resolved project keys");
                metrics::record_resolution("enumerate_keys", "ok");
            }
            Err(e) => {
                tracing::warn!(project_id, error = %e, "project key enumeration failed");
                metrics::record_resolution("enumerate_keys", e.kind());
            }
        }
        result
    }

    /// Resolve the credential for a single access key.
    ///
    /// Hot path: one page, the fixed lookup deadline, first record wins.
    pub async fn resolve_by_key(&self, access_key: &str) -> Result<Credential, ResolutionError> {
        let started = Instant::now();
        let result = self.lookup(access_key).await;

        metrics::record_resolution_duration("lookup_key", started.elapsed().as_secs_f64());
        match &result {
            Ok(_) => {
                tracing::debug!(access_key, "resolved access key");
                metrics::record_resolution("lookup_key", "ok");
            }
            Err(e) => {
                tracing::warn!(access_key, error = %e, "access key lookup failed");
                metrics::record_resolution("lookup_key", e.kind());
            }
        }
        result
    }

    async fn lookup(&self, access_key: &str) -> Result<Credential, ResolutionError> {
        let query = Query::for_access_key(access_key);
        let page = self.executor.execute(&query, self.lookup_timeout).await?;

        if page.total == 0 {
            return Err(ResolutionError::NotFound {
                access_key: access_key.to_string(),
            });
        }
        let record = page.records.into_iter().next().ok_or_else(|| {
            ResolutionError::ProtocolError(format!(
                "authority reported total {} but served no records",
                page.total
            ))
        })?;
        Ok(Credential::from(record))
    }
}
