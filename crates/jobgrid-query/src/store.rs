//! Store contract consumed by the query engine.

use async_trait::async_trait;
use thiserror::Error;

use jobgrid_models::{ApplicationStats, JobPosting};

use crate::compose::SqlFilter;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by a [`JobStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("row decode failed: {0}")]
    Decode(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

/// Read/write contract over the job listing store.
///
/// `fetch_page` and `count` take the same [`SqlFilter`]; implementations
/// must bind its parameters positionally and never interpolate them.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Fetch one page of postings matching the filter.
    async fn fetch_page(
        &self,
        filter: &SqlFilter,
        order_by: &str,
        limit: u32,
        offset: u64,
    ) -> StoreResult<Vec<JobPosting>>;

    /// Count all postings matching the filter.
    async fn count(&self, filter: &SqlFilter) -> StoreResult<u64>;

    /// Fetch a single posting with its description.
    async fn fetch_by_id(&self, id: i64) -> StoreResult<Option<JobPosting>>;

    /// Aggregate application counts for a posting.
    async fn application_stats(&self, job_id: i64) -> StoreResult<ApplicationStats>;

    /// Record an application and bump the posting's applicant counter in
    /// one transaction. A duplicate application is a [`StoreError::Conflict`].
    async fn record_application(
        &self,
        job_id: i64,
        candidate_id: i64,
        cv_url: Option<&str>,
        cover_letter: Option<&str>,
    ) -> StoreResult<()>;

    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> StoreResult<()>;
}
