//! Result assembly.
//!
//! The engine runs the composed query twice over one [`SqlFilter`]: once
//! with LIMIT/OFFSET for the page of rows and once as a COUNT over the same
//! predicates, so the reported total is always consistent with the page.
//! Both round-trips are read-only and independent and are issued
//! concurrently.

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use serde::Serialize;
use tracing::debug;

use jobgrid_models::{JobPosting, PaginationMeta};

use crate::compose::{compose_filters, order_by};
use crate::normalize::{normalize, NormalizedQuery, RawJobQuery};
use crate::store::{JobStore, StoreResult};

/// One page of listing results with its pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct JobPage {
    pub jobs: Vec<JobPosting>,
    pub pagination: PaginationMeta,
}

/// Stateless listing pipeline over a [`JobStore`].
pub struct JobQueryEngine<S> {
    store: Arc<S>,
}

impl<S: JobStore> JobQueryEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Run a listing query from raw request parameters.
    ///
    /// Malformed input is coerced to defaults by the normalizer; the only
    /// failure mode here is the store itself.
    pub async fn list(&self, raw: &RawJobQuery) -> StoreResult<JobPage> {
        let normalized = normalize(raw);
        self.run(normalized).await
    }

    /// Listing restricted to one employer's postings. The restriction is
    /// pinned after normalization so callers cannot widen it through the
    /// raw `employerId` parameter.
    pub async fn list_for_employer(&self, employer_id: i64, raw: &RawJobQuery) -> StoreResult<JobPage> {
        let mut normalized = normalize(raw);
        normalized.filter.employer_id = Some(employer_id);
        self.run(normalized).await
    }

    async fn run(&self, query: NormalizedQuery) -> StoreResult<JobPage> {
        let NormalizedQuery { filter, page, sort } = query;
        let sql = compose_filters(&filter);
        let order = order_by(sort);

        let start = Instant::now();
        let (jobs, total) = tokio::try_join!(
            self.store.fetch_page(&sql, order, page.limit, page.offset()),
            self.store.count(&sql),
        )?;

        histogram!("jobgrid_query_duration_seconds").record(start.elapsed().as_secs_f64());
        counter!("jobgrid_queries_total").increment(1);

        debug!(
            predicates = sql.clauses.len(),
            total,
            page = page.page,
            limit = page.limit,
            "listing query completed"
        );

        Ok(JobPage {
            jobs,
            pagination: PaginationMeta::compute(&page, total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::SqlFilter;
    use crate::store::StoreError;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use jobgrid_models::{ApplicationStats, JobStatus};
    use std::sync::Mutex;

    /// Store fake that captures the filters it was called with and serves
    /// a fixed corpus sliced by limit/offset.
    struct FakeStore {
        total: u64,
        fail: bool,
        seen: Mutex<Vec<SqlFilter>>,
    }

    impl FakeStore {
        fn with_total(total: u64) -> Self {
            Self { total, fail: false, seen: Mutex::new(Vec::new()) }
        }

        fn failing() -> Self {
            Self { total: 0, fail: true, seen: Mutex::new(Vec::new()) }
        }

        fn posting(id: i64) -> JobPosting {
            JobPosting {
                id,
                title: format!("Job {}", id),
                description: None,
                location: None,
                job_type: None,
                contract_type: None,
                level: None,
                salary_from: Some(2000),
                salary_to: Some(5000),
                required_exp_years: None,
                quantity: None,
                post_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                expire_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
                status: JobStatus::Open,
                applicant_count: 0,
                employer_id: 1,
                company_name: None,
                company_logo: None,
            }
        }
    }

    #[async_trait]
    impl JobStore for FakeStore {
        async fn fetch_page(
            &self,
            filter: &SqlFilter,
            _order_by: &str,
            limit: u32,
            offset: u64,
        ) -> StoreResult<Vec<JobPosting>> {
            if self.fail {
                return Err(StoreError::unavailable("connection refused"));
            }
            self.seen.lock().unwrap().push(filter.clone());
            let end = (offset + u64::from(limit)).min(self.total);
            Ok((offset..end).map(|i| Self::posting(i as i64 + 1)).collect())
        }

        async fn count(&self, filter: &SqlFilter) -> StoreResult<u64> {
            if self.fail {
                return Err(StoreError::unavailable("connection refused"));
            }
            self.seen.lock().unwrap().push(filter.clone());
            Ok(self.total)
        }

        async fn fetch_by_id(&self, _id: i64) -> StoreResult<Option<JobPosting>> {
            Ok(None)
        }

        async fn application_stats(&self, _job_id: i64) -> StoreResult<ApplicationStats> {
            Ok(ApplicationStats::default())
        }

        async fn record_application(
            &self,
            _job_id: i64,
            _candidate_id: i64,
            _cv_url: Option<&str>,
            _cover_letter: Option<&str>,
        ) -> StoreResult<()> {
            Ok(())
        }

        async fn ping(&self) -> StoreResult<()> {
            Ok(())
        }
    }

    fn engine(store: FakeStore) -> JobQueryEngine<FakeStore> {
        JobQueryEngine::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_page_two_of_twenty_five() {
        let raw = RawJobQuery {
            status: Some("active".to_string()),
            salary_min: Some("1000".to_string()),
            page: Some("2".to_string()),
            limit: Some("10".to_string()),
            ..Default::default()
        };
        let page = engine(FakeStore::with_total(25)).list(&raw).await.unwrap();

        assert_eq!(page.jobs.len(), 10);
        assert_eq!(page.pagination.current_page, 2);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.total_jobs, 25);
        assert_eq!(page.pagination.per_page, 10);
        assert!(page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }

    #[tokio::test]
    async fn test_page_and_count_share_one_filter() {
        let store = FakeStore::with_total(3);
        let raw = RawJobQuery {
            search: Some("rust".to_string()),
            location: Some("Berlin".to_string()),
            ..Default::default()
        };
        let eng = engine(store);
        eng.list(&raw).await.unwrap();

        let seen = eng.store.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], seen[1]);
        assert!(!seen[0].params.is_empty());
    }

    #[tokio::test]
    async fn test_empty_result_is_not_an_error() {
        let page = engine(FakeStore::with_total(0))
            .list(&RawJobQuery::default())
            .await
            .unwrap();
        assert!(page.jobs.is_empty());
        assert_eq!(page.pagination.total_jobs, 0);
        assert_eq!(page.pagination.total_pages, 1);
        assert!(!page.pagination.has_next);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let err = engine(FakeStore::failing())
            .list(&RawJobQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_employer_listing_pins_restriction() {
        let store = FakeStore::with_total(1);
        // Caller tries to read another employer's postings
        let raw = RawJobQuery {
            employer_id: Some("999".to_string()),
            ..Default::default()
        };
        let eng = engine(store);
        eng.list_for_employer(7, &raw).await.unwrap();

        let seen = eng.store.seen.lock().unwrap();
        assert!(seen[0].clauses.contains(&"j.employer_id = ?".to_string()));
        assert!(seen[0].params.contains(&crate::compose::SqlParam::Int(7)));
        assert!(!seen[0].params.contains(&crate::compose::SqlParam::Int(999)));
    }
}
