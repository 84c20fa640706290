//! MySQL job store.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::FromRow;
use tracing::{debug, warn};

use jobgrid_models::{ApplicationStats, JobPosting, JobStatus};
use jobgrid_query::{JobStore, SqlFilter, SqlParam, StoreError, StoreResult};

/// Shared SELECT list and join for listing and detail queries.
const SELECT_POSTING: &str = "\
SELECT j.id, j.title, j.description, j.location, j.job_type, j.contract_type, j.level, \
j.salary_from, j.salary_to, j.required_exp_years, j.quantity, \
j.post_date, j.expire_date, j.status, j.applicant_count, j.employer_id, \
c.company_name, c.company_logo \
FROM job j LEFT JOIN company c ON c.employer_id = j.employer_id";

const COUNT_POSTING: &str =
    "SELECT COUNT(*) FROM job j LEFT JOIN company c ON c.employer_id = j.employer_id";

/// Schema capabilities declared at startup.
///
/// The deployment tells the store what the schema supports instead of the
/// store probing `SHOW COLUMNS` on first use and caching the answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreCapabilities {
    /// Whether the `application` table carries a per-row status column.
    /// When false, [`JobStore::application_stats`] reports totals only.
    pub application_status: bool,
}

/// MySQL-backed job store over a connection pool.
#[derive(Clone)]
pub struct MySqlJobStore {
    pool: MySqlPool,
    capabilities: StoreCapabilities,
}

/// Raw listing row; status is decoded through [`JobStatus::from_db`] so
/// legacy vocabularies stored by older writers still map cleanly.
#[derive(Debug, FromRow)]
struct JobRow {
    id: i64,
    title: String,
    description: Option<String>,
    location: Option<String>,
    job_type: Option<String>,
    contract_type: Option<String>,
    level: Option<String>,
    salary_from: Option<i64>,
    salary_to: Option<i64>,
    required_exp_years: Option<i32>,
    quantity: Option<i32>,
    post_date: NaiveDate,
    expire_date: NaiveDate,
    status: String,
    applicant_count: i64,
    employer_id: i64,
    company_name: Option<String>,
    company_logo: Option<String>,
}

impl From<JobRow> for JobPosting {
    fn from(row: JobRow) -> Self {
        JobPosting {
            id: row.id,
            title: row.title,
            description: row.description,
            location: row.location,
            job_type: row.job_type,
            contract_type: row.contract_type,
            level: row.level,
            salary_from: row.salary_from,
            salary_to: row.salary_to,
            required_exp_years: row.required_exp_years,
            quantity: row.quantity,
            post_date: row.post_date,
            expire_date: row.expire_date,
            status: JobStatus::from_db(&row.status),
            applicant_count: row.applicant_count,
            employer_id: row.employer_id,
            company_name: row.company_name,
            company_logo: row.company_logo,
        }
    }
}

impl MySqlJobStore {
    /// Connect a pool to the given database URL.
    pub async fn connect(
        url: &str,
        max_connections: u32,
        capabilities: StoreCapabilities,
    ) -> StoreResult<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| StoreError::unavailable(e.to_string()))?;
        Ok(Self { pool, capabilities })
    }

    /// Wrap an existing pool (used by tests and tooling).
    pub fn with_pool(pool: MySqlPool, capabilities: StoreCapabilities) -> Self {
        Self { pool, capabilities }
    }
}

/// Attach the filter's bind parameters to a query, in order.
macro_rules! bind_params {
    ($query:expr, $filter:expr) => {{
        let mut q = $query;
        for param in &$filter.params {
            q = match param {
                SqlParam::Str(s) => q.bind(s.as_str()),
                SqlParam::Int(i) => q.bind(*i),
            };
        }
        q
    }};
}

fn map_sqlx(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Io(e) => StoreError::Unavailable(e.to_string()),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StoreError::Unavailable(err.to_string())
        }
        sqlx::Error::RowNotFound => StoreError::NotFound(err.to_string()),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            StoreError::Decode(err.to_string())
        }
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(db.to_string())
        }
        other => StoreError::Query(other.to_string()),
    }
}

#[async_trait]
impl JobStore for MySqlJobStore {
    async fn fetch_page(
        &self,
        filter: &SqlFilter,
        order_by: &str,
        limit: u32,
        offset: u64,
    ) -> StoreResult<Vec<JobPosting>> {
        // limit/offset come pre-validated from PageRequest; order_by is one
        // of the fixed fragments from the composer.
        let sql = format!(
            "{} {} ORDER BY {} LIMIT {} OFFSET {}",
            SELECT_POSTING,
            filter.where_sql(),
            order_by,
            limit,
            offset
        );
        debug!(sql = %sql, params = filter.params.len(), "fetch_page");

        let rows: Vec<JobRow> = bind_params!(sqlx::query_as::<_, JobRow>(&sql), filter)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(rows.into_iter().map(JobPosting::from).collect())
    }

    async fn count(&self, filter: &SqlFilter) -> StoreResult<u64> {
        let sql = format!("{} {}", COUNT_POSTING, filter.where_sql());

        let total: i64 = bind_params!(sqlx::query_scalar::<_, i64>(&sql), filter)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(total.max(0) as u64)
    }

    async fn fetch_by_id(&self, id: i64) -> StoreResult<Option<JobPosting>> {
        let sql = format!("{} WHERE j.id = ?", SELECT_POSTING);

        let row: Option<JobRow> = sqlx::query_as::<_, JobRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(row.map(JobPosting::from))
    }

    async fn application_stats(&self, job_id: i64) -> StoreResult<ApplicationStats> {
        if !self.capabilities.application_status {
            let total: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM application WHERE job_id = ?")
                    .bind(job_id)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(map_sqlx)?;
            return Ok(ApplicationStats {
                total: total.max(0) as u64,
                ..Default::default()
            });
        }

        let (total, approved, declined): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), \
             CAST(COALESCE(SUM(status = 'approved'), 0) AS SIGNED), \
             CAST(COALESCE(SUM(status = 'declined'), 0) AS SIGNED) \
             FROM application WHERE job_id = ?",
        )
        .bind(job_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(ApplicationStats {
            total: total.max(0) as u64,
            approved: approved.max(0) as u64,
            declined: declined.max(0) as u64,
        })
    }

    async fn record_application(
        &self,
        job_id: i64,
        candidate_id: i64,
        cv_url: Option<&str>,
        cover_letter: Option<&str>,
    ) -> StoreResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        sqlx::query(
            "INSERT INTO application (job_id, candidate_id, cv_url, cover_letter, applied_at) \
             VALUES (?, ?, ?, ?, NOW())",
        )
        .bind(job_id)
        .bind(candidate_id)
        .bind(cv_url)
        .bind(cover_letter)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let updated = sqlx::query("UPDATE job SET applicant_count = applicant_count + 1 WHERE id = ?")
            .bind(job_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        if updated.rows_affected() == 0 {
            // FK on application should have caught this; bail out anyway
            warn!(job_id, "application recorded for missing posting, rolling back");
            tx.rollback().await.map_err(map_sqlx)?;
            return Err(StoreError::NotFound(format!("job {}", job_id)));
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| StoreError::unavailable(e.to_string()))
    }
}
