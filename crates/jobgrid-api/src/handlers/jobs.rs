//! Job listing and detail handlers.

use axum::extract::{Path, RawQuery, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use jobgrid_models::{ApplicationStats, JobPosting};
use jobgrid_query::{JobPage, JobStore, RawJobQuery};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Posting detail with its application statistics.
#[derive(Debug, Serialize)]
pub struct JobDetailResponse {
    #[serde(flatten)]
    pub job: JobPosting,
    pub statistics: ApplicationStats,
}

/// GET /api/jobs
///
/// List postings with the full filter surface: `status`, `search`/`keyword`,
/// `location`, `jobType`, `contractType`, `level`, `salaryMin`, `salaryMax`,
/// `sortBy`, `page`, `limit`, `employerId`. Multi-value fields accept both
/// `jobType=a,b` and the repeated-key form `jobType=a&jobType=b`; malformed
/// values are coerced to defaults, never rejected.
pub async fn list_jobs(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<JobPage>> {
    let raw = RawJobQuery::from_query_str(query.as_deref().unwrap_or(""));
    let page = state.engine.list(&raw).await?;
    info!(
        total = page.pagination.total_jobs,
        page = page.pagination.current_page,
        "list_jobs"
    );
    Ok(Json(page))
}

/// GET /api/jobs/:id
///
/// Posting detail plus aggregate application statistics.
///
/// Returns:
/// - 200: Posting detail
/// - 404: No posting with this id
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> ApiResult<Json<JobDetailResponse>> {
    let job = state
        .store
        .fetch_by_id(job_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("job {}", job_id)))?;

    let statistics = state.store.application_stats(job_id).await?;

    Ok(Json(JobDetailResponse { job, statistics }))
}

/// GET /api/employers/:id/jobs
///
/// Listing restricted to one employer. The employer restriction comes from
/// the path and cannot be overridden through query parameters.
pub async fn list_employer_jobs(
    State(state): State<AppState>,
    Path(employer_id): Path<i64>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<JobPage>> {
    let raw = RawJobQuery::from_query_str(query.as_deref().unwrap_or(""));
    let page = state.engine.list_for_employer(employer_id, &raw).await?;
    Ok(Json(page))
}
