//! Application handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use validator::Validate;

use jobgrid_models::ApplyRequest;
use jobgrid_query::{JobStore, StoreError};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub job_id: i64,
    pub candidate_id: i64,
    pub applied_at: String,
}

/// POST /api/jobs/:id/apply
///
/// Record an application and bump the posting's applicant counter in one
/// transaction.
///
/// Returns:
/// - 201: Application recorded
/// - 400: Posting not accepting applications, or invalid payload
/// - 404: No posting with this id
/// - 409: Candidate already applied
pub async fn apply_to_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Json(body): Json<ApplyRequest>,
) -> ApiResult<(StatusCode, Json<ApplyResponse>)> {
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let job = state
        .store
        .fetch_by_id(job_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("job {}", job_id)))?;

    if !job.is_active(Utc::now().date_naive()) {
        return Err(ApiError::bad_request("posting is not accepting applications"));
    }

    state
        .store
        .record_application(
            job_id,
            body.candidate_id,
            body.cv_url.as_deref(),
            body.cover_letter.as_deref(),
        )
        .await
        .map_err(|e| match e {
            StoreError::Conflict(_) => ApiError::conflict("candidate already applied to this job"),
            other => ApiError::from(other),
        })?;

    info!(job_id, candidate_id = body.candidate_id, "application recorded");

    Ok((
        StatusCode::CREATED,
        Json(ApplyResponse {
            job_id,
            candidate_id: body.candidate_id,
            applied_at: Utc::now().to_rfc3339(),
        }),
    ))
}
