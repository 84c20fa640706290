//! Job application payloads and per-posting statistics.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for applying to a posting.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApplyRequest {
    #[validate(range(min = 1, message = "candidate_id must be positive"))]
    pub candidate_id: i64,

    /// Uploaded CV location; upload handling itself lives elsewhere.
    #[validate(url(message = "cv_url must be a valid URL"))]
    pub cv_url: Option<String>,

    #[validate(length(max = 4000, message = "cover letter too long"))]
    pub cover_letter: Option<String>,
}

/// Aggregate application counts for a posting.
///
/// When the store has no per-application status tracking, `approved` and
/// `declined` are reported as zero and only `total` is meaningful.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationStats {
    pub total: u64,
    pub approved: u64,
    pub declined: u64,
}
