//! Job posting model and status vocabulary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical posting status.
///
/// Historical rows carry mixed vocabularies (`Active`/`OPEN`, `CLOSED`);
/// [`JobStatus::from_db`] folds those into the canonical set. New rows are
/// always written with [`JobStatus::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Posting accepts applications (subject to the expiry date)
    #[default]
    Open,
    /// Posting reached its expiry date
    Expired,
    /// Posting was closed by the employer
    Closed,
}

impl JobStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "open",
            JobStatus::Expired => "expired",
            JobStatus::Closed => "closed",
        }
    }

    /// Parse a stored status value, accepting legacy vocabularies.
    ///
    /// Unknown values map to `Closed` so rows with a corrupt status never
    /// surface as live postings.
    pub fn from_db(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "open" | "active" => JobStatus::Open,
            "expired" => JobStatus::Expired,
            _ => JobStatus::Closed,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Posting invariant violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PostingError {
    #[error("salary_to ({to}) is below salary_from ({from})")]
    InvertedSalaryRange { from: i64, to: i64 },

    #[error("expire_date {expire} is not after post_date {post}")]
    ExpiresBeforePosted { post: NaiveDate, expire: NaiveDate },
}

/// A single job advertisement row, joined with its company columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub contract_type: Option<String>,
    pub level: Option<String>,
    pub salary_from: Option<i64>,
    pub salary_to: Option<i64>,
    pub required_exp_years: Option<i32>,
    /// Number of openings on this posting
    pub quantity: Option<i32>,
    pub post_date: NaiveDate,
    pub expire_date: NaiveDate,
    pub status: JobStatus,
    pub applicant_count: i64,
    pub employer_id: i64,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
}

impl JobPosting {
    /// Check the posting invariants: a non-inverted salary range and an
    /// expiry date strictly after the posting date.
    pub fn validate(&self) -> Result<(), PostingError> {
        if let (Some(from), Some(to)) = (self.salary_from, self.salary_to) {
            if to < from {
                return Err(PostingError::InvertedSalaryRange { from, to });
            }
        }
        if self.expire_date <= self.post_date {
            return Err(PostingError::ExpiresBeforePosted {
                post: self.post_date,
                expire: self.expire_date,
            });
        }
        Ok(())
    }

    /// Whether the posting's salary range intersects the filter window.
    ///
    /// Mirrors the store predicate: the lower filter bound is checked
    /// against the posting's upper end and vice versa, so a wide posting
    /// range can match a narrow window and the other way around. An open
    /// bound always matches.
    pub fn salary_overlaps(&self, min: Option<i64>, max: Option<i64>) -> bool {
        let min_ok = match (min, self.salary_to) {
            (Some(min), Some(to)) => to >= min,
            _ => true,
        };
        let max_ok = match (max, self.salary_from) {
            (Some(max), Some(from)) => from <= max,
            _ => true,
        };
        min_ok && max_ok
    }

    /// Whether the posting is in the active bucket as of `today`.
    ///
    /// Bucket membership is derived, not stored: an open posting falls out
    /// of the active bucket the day after its expiry date without any write.
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.status == JobStatus::Open && self.expire_date >= today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting() -> JobPosting {
        JobPosting {
            id: 1,
            title: "Backend Engineer".to_string(),
            description: None,
            location: Some("Berlin".to_string()),
            job_type: Some("Full-time".to_string()),
            contract_type: Some("Permanent".to_string()),
            level: Some("Senior".to_string()),
            salary_from: Some(2000),
            salary_to: Some(5000),
            required_exp_years: Some(3),
            quantity: Some(2),
            post_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            expire_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            status: JobStatus::Open,
            applicant_count: 0,
            employer_id: 7,
            company_name: Some("Acme".to_string()),
            company_logo: None,
        }
    }

    #[test]
    fn test_status_from_db_legacy_vocabularies() {
        assert_eq!(JobStatus::from_db("OPEN"), JobStatus::Open);
        assert_eq!(JobStatus::from_db("Active"), JobStatus::Open);
        assert_eq!(JobStatus::from_db("Expired"), JobStatus::Expired);
        assert_eq!(JobStatus::from_db("CLOSED"), JobStatus::Closed);
        assert_eq!(JobStatus::from_db("garbage"), JobStatus::Closed);
    }

    #[test]
    fn test_validate_accepts_well_formed_posting() {
        assert!(posting().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_salary_range() {
        let mut p = posting();
        p.salary_from = Some(5000);
        p.salary_to = Some(2000);
        assert_eq!(
            p.validate(),
            Err(PostingError::InvertedSalaryRange { from: 5000, to: 2000 })
        );
    }

    #[test]
    fn test_validate_rejects_expiry_before_posting() {
        let mut p = posting();
        p.expire_date = p.post_date;
        assert!(matches!(
            p.validate(),
            Err(PostingError::ExpiresBeforePosted { .. })
        ));
    }

    #[test]
    fn test_salary_overlap_not_containment() {
        // 2000-5000 overlaps a window starting at 4000 even though
        // 4000 > salary_from
        let p = posting();
        assert!(p.salary_overlaps(Some(4000), None));

        // 2000-3000 ends below the window, no overlap
        let mut low = posting();
        low.salary_to = Some(3000);
        assert!(!low.salary_overlaps(Some(4000), None));

        // Window above: 2000-5000 vs max 1000 fails on the lower end
        assert!(!p.salary_overlaps(None, Some(1000)));

        // Open bounds always match
        assert!(p.salary_overlaps(None, None));
    }

    #[test]
    fn test_active_bucket_flips_on_expiry() {
        let p = posting();
        let before = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let after = NaiveDate::from_ymd_opt(2026, 3, 11).unwrap();
        assert!(p.is_active(before));
        assert!(!p.is_active(after));
    }

    #[test]
    fn test_closed_posting_is_never_active() {
        let mut p = posting();
        p.status = JobStatus::Closed;
        assert!(!p.is_active(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
    }
}
