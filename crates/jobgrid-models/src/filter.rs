//! Listing filters and sort keys.

use serde::{Deserialize, Serialize};

/// Coarse status grouping for listings.
///
/// A bucket is derived from the stored status plus the expiry date at query
/// time; it is not a stored column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    /// No status restriction (default)
    #[default]
    All,
    /// Open and not yet past the expiry date
    Active,
    /// Expired or closed, or past the expiry date
    Expired,
}

impl StatusBucket {
    /// Parse from string, returning default if invalid.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "active" => Self::Active,
            "expired" => Self::Expired,
            _ => Self::All,
        }
    }
}

/// Supported sort orders for job listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Most recent posting date first (default)
    #[default]
    Latest,
    /// Oldest posting date first
    Oldest,
    /// Highest salary ceiling first
    SalaryDesc,
    /// Lowest salary floor first
    SalaryAsc,
    /// Most applicants first
    Popular,
}

impl SortKey {
    /// Parse from string, returning default if invalid.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "latest" => Self::Latest,
            "oldest" => Self::Oldest,
            "salary_desc" => Self::SalaryDesc,
            "salary_asc" => Self::SalaryAsc,
            "popular" => Self::Popular,
            _ => Self::Latest,
        }
    }
}

/// Canonical, fully-typed filter set for a job listing query.
///
/// Absent fields mean "no constraint": an empty multi-value list does not
/// exclude everything, it constrains nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub bucket: StatusBucket,
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub job_types: Vec<String>,
    pub contract_types: Vec<String>,
    pub levels: Vec<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub employer_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_bucket_parsing() {
        assert_eq!(StatusBucket::from_str_or_default("active"), StatusBucket::Active);
        assert_eq!(StatusBucket::from_str_or_default("Expired"), StatusBucket::Expired);
        assert_eq!(StatusBucket::from_str_or_default("all"), StatusBucket::All);
        assert_eq!(StatusBucket::from_str_or_default("bogus"), StatusBucket::All);
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!(SortKey::from_str_or_default("oldest"), SortKey::Oldest);
        assert_eq!(SortKey::from_str_or_default("salary_desc"), SortKey::SalaryDesc);
        assert_eq!(SortKey::from_str_or_default("POPULAR"), SortKey::Popular);
        assert_eq!(SortKey::from_str_or_default("bogus"), SortKey::Latest);
        assert_eq!(SortKey::from_str_or_default(""), SortKey::Latest);
    }
}
