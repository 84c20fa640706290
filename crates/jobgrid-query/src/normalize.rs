//! Filter normalization.
//!
//! Converts raw, string-typed, possibly-repeated query input into one
//! canonical [`FilterCriteria`] before any query logic runs. The policy is
//! permissive by design: unparseable numerics fall back to defaults,
//! unknown enum values fall back to their defaults, and absent multi-value
//! fields mean "no constraint" rather than an empty-set exclusion. Nothing
//! in here returns an error.

use serde::Deserialize;

use jobgrid_models::{FilterCriteria, PageRequest, SortKey, StatusBucket, DEFAULT_PAGE_SIZE};

/// A query parameter that may arrive as a single string (optionally
/// comma-separated) or as a repeated/array value.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MultiParam {
    One(String),
    Many(Vec<String>),
}

impl MultiParam {
    /// Flatten into trimmed, non-empty values. Comma-separated strings are
    /// split so `"Full-time,Part-time"` and `["Full-time","Part-time"]`
    /// are equivalent.
    pub fn into_values(self) -> Vec<String> {
        let raw = match self {
            MultiParam::One(s) => vec![s],
            MultiParam::Many(v) => v,
        };
        raw.iter()
            .flat_map(|s| s.split(','))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Raw listing parameters as received from the HTTP layer.
///
/// Every field is optional and string-typed; type coercion happens in
/// [`normalize`], never in the handlers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawJobQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub keyword: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "jobType", alias = "job_type")]
    pub job_type: Option<MultiParam>,
    #[serde(rename = "contractType", alias = "contract_type")]
    pub contract_type: Option<MultiParam>,
    pub level: Option<MultiParam>,
    #[serde(rename = "salaryMin", alias = "salary_min")]
    pub salary_min: Option<String>,
    #[serde(rename = "salaryMax", alias = "salary_max")]
    pub salary_max: Option<String>,
    #[serde(rename = "sortBy", alias = "sort_by")]
    pub sort_by: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "employerId", alias = "employer_id")]
    pub employer_id: Option<String>,
}

impl RawJobQuery {
    /// Parse a raw query string.
    ///
    /// Multi-value fields accept the repeated-key form
    /// (`?jobType=a&jobType=b`) as well as comma-separated values; repeated
    /// keys accumulate instead of overwriting. Unknown keys are ignored.
    /// Like the rest of the normalizer this never fails: any query string
    /// yields a usable `RawJobQuery`.
    pub fn from_query_str(query: &str) -> Self {
        let mut raw = RawJobQuery::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let value = value.into_owned();
            match key.as_ref() {
                "status" => raw.status = Some(value),
                "search" => raw.search = Some(value),
                "keyword" => raw.keyword = Some(value),
                "location" => raw.location = Some(value),
                "jobType" | "job_type" => push_multi(&mut raw.job_type, value),
                "contractType" | "contract_type" => push_multi(&mut raw.contract_type, value),
                "level" => push_multi(&mut raw.level, value),
                "salaryMin" | "salary_min" => raw.salary_min = Some(value),
                "salaryMax" | "salary_max" => raw.salary_max = Some(value),
                "sortBy" | "sort_by" => raw.sort_by = Some(value),
                "page" => raw.page = Some(value),
                "limit" => raw.limit = Some(value),
                "employerId" | "employer_id" => raw.employer_id = Some(value),
                _ => {}
            }
        }
        raw
    }
}

/// Fold another occurrence of a multi-value key into the slot.
fn push_multi(slot: &mut Option<MultiParam>, value: String) {
    *slot = Some(match slot.take() {
        None => MultiParam::One(value),
        Some(MultiParam::One(first)) => MultiParam::Many(vec![first, value]),
        Some(MultiParam::Many(mut values)) => {
            values.push(value);
            MultiParam::Many(values)
        }
    });
}

/// Canonical output of the normalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedQuery {
    pub filter: FilterCriteria,
    pub page: PageRequest,
    pub sort: SortKey,
}

/// Parse a positive integer, falling back to a default. Non-numeric and
/// non-positive input is replaced, never rejected.
fn positive_or(value: Option<&str>, fallback: u32) -> u32 {
    value
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .map(|n| n.min(u32::MAX as i64) as u32)
        .unwrap_or(fallback)
}

/// Parse a positive amount; anything else means "no bound".
fn positive_amount(value: Option<&str>) -> Option<i64> {
    value
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Normalize raw parameters into a canonical query. Pure function of its
/// input; this is the only place raw request values are interpreted.
pub fn normalize(raw: &RawJobQuery) -> NormalizedQuery {
    let filter = FilterCriteria {
        bucket: raw
            .status
            .as_deref()
            .map(StatusBucket::from_str_or_default)
            .unwrap_or_default(),
        // `search` wins over the legacy `keyword` alias when both are sent
        keyword: non_empty(raw.search.as_deref()).or_else(|| non_empty(raw.keyword.as_deref())),
        location: non_empty(raw.location.as_deref()),
        job_types: raw.job_type.clone().map(MultiParam::into_values).unwrap_or_default(),
        contract_types: raw
            .contract_type
            .clone()
            .map(MultiParam::into_values)
            .unwrap_or_default(),
        levels: raw.level.clone().map(MultiParam::into_values).unwrap_or_default(),
        salary_min: positive_amount(raw.salary_min.as_deref()),
        salary_max: positive_amount(raw.salary_max.as_deref()),
        employer_id: positive_amount(raw.employer_id.as_deref()),
    };

    let page = PageRequest::clamped(
        positive_or(raw.page.as_deref(), 1),
        positive_or(raw.limit.as_deref(), DEFAULT_PAGE_SIZE),
    );

    let sort = raw
        .sort_by
        .as_deref()
        .map(SortKey::from_str_or_default)
        .unwrap_or_default();

    NormalizedQuery { filter, page, sort }
}
