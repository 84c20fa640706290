//! SQL composition.
//!
//! Builds the WHERE clause and ORDER BY fragment for a listing query.
//! Predicates are emitted in a fixed order independent of which filters are
//! present, so equivalent filter sets always produce the same SQL text and
//! the same plan-cache entry. User-supplied values only ever travel through
//! [`SqlParam`]; the clause text itself is entirely code-controlled.

use jobgrid_models::{FilterCriteria, SortKey, StatusBucket};

/// A positional bind parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Str(String),
    Int(i64),
}

/// An ordered list of predicate fragments plus their bind parameters.
///
/// The page query and the count query must be built from the same
/// `SqlFilter` so the reported total always matches what the page could
/// contain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFilter {
    pub clauses: Vec<String>,
    pub params: Vec<SqlParam>,
}

impl SqlFilter {
    fn push(&mut self, clause: impl Into<String>) {
        self.clauses.push(clause.into());
    }

    fn bind_str(&mut self, value: impl Into<String>) {
        self.params.push(SqlParam::Str(value.into()));
    }

    fn bind_int(&mut self, value: i64) {
        self.params.push(SqlParam::Int(value));
    }

    /// Render the full `WHERE ...` fragment, or an empty string when the
    /// filter is unconstrained.
    pub fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }
}

/// `?, ?, ...` for an IN list of `n` values.
fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}

/// Build the WHERE clause for a filter set.
///
/// Predicate order is fixed: bucket, keyword, location, job-type set,
/// contract-type set, level set, salary bounds, employer.
pub fn compose_filters(filter: &FilterCriteria) -> SqlFilter {
    let mut sql = SqlFilter::default();

    match filter.bucket {
        StatusBucket::All => {}
        // Bucket membership is evaluated against the clock at query time,
        // so an open posting drops out of `active` the day it expires.
        StatusBucket::Active => {
            sql.push("(j.status = 'open' AND j.expire_date >= CURDATE())");
        }
        StatusBucket::Expired => {
            sql.push("(j.status IN ('expired','closed') OR j.expire_date < CURDATE())");
        }
    }

    if let Some(keyword) = &filter.keyword {
        let pattern = format!("%{}%", keyword);
        sql.push("(j.title LIKE ? OR c.company_name LIKE ? OR c.industry LIKE ?)");
        sql.bind_str(pattern.clone());
        sql.bind_str(pattern.clone());
        sql.bind_str(pattern);
    }

    if let Some(location) = &filter.location {
        sql.push("j.location LIKE ?");
        sql.bind_str(format!("%{}%", location));
    }

    if !filter.job_types.is_empty() {
        sql.push(format!("j.job_type IN ({})", placeholders(filter.job_types.len())));
        for value in &filter.job_types {
            sql.bind_str(value.clone());
        }
    }

    if !filter.contract_types.is_empty() {
        sql.push(format!(
            "j.contract_type IN ({})",
            placeholders(filter.contract_types.len())
        ));
        for value in &filter.contract_types {
            sql.bind_str(value.clone());
        }
    }

    if !filter.levels.is_empty() {
        sql.push(format!("j.level IN ({})", placeholders(filter.levels.len())));
        for value in &filter.levels {
            sql.bind_str(value.clone());
        }
    }

    // Range-overlap semantics: a posting matches when its salary range
    // intersects the filter window, not when one contains the other.
    if let Some(min) = filter.salary_min {
        sql.push("j.salary_to >= ?");
        sql.bind_int(min);
    }

    if let Some(max) = filter.salary_max {
        sql.push("j.salary_from <= ?");
        sql.bind_int(max);
    }

    if let Some(employer_id) = filter.employer_id {
        sql.push("j.employer_id = ?");
        sql.bind_int(employer_id);
    }

    sql
}

/// Resolve the ORDER BY fragment for a sort key. Every fragment is a fixed
/// string; nothing user-supplied reaches the ORDER BY.
pub fn order_by(sort: SortKey) -> &'static str {
    match sort {
        SortKey::Latest => "j.post_date DESC",
        SortKey::Oldest => "j.post_date ASC",
        SortKey::SalaryDesc => "j.salary_to DESC",
        SortKey::SalaryAsc => "j.salary_from ASC",
        SortKey::Popular => "j.applicant_count DESC",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_produces_no_where() {
        let sql = compose_filters(&FilterCriteria::default());
        assert!(sql.clauses.is_empty());
        assert!(sql.params.is_empty());
        assert_eq!(sql.where_sql(), "");
    }

    #[test]
    fn test_active_bucket_checks_status_and_expiry() {
        let filter = FilterCriteria {
            bucket: StatusBucket::Active,
            ..Default::default()
        };
        let sql = compose_filters(&filter);
        assert_eq!(
            sql.clauses,
            vec!["(j.status = 'open' AND j.expire_date >= CURDATE())"]
        );
        assert!(sql.params.is_empty());
    }

    #[test]
    fn test_keyword_binds_three_patterns() {
        let filter = FilterCriteria {
            keyword: Some("rust".to_string()),
            ..Default::default()
        };
        let sql = compose_filters(&filter);
        assert_eq!(sql.clauses.len(), 1);
        assert_eq!(
            sql.params,
            vec![
                SqlParam::Str("%rust%".to_string()),
                SqlParam::Str("%rust%".to_string()),
                SqlParam::Str("%rust%".to_string()),
            ]
        );
    }

    #[test]
    fn test_set_membership_binds_each_value() {
        let filter = FilterCriteria {
            job_types: vec!["Full-time".to_string(), "Part-time".to_string()],
            ..Default::default()
        };
        let sql = compose_filters(&filter);
        assert_eq!(sql.clauses, vec!["j.job_type IN (?,?)"]);
        assert_eq!(
            sql.params,
            vec![
                SqlParam::Str("Full-time".to_string()),
                SqlParam::Str("Part-time".to_string()),
            ]
        );
    }

    #[test]
    fn test_salary_filter_is_overlap_not_containment() {
        let filter = FilterCriteria {
            salary_min: Some(4000),
            salary_max: Some(6000),
            ..Default::default()
        };
        let sql = compose_filters(&filter);
        // min bound checks the posting's *upper* end, max bound the *lower*
        assert_eq!(sql.clauses, vec!["j.salary_to >= ?", "j.salary_from <= ?"]);
        assert_eq!(sql.params, vec![SqlParam::Int(4000), SqlParam::Int(6000)]);
    }

    #[test]
    fn test_predicate_order_is_fixed() {
        let full = FilterCriteria {
            bucket: StatusBucket::Active,
            keyword: Some("rust".to_string()),
            location: Some("Berlin".to_string()),
            job_types: vec!["Full-time".to_string()],
            contract_types: vec!["Permanent".to_string()],
            levels: vec!["Senior".to_string()],
            salary_min: Some(1000),
            salary_max: Some(9000),
            employer_id: Some(7),
        };
        let sql = compose_filters(&full);
        assert_eq!(
            sql.clauses,
            vec![
                "(j.status = 'open' AND j.expire_date >= CURDATE())",
                "(j.title LIKE ? OR c.company_name LIKE ? OR c.industry LIKE ?)",
                "j.location LIKE ?",
                "j.job_type IN (?)",
                "j.contract_type IN (?)",
                "j.level IN (?)",
                "j.salary_to >= ?",
                "j.salary_from <= ?",
                "j.employer_id = ?",
            ]
        );

        // A sparse filter keeps the same relative order
        let sparse = FilterCriteria {
            levels: vec!["Senior".to_string()],
            employer_id: Some(7),
            ..Default::default()
        };
        let sql = compose_filters(&sparse);
        assert_eq!(sql.clauses, vec!["j.level IN (?)", "j.employer_id = ?"]);
    }

    #[test]
    fn test_where_sql_joins_with_and() {
        let filter = FilterCriteria {
            location: Some("Berlin".to_string()),
            salary_min: Some(1000),
            ..Default::default()
        };
        assert_eq!(
            compose_filters(&filter).where_sql(),
            "WHERE j.location LIKE ? AND j.salary_to >= ?"
        );
    }

    #[test]
    fn test_order_by_fragments() {
        assert_eq!(order_by(SortKey::Latest), "j.post_date DESC");
        assert_eq!(order_by(SortKey::Oldest), "j.post_date ASC");
        assert_eq!(order_by(SortKey::SalaryDesc), "j.salary_to DESC");
        assert_eq!(order_by(SortKey::SalaryAsc), "j.salary_from ASC");
        assert_eq!(order_by(SortKey::Popular), "j.applicant_count DESC");
    }
}
