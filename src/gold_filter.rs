//! Filter predicates for the gold-layer listing.
//!
//! Every user-supplied value is pushed as a bound parameter; only the static
//! column/operator fragments below ever reach the SQL text.

use crate::errors::AppError;
use chrono::NaiveDate;
use sqlx::{Postgres, QueryBuilder};

/// One supplied filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    WorkspaceIs(String),
    StatusIs(String),
    CreatedFrom(NaiveDate),
    CreatedUntil(NaiveDate),
}

impl Predicate {
    fn sql_prefix(&self) -> &'static str {
        match self {
            Predicate::WorkspaceIs(_) => "id_workspace::text = ",
            Predicate::StatusIs(_) => "status_processamento = ",
            Predicate::CreatedFrom(_) => "data_criacao >= ",
            Predicate::CreatedUntil(_) => "data_criacao <= ",
        }
    }

    fn push_to(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(self.sql_prefix());
        match self {
            Predicate::WorkspaceIs(value) | Predicate::StatusIs(value) => {
                qb.push_bind(value.clone());
            }
            Predicate::CreatedFrom(date) | Predicate::CreatedUntil(date) => {
                qb.push_bind(*date);
            }
        }
    }
}

/// Conjunction of the filters actually supplied, in a fixed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoldFilter {
    predicates: Vec<Predicate>,
}

impl GoldFilter {
    /// Builds the filter from raw query values. Blank values count as absent;
    /// dates must be `YYYY-MM-DD`.
    pub fn from_params(
        id_workspace: Option<&str>,
        status: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Self, AppError> {
        let mut predicates = Vec::new();

        if let Some(workspace) = non_blank(id_workspace) {
            predicates.push(Predicate::WorkspaceIs(workspace.to_string()));
        }
        if let Some(status) = non_blank(status) {
            predicates.push(Predicate::StatusIs(status.to_string()));
        }
        if let Some(start) = non_blank(start_date) {
            predicates.push(Predicate::CreatedFrom(parse_date("start_date", start)?));
        }
        if let Some(end) = non_blank(end_date) {
            predicates.push(Predicate::CreatedUntil(parse_date("end_date", end)?));
        }

        Ok(Self { predicates })
    }

    #[cfg(test)]
    fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Appends ` WHERE a AND b ...`, or nothing when no filter was supplied.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        for (i, predicate) in self.predicates.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            predicate.push_to(qb);
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        AppError::Validation(format!(
            "{} must be a date in YYYY-MM-DD format, got '{}': {}",
            field, value, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(filter: &GoldFilter) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM dw.gold_enrichments");
        filter.push_where(&mut qb);
        qb.sql().to_string()
    }

    #[test]
    fn no_filters_emit_no_where() {
        let filter = GoldFilter::from_params(None, None, None, None).unwrap();
        assert!(filter.is_empty());
        assert_eq!(rendered(&filter), "SELECT COUNT(*) FROM dw.gold_enrichments");
    }

    #[test]
    fn blank_filters_are_ignored() {
        let filter = GoldFilter::from_params(Some(""), Some("   "), Some(""), None).unwrap();
        assert!(filter.is_empty());
        assert!(!rendered(&filter).contains("WHERE"));
    }

    #[test]
    fn status_alone_is_the_only_condition() {
        let filter = GoldFilter::from_params(None, Some("COMPLETED"), None, None).unwrap();
        assert_eq!(
            filter.predicates(),
            &[Predicate::StatusIs("COMPLETED".to_string())]
        );
        assert_eq!(
            rendered(&filter),
            "SELECT COUNT(*) FROM dw.gold_enrichments WHERE status_processamento = $1"
        );
    }

    #[test]
    fn filters_are_joined_with_and() {
        let filter = GoldFilter::from_params(
            Some("ws-1"),
            Some("COMPLETED"),
            Some("2024-01-01"),
            Some("2024-01-31"),
        )
        .unwrap();

        assert_eq!(
            rendered(&filter),
            "SELECT COUNT(*) FROM dw.gold_enrichments WHERE id_workspace::text = $1 \
             AND status_processamento = $2 AND data_criacao >= $3 AND data_criacao <= $4"
        );
    }

    #[test]
    fn user_input_never_reaches_sql_text() {
        let filter =
            GoldFilter::from_params(Some("x' OR '1'='1"), Some("'; DROP TABLE t; --"), None, None)
                .unwrap();
        let sql = rendered(&filter);
        assert!(!sql.contains("OR '1'"));
        assert!(!sql.contains("DROP"));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let err = GoldFilter::from_params(None, None, Some("01/02/2024"), None).unwrap_err();
        assert!(err.to_string().contains("start_date"));

        let err = GoldFilter::from_params(None, None, None, Some("2024-13-01")).unwrap_err();
        assert!(err.to_string().contains("end_date"));
    }

    #[test]
    fn dates_are_typed() {
        let filter = GoldFilter::from_params(None, None, Some("2024-03-05"), None).unwrap();
        assert_eq!(
            filter.predicates(),
            &[Predicate::CreatedFrom(
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
            )]
        );
    }
}
