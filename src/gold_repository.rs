use crate::db::GOLD_TABLE;
use crate::errors::{AppError, ResultExt};
use crate::gold_filter::GoldFilter;
use crate::models::{GoldEnrichmentRecord, Kpis, Page, PageRequest, PaginationMeta};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

/// Read access to the gold-layer reporting table.
pub struct GoldRepository {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct OverviewRow {
    total_jobs: i64,
    taxa_sucesso: Option<f64>,
    tempo_medio_minutos: Option<f64>,
}

/// Null aggregates (empty table) count as zero before rounding.
impl From<OverviewRow> for Kpis {
    fn from(row: OverviewRow) -> Self {
        Kpis {
            total_enriquecimentos: row.total_jobs,
            taxa_sucesso_percentual: round2(row.taxa_sucesso.unwrap_or(0.0)),
            tempo_medio_minutos: round2(row.tempo_medio_minutos.unwrap_or(0.0)),
        }
    }
}

impl GoldRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Total jobs, success percentage and mean duration over the whole table.
    pub async fn overview(&self) -> Result<Kpis, AppError> {
        let sql = format!(
            r#"
            SELECT
                COUNT(*)::bigint AS total_jobs,
                (AVG(CASE WHEN processamento_sucesso THEN 1 ELSE 0 END) * 100)::float8 AS taxa_sucesso,
                AVG(duracao_processamento_minutos)::float8 AS tempo_medio_minutos
            FROM {}
            "#,
            GOLD_TABLE
        );

        let row = sqlx::query_as::<_, OverviewRow>(&sql)
            .fetch_one(&self.pool)
            .await
            .context("overview query")?;

        Ok(Kpis::from(row))
    }

    /// One page of records matching `filter`, newest first, plus the filtered total.
    ///
    /// Both statements run on the same pooled connection, which is returned to
    /// the pool when this function exits.
    pub async fn list_enrichments(
        &self,
        filter: &GoldFilter,
        request: PageRequest,
    ) -> Result<Page<GoldEnrichmentRecord>, AppError> {
        let mut conn = self.pool.acquire().await.context("acquire connection")?;

        let mut rows_query = select_page_query(filter, request);
        let data = rows_query
            .build_query_as::<GoldEnrichmentRecord>()
            .fetch_all(&mut *conn)
            .await
            .context("listing query")?;

        let mut count_query = count_query(filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&mut *conn)
            .await
            .context("count query")?;

        tracing::debug!(
            "Gold listing: {} rows on page {}, {} matching in total",
            data.len(),
            request.page,
            total
        );

        Ok(Page::new(
            PaginationMeta::new(request, total.max(0) as u64),
            data,
        ))
    }
}

fn select_page_query(filter: &GoldFilter, request: PageRequest) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT \
            id_enriquecimento::text AS id_enriquecimento, \
            nome_workspace::text AS nome_workspace, \
            status_processamento::text AS status_processamento, \
            categoria_tamanho_job::text AS categoria_tamanho_job, \
            data_criacao::timestamp AS data_criacao, \
            duracao_processamento_minutos::float8 AS duracao_processamento_minutos \
         FROM {}",
        GOLD_TABLE
    ));
    filter.push_where(&mut qb);
    qb.push(" ORDER BY data_criacao DESC LIMIT ");
    qb.push_bind(request.limit as i64);
    qb.push(" OFFSET ");
    qb.push_bind(request.offset() as i64);
    qb
}

fn count_query(filter: &GoldFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", GOLD_TABLE));
    filter.push_where(&mut qb);
    qb
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(12.0), 12.0);
        assert_eq!(round2(0.004), 0.0);
    }

    #[test]
    fn empty_table_aggregates_become_zero() {
        let kpis = Kpis::from(OverviewRow {
            total_jobs: 0,
            taxa_sucesso: None,
            tempo_medio_minutos: None,
        });

        assert_eq!(kpis.total_enriquecimentos, 0);
        assert_eq!(kpis.taxa_sucesso_percentual, 0.0);
        assert_eq!(kpis.tempo_medio_minutos, 0.0);
    }

    #[test]
    fn aggregates_are_rounded_to_two_decimals() {
        let kpis = Kpis::from(OverviewRow {
            total_jobs: 3,
            taxa_sucesso: Some(33.333333333),
            tempo_medio_minutos: Some(6.666666667),
        });

        assert_eq!(kpis.total_enriquecimentos, 3);
        assert_eq!(kpis.taxa_sucesso_percentual, 33.33);
        assert_eq!(kpis.tempo_medio_minutos, 6.67);
    }

    #[test]
    fn page_query_orders_and_paginates_after_filter() {
        let filter = GoldFilter::from_params(None, Some("COMPLETED"), None, None).unwrap();
        let qb = select_page_query(&filter, PageRequest { page: 3, limit: 10 });
        let sql = qb.sql();

        assert!(sql.ends_with(
            "FROM dw.gold_enrichments WHERE status_processamento = $1 \
             ORDER BY data_criacao DESC LIMIT $2 OFFSET $3"
        ));
    }

    #[test]
    fn unfiltered_queries_have_no_where() {
        let filter = GoldFilter::default();
        let page = select_page_query(&filter, PageRequest { page: 1, limit: 10 });
        let count = count_query(&filter);

        assert!(!page.sql().contains("WHERE"));
        assert!(page.sql().ends_with("ORDER BY data_criacao DESC LIMIT $1 OFFSET $2"));
        assert_eq!(count.sql(), "SELECT COUNT(*) FROM dw.gold_enrichments");
    }

    #[test]
    fn count_query_shares_the_predicate() {
        let filter =
            GoldFilter::from_params(Some("ws-9"), None, Some("2024-01-01"), None).unwrap();
        assert_eq!(
            count_query(&filter).sql(),
            "SELECT COUNT(*) FROM dw.gold_enrichments \
             WHERE id_workspace::text = $1 AND data_criacao >= $2"
        );
    }
}
