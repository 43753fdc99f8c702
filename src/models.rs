use crate::errors::AppError;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Largest page size any listing accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

// ============ Source (synthetic) Models ============

/// Kind of contact list an enrichment job processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactType {
    Company,
    Person,
}

/// Processing state reported by the source system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrichmentStatus {
    Completed,
    Processing,
    Failed,
    Canceled,
}

/// Synthetic enrichment job as served by the source listing.
///
/// Generated per request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EnrichmentItem {
    /// Job identifier.
    pub id: Uuid,
    /// Workspace that owns the job.
    pub id_workspace: Uuid,
    /// Display name of the workspace.
    pub workspace_name: String,
    /// Number of contacts submitted for enrichment.
    pub total_contacts: i32,
    pub contact_type: ContactType,
    pub status: EnrichmentStatus,
    pub created_at: DateTime<Utc>,
    /// Always at or after `created_at`.
    pub updated_at: DateTime<Utc>,
}

// ============ Pagination ============

/// Validated page/limit pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Applies defaults and range checks: `page >= 1`, `1 <= limit <= 100`.
    pub fn from_query(
        page: Option<u32>,
        limit: Option<u32>,
        default_limit: u32,
    ) -> Result<Self, AppError> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(default_limit);

        if page < 1 {
            return Err(AppError::Validation("page must be >= 1".to_string()));
        }
        if limit < 1 || limit > MAX_PAGE_SIZE {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        Ok(Self { page, limit })
    }

    /// Rows to skip before this page starts.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub current_page: u32,
    pub items_per_page: u32,
    pub total_items: u64,
    /// `ceil(total_items / items_per_page)`.
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(request: PageRequest, total_items: u64) -> Self {
        Self {
            current_page: request.page,
            items_per_page: request.limit,
            total_items,
            total_pages: total_pages(total_items, request.limit),
        }
    }

    /// Meta for a degraded response: the request echoed back, no items.
    pub fn empty(request: PageRequest) -> Self {
        Self::new(request, 0)
    }
}

pub fn total_pages(total_items: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total_items.div_ceil(limit as u64)
}

/// The `{meta, data}` envelope returned by every listing.
///
/// `error` is only present on a degraded analytics response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    SourceEnrichmentPage = Page<EnrichmentItem>,
    GoldEnrichmentPage = Page<GoldEnrichmentRecord>
)]
pub struct Page<T> {
    pub meta: PaginationMeta,
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Page<T> {
    pub fn new(meta: PaginationMeta, data: Vec<T>) -> Self {
        Self {
            meta,
            data,
            error: None,
        }
    }

    pub fn degraded(request: PageRequest, error: String) -> Self {
        Self {
            meta: PaginationMeta::empty(request),
            data: Vec::new(),
            error: Some(error),
        }
    }
}

// ============ Gold Layer Models ============

/// Row of the warehouse's aggregated enrichment table.
///
/// The table is owned elsewhere; columns are cast to these types when selected.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct GoldEnrichmentRecord {
    pub id_enriquecimento: Option<String>,
    pub nome_workspace: Option<String>,
    pub status_processamento: Option<String>,
    pub categoria_tamanho_job: Option<String>,
    pub data_criacao: Option<NaiveDateTime>,
    pub duracao_processamento_minutos: Option<f64>,
}

/// Headline numbers of the analytics overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Kpis {
    pub total_enriquecimentos: i64,
    /// Share of successful jobs, 0-100, two decimals.
    pub taxa_sucesso_percentual: f64,
    /// Mean processing duration in minutes, two decimals.
    pub tempo_medio_minutos: f64,
}

/// Body of `GET /analytics/overview`.
///
/// When the warehouse cannot be queried the endpoint still answers 200, with a
/// placeholder in `kpis` and the failure text in `error`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum OverviewResponse {
    Ready { kpis: Kpis },
    Degraded { kpis: String, error: String },
}

// ============ Request Models ============

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SourceListQuery {
    /// Page number, starting at 1.
    pub page: Option<u32>,
    /// Items per page, at most 100. Defaults to 50.
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GoldListQuery {
    /// Page number, starting at 1.
    pub page: Option<u32>,
    /// Items per page, at most 100. Defaults to 10.
    pub limit: Option<u32>,
    /// Exact workspace id.
    pub id_workspace: Option<String>,
    /// Exact processing status.
    pub status: Option<String>,
    /// Lower bound on the creation date (YYYY-MM-DD).
    pub start_date: Option<String>,
    /// Upper bound on the creation date (YYYY-MM-DD).
    pub end_date: Option<String>,
}
