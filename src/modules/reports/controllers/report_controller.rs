use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::Result;
use crate::middleware::AdminScope;
use crate::modules::clients::repositories::ClientRepository;
use crate::modules::reports::models::{DashboardKpis, RankedEntry};
use crate::modules::reports::services::csv_export::{export_csv, CSV_FILENAME};
use crate::modules::reports::services::share::mailto_report;
use crate::modules::reports::services::ReportService;
use crate::modules::sales::models::Sale;
use crate::modules::sales::repositories::SaleRepository;
use crate::modules::sales::services::{FreelancerFilter, SaleFilter};
use crate::store::DocumentStore;

/// Filter dimensions as they arrive over the wire, for both report
/// queries and dashboard filter updates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    /// "all" (or absent) for every freelancer, otherwise an exact name
    #[serde(default)]
    pub freelancer: Option<String>,

    /// Comma-separated category names
    #[serde(default)]
    pub categories: Option<String>,

    #[serde(default)]
    pub search: Option<String>,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub unpaid_only: bool,
}

impl FilterParams {
    pub fn into_filter(self) -> SaleFilter {
        let freelancer = match self.freelancer {
            Some(name) if name != "all" && !name.is_empty() => FreelancerFilter::Name(name),
            _ => FreelancerFilter::All,
        };

        let categories = self
            .categories
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        SaleFilter {
            freelancer,
            categories,
            search: self.search.unwrap_or_default(),
            start_date: self.start_date,
            end_date: self.end_date,
            show_unpaid_only: self.unpaid_only,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub kpis: DashboardKpis,
    pub top_freelancers: Vec<RankedEntry>,
    pub top_clients: Vec<RankedEntry>,
}

/// Fetch the admin's sales with the filter applied.
async fn filtered_sales(
    store: web::Data<dyn DocumentStore>,
    admin_id: &str,
    params: FilterParams,
) -> Result<Vec<Sale>> {
    let store = store.into_inner();
    let sales = SaleRepository::new(store.clone()).list(admin_id).await?;
    let clients = ClientRepository::new(store).list(admin_id).await?;
    Ok(params.into_filter().apply(&sales, &clients))
}

/// GET /reports/analytics
///
/// KPI rollup and the top-N charts over the filtered set.
pub async fn analytics(
    store: web::Data<dyn DocumentStore>,
    config: web::Data<Config>,
    scope: AdminScope,
    query: web::Query<FilterParams>,
) -> Result<HttpResponse> {
    let sales = filtered_sales(store, &scope.admin_id, query.into_inner()).await?;
    let report = ReportService::new(config.app.rollup_size);

    Ok(HttpResponse::Ok().json(AnalyticsResponse {
        kpis: report.kpis(&sales),
        top_freelancers: report.top_freelancers_by_commission(&sales),
        top_clients: report.top_clients_by_revenue(&sales),
    }))
}

/// GET /reports/export.csv
///
/// The filtered set as a CSV download. An empty set is a 422, never a
/// silent header-only file.
pub async fn export(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
    query: web::Query<FilterParams>,
) -> Result<HttpResponse> {
    let sales = filtered_sales(store, &scope.admin_id, query.into_inner()).await?;
    let bytes = export_csv(&sales)?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", CSV_FILENAME),
        ))
        .body(bytes))
}

/// GET /reports/share/{freelancer}
///
/// Prefilled mailto link with the freelancer's commission table.
pub async fn share(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let sales = SaleRepository::new(store.into_inner())
        .list(&scope.admin_id)
        .await?;
    let mailto = mailto_report(&path, &sales)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "mailto": mailto })))
}

/// Configure routes for the reports module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/analytics", web::get().to(analytics))
            .route("/export.csv", web::get().to(export))
            .route("/share/{freelancer}", web::get().to(share)),
    );
}
