use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::middleware::AdminScope;
use crate::modules::clients::repositories::ClientRepository;
use crate::modules::freelancers::repositories::FreelancerRepository;
use crate::modules::reports::controllers::FilterParams;
use crate::modules::sales::models::Sale;
use crate::modules::sales::repositories::SaleRepository;
use crate::modules::sales::services::commission::{totals_of, SaleTotals};
use crate::modules::sales::services::{BulkSaleDraft, SaleDraft, SaleService};
use crate::store::DocumentStore;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleListResponse {
    pub sales: Vec<Sale>,
    pub totals: SaleTotals,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaidDateBody {
    pub paid_date: NaiveDate,
}

fn sale_service(store: &web::Data<dyn DocumentStore>) -> SaleService {
    let store = store.clone().into_inner();
    SaleService::new(
        SaleRepository::new(store.clone()),
        ClientRepository::new(store.clone()),
        FreelancerRepository::new(store),
    )
}

/// GET /sales
///
/// The filtered sale table, newest first, with footer totals.
pub async fn list_sales(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
    query: web::Query<FilterParams>,
) -> Result<HttpResponse> {
    let store = store.into_inner();
    let sales = SaleRepository::new(store.clone())
        .list(&scope.admin_id)
        .await?;
    let clients = ClientRepository::new(store).list(&scope.admin_id).await?;

    let filtered = query.into_inner().into_filter().apply(&sales, &clients);
    let totals = totals_of(&filtered);

    Ok(HttpResponse::Ok().json(SaleListResponse {
        sales: filtered,
        totals,
    }))
}

/// POST /sales
pub async fn create_sale(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
    body: web::Json<SaleDraft>,
) -> Result<HttpResponse> {
    let id = sale_service(&store)
        .record(&scope.admin_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(serde_json::json!({ "id": id })))
}

/// POST /sales/bulk
pub async fn create_bulk_sales(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
    body: web::Json<BulkSaleDraft>,
) -> Result<HttpResponse> {
    let ids = sale_service(&store)
        .record_bulk(&scope.admin_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(serde_json::json!({ "ids": ids })))
}

/// PUT /sales/{id}
pub async fn update_sale(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
    path: web::Path<String>,
    body: web::Json<SaleDraft>,
) -> Result<HttpResponse> {
    sale_service(&store)
        .update(&scope.admin_id, &path, body.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /sales/{id}
pub async fn delete_sale(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    sale_service(&store).remove(&scope.admin_id, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /sales/{id}/paid
pub async fn mark_paid(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
    path: web::Path<String>,
    body: web::Json<PaidDateBody>,
) -> Result<HttpResponse> {
    sale_service(&store)
        .mark_paid(&scope.admin_id, &path, body.paid_date)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /sales/{id}/unpaid
pub async fn mark_unpaid(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    sale_service(&store)
        .mark_unpaid(&scope.admin_id, &path)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure routes for the sales module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/sales")
            .route("", web::get().to(list_sales))
            .route("", web::post().to(create_sale))
            .route("/bulk", web::post().to(create_bulk_sales))
            .route("/{id}", web::put().to(update_sale))
            .route("/{id}", web::delete().to(delete_sale))
            .route("/{id}/paid", web::post().to(mark_paid))
            .route("/{id}/unpaid", web::post().to(mark_unpaid)),
    );
}
