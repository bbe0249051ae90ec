use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::core::{AppError, Result};
use crate::middleware::{AdminScope, PortalScope};
use crate::modules::clients::models::{Category, Client};
use crate::modules::dashboard::{DashboardView, SessionHub};
use crate::modules::freelancers::models::Freelancer;
use crate::modules::reports::controllers::FilterParams;
use crate::modules::reports::models::FreelancerSummary;
use crate::modules::reports::services::share::pdf_filename;
use crate::modules::sales::models::Sale;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub view: DashboardView,
    pub clients: Vec<Client>,
    pub freelancers: Vec<Freelancer>,
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalReportResponse {
    pub freelancer_name: String,
    pub summary: FreelancerSummary,
    pub sales: Vec<Sale>,
    /// Filename for the externally rendered PDF of this report
    pub pdf_filename: String,
    pub sync_error: Option<String>,
}

/// GET /dashboard
///
/// The session's live view: filtered sales, totals, KPIs, and the
/// collection lists the forms are built from.
pub async fn dashboard(hub: web::Data<SessionHub>, scope: AdminScope) -> Result<HttpResponse> {
    let coordinator = hub.dashboard(&scope.token, &scope.admin_id);

    Ok(HttpResponse::Ok().json(DashboardResponse {
        view: coordinator.view(),
        clients: coordinator.clients(),
        freelancers: coordinator.freelancers(),
        categories: coordinator.categories(),
    }))
}

/// PUT /dashboard/filters
///
/// Replace the session's filter; the view recomputes immediately from
/// the coordinator's own snapshots.
pub async fn set_filters(
    hub: web::Data<SessionHub>,
    scope: AdminScope,
    body: web::Json<FilterParams>,
) -> Result<HttpResponse> {
    let coordinator = hub.dashboard(&scope.token, &scope.admin_id);
    coordinator.set_filter(body.into_inner().into_filter());
    Ok(HttpResponse::Ok().json(coordinator.view()))
}

/// GET /portal/report
///
/// The freelancer's live earnings report.
pub async fn portal_report(hub: web::Data<SessionHub>, scope: PortalScope) -> Result<HttpResponse> {
    let portal = hub
        .portal(&scope.token)
        .ok_or_else(|| AppError::unauthorized("Portal session has ended"))?;

    Ok(HttpResponse::Ok().json(PortalReportResponse {
        pdf_filename: pdf_filename(&scope.freelancer_name),
        freelancer_name: scope.freelancer_name,
        summary: portal.summary(),
        sales: portal.sales(),
        sync_error: portal.sync_error(),
    }))
}

/// GET /portal/notifications
pub async fn portal_notifications(
    hub: web::Data<SessionHub>,
    scope: PortalScope,
) -> Result<HttpResponse> {
    let portal = hub
        .portal(&scope.token)
        .ok_or_else(|| AppError::unauthorized("Portal session has ended"))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "notifications": portal.notifications()
    })))
}

/// Configure routes for the dashboard module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/dashboard")
            .route("", web::get().to(dashboard))
            .route("/filters", web::put().to(set_filters)),
    )
    .service(
        web::scope("/portal")
            .route("/report", web::get().to(portal_report))
            .route("/notifications", web::get().to(portal_notifications)),
    );
}
