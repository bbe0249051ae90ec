use actix_web::{web, HttpResponse};

use crate::core::Result;
use crate::middleware::AdminScope;
use crate::modules::freelancers::repositories::FreelancerRepository;
use crate::modules::freelancers::services::{FreelancerDraft, FreelancerService};
use crate::store::DocumentStore;

/// GET /freelancers
///
/// The account's freelancers, lookup tokens included so the admin can
/// share them.
pub async fn list_freelancers(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
) -> Result<HttpResponse> {
    let freelancers = FreelancerRepository::new(store.into_inner())
        .list_for_admin(&scope.admin_id)
        .await?;
    Ok(HttpResponse::Ok().json(freelancers))
}

/// POST /freelancers
pub async fn create_freelancer(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
    body: web::Json<FreelancerDraft>,
) -> Result<HttpResponse> {
    let id = FreelancerService::new(FreelancerRepository::new(store.into_inner()))
        .add(&scope.admin_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(serde_json::json!({ "id": id })))
}

/// PUT /freelancers/{id}
pub async fn update_freelancer(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
    path: web::Path<String>,
    body: web::Json<FreelancerDraft>,
) -> Result<HttpResponse> {
    FreelancerService::new(FreelancerRepository::new(store.into_inner()))
        .update(&scope.admin_id, &path, body.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /freelancers/{id}
pub async fn delete_freelancer(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    FreelancerService::new(FreelancerRepository::new(store.into_inner()))
        .remove(&scope.admin_id, &path)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure routes for the freelancers module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/freelancers")
            .route("", web::get().to(list_freelancers))
            .route("", web::post().to(create_freelancer))
            .route("/{id}", web::put().to(update_freelancer))
            .route("/{id}", web::delete().to(delete_freelancer)),
    );
}
