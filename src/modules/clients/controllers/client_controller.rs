use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::Result;
use crate::middleware::AdminScope;
use crate::modules::clients::repositories::{CategoryRepository, ClientRepository};
use crate::modules::clients::services::{ClientDraft, ClientService};
use crate::store::DocumentStore;

#[derive(Debug, Deserialize)]
pub struct CategoryBody {
    pub name: String,
}

fn client_service(store: &web::Data<dyn DocumentStore>) -> ClientService {
    let store = store.clone().into_inner();
    ClientService::new(
        ClientRepository::new(store.clone()),
        CategoryRepository::new(store),
    )
}

/// GET /clients
pub async fn list_clients(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
) -> Result<HttpResponse> {
    let clients = ClientRepository::new(store.into_inner())
        .list(&scope.admin_id)
        .await?;
    Ok(HttpResponse::Ok().json(clients))
}

/// POST /clients
pub async fn create_client(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
    body: web::Json<ClientDraft>,
) -> Result<HttpResponse> {
    let id = client_service(&store)
        .add(&scope.admin_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(serde_json::json!({ "id": id })))
}

/// PUT /clients/{id}
pub async fn update_client(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
    path: web::Path<String>,
    body: web::Json<ClientDraft>,
) -> Result<HttpResponse> {
    client_service(&store)
        .update(&scope.admin_id, &path, body.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /clients/{id}
pub async fn delete_client(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    client_service(&store)
        .remove(&scope.admin_id, &path)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /categories
pub async fn list_categories(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
) -> Result<HttpResponse> {
    let categories = CategoryRepository::new(store.into_inner())
        .list(&scope.admin_id)
        .await?;
    Ok(HttpResponse::Ok().json(categories))
}

/// POST /categories
pub async fn create_category(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
    body: web::Json<CategoryBody>,
) -> Result<HttpResponse> {
    let id = client_service(&store)
        .add_category(&scope.admin_id, body.into_inner().name)
        .await?;
    Ok(HttpResponse::Created().json(serde_json::json!({ "id": id })))
}

/// DELETE /categories/{id}
pub async fn delete_category(
    store: web::Data<dyn DocumentStore>,
    scope: AdminScope,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    client_service(&store)
        .remove_category(&scope.admin_id, &path)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure routes for the clients module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/clients")
            .route("", web::get().to(list_clients))
            .route("", web::post().to(create_client))
            .route("/{id}", web::put().to(update_client))
            .route("/{id}", web::delete().to(delete_client)),
    )
    .service(
        web::scope("/categories")
            .route("", web::get().to(list_categories))
            .route("", web::post().to(create_category))
            .route("/{id}", web::delete().to(delete_category)),
    );
}
