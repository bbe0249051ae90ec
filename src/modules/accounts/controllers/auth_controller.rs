use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::core::preferences::{Theme, ThemeScope, ThemeService};
use crate::core::{AppError, Result};
use crate::modules::accounts::services::AuthService;
use crate::modules::dashboard::SessionHub;
use crate::modules::freelancers::repositories::FreelancerRepository;
use crate::modules::freelancers::services::LookupService;
use crate::store::DocumentStore;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreelancerLoginRequest {
    pub full_name: String,
    pub freelancer_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub account_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSessionResponse {
    pub token: String,
    pub admin_id: String,
    pub freelancer_name: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ThemeBody {
    pub theme: Theme,
}

/// GET /auth/signup-allowed
///
/// Sign-up is a one-time path: open only while no admin account exists.
pub async fn signup_allowed(auth: web::Data<AuthService>) -> Result<HttpResponse> {
    let allowed = auth.sign_up_allowed().await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "allowed": allowed })))
}

/// POST /auth/signup
pub async fn signup(
    auth: web::Data<AuthService>,
    body: web::Json<CredentialsRequest>,
) -> Result<HttpResponse> {
    let account_id = auth.sign_up(&body.email, &body.password).await?;
    Ok(HttpResponse::Created().json(serde_json::json!({ "accountId": account_id })))
}

/// POST /auth/login
pub async fn login(
    auth: web::Data<AuthService>,
    body: web::Json<CredentialsRequest>,
) -> Result<HttpResponse> {
    let (token, account_id) = auth.sign_in(&body.email, &body.password).await?;
    Ok(HttpResponse::Ok().json(SessionResponse { token, account_id }))
}

/// POST /auth/logout
///
/// Revokes the bearer session and drops any live view attached to it.
pub async fn logout(
    req: HttpRequest,
    auth: web::Data<AuthService>,
    hub: web::Data<SessionHub>,
) -> Result<HttpResponse> {
    if let Some(token) = bearer_token(&req) {
        auth.sign_out(token);
        hub.close(token);
    }
    Ok(HttpResponse::NoContent().finish())
}

/// POST /auth/password-reset
pub async fn password_reset(
    auth: web::Data<AuthService>,
    body: web::Json<PasswordResetRequest>,
) -> Result<HttpResponse> {
    auth.send_password_reset(&body.email).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "sent": true })))
}

/// POST /auth/freelancer-login
///
/// Cross-account lookup: resolves the name/token pair to the owning
/// admin and opens a read-scoped portal session. Not an authentication
/// mechanism; the session never authorizes writes.
pub async fn freelancer_login(
    store: web::Data<dyn DocumentStore>,
    auth: web::Data<AuthService>,
    hub: web::Data<SessionHub>,
    body: web::Json<FreelancerLoginRequest>,
) -> Result<HttpResponse> {
    let lookup = LookupService::new(FreelancerRepository::new(store.into_inner()));
    let session = lookup.resolve(&body.full_name, &body.freelancer_id).await?;

    let token =
        auth.open_freelancer_session(session.admin_id.clone(), session.freelancer_name.clone());
    hub.open_portal(&token, &session.admin_id, &session.freelancer_name);

    Ok(HttpResponse::Ok().json(PortalSessionResponse {
        token,
        admin_id: session.admin_id,
        freelancer_name: session.freelancer_name,
    }))
}

/// GET /preferences/theme/{scope}
pub async fn get_theme(
    themes: web::Data<ThemeService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let scope: ThemeScope = path.parse().map_err(AppError::validation)?;
    Ok(HttpResponse::Ok().json(ThemeBody {
        theme: themes.theme(scope),
    }))
}

/// PUT /preferences/theme/{scope}
pub async fn set_theme(
    themes: web::Data<ThemeService>,
    path: web::Path<String>,
    body: web::Json<ThemeBody>,
) -> Result<HttpResponse> {
    let scope: ThemeScope = path.parse().map_err(AppError::validation)?;
    themes.set_theme(scope, body.theme)?;
    Ok(HttpResponse::NoContent().finish())
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Configure routes for the accounts module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/signup-allowed", web::get().to(signup_allowed))
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/password-reset", web::post().to(password_reset))
            .route("/freelancer-login", web::post().to(freelancer_login)),
    )
    .service(
        web::scope("/preferences")
            .route("/theme/{scope}", web::get().to(get_theme))
            .route("/theme/{scope}", web::put().to(set_theme)),
    );
}
