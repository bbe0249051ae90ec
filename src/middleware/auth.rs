use crate::core::AppError;
use crate::modules::accounts::services::{Identity, SessionRegistry};
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

/// Bearer-token session middleware.
///
/// Resolves the token against the in-process session registry and
/// stores the identity in request extensions; handlers narrow it with
/// the `AdminScope`/`PortalScope` extractors. Auth endpoints and the
/// health check are public.
pub struct SessionAuth {
    sessions: SessionRegistry,
}

impl SessionAuth {
    pub fn new(sessions: SessionRegistry) -> Self {
        Self { sessions }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
            sessions: self.sessions.clone(),
        }))
    }
}

pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
    sessions: SessionRegistry,
}

fn is_public(path: &str) -> bool {
    path == "/health" || path == "/" || path.starts_with("/auth")
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let sessions = self.sessions.clone();

        Box::pin(async move {
            if is_public(req.path()) {
                return svc.call(req).await;
            }

            // Extract the bearer token from the Authorization header
            let token = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
                .ok_or_else(|| Error::from(AppError::unauthorized("Missing bearer token")))?;

            let identity = sessions
                .resolve(token)
                .ok_or_else(|| Error::from(AppError::unauthorized("Invalid or expired session")))?;

            // Store the identity and token for use in handlers
            req.extensions_mut().insert(identity);
            req.extensions_mut().insert(SessionToken(token.to_string()));

            svc.call(req).await
        })
    }
}

/// The raw session token, kept for session-keyed live views
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Extractor for handlers that require an admin session
#[derive(Debug, Clone)]
pub struct AdminScope {
    pub admin_id: String,
    pub token: String,
}

impl FromRequest for AdminScope {
    type Error = Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let extensions = req.extensions();
        let token = extensions.get::<SessionToken>().map(|t| t.0.clone());
        let scope = match (extensions.get::<Identity>(), token) {
            (Some(Identity::Admin { account_id }), Some(token)) => Ok(AdminScope {
                admin_id: account_id.clone(),
                token,
            }),
            _ => Err(Error::from(AppError::unauthorized(
                "Admin session required",
            ))),
        };
        ready(scope)
    }
}

/// Extractor for the freelancer portal's read-scoped session
#[derive(Debug, Clone)]
pub struct PortalScope {
    pub admin_id: String,
    pub freelancer_name: String,
    pub token: String,
}

impl FromRequest for PortalScope {
    type Error = Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let extensions = req.extensions();
        let token = extensions.get::<SessionToken>().map(|t| t.0.clone());
        let scope = match (extensions.get::<Identity>(), token) {
            (
                Some(Identity::Freelancer {
                    admin_id,
                    freelancer_name,
                }),
                Some(token),
            ) => Ok(PortalScope {
                admin_id: admin_id.clone(),
                freelancer_name: freelancer_name.clone(),
                token,
            }),
            _ => Err(Error::from(AppError::unauthorized(
                "Freelancer session required",
            ))),
        };
        ready(scope)
    }
}
