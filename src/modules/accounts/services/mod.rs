pub mod auth_service;
pub mod mailer;
pub mod session;

pub use auth_service::AuthService;
pub use mailer::{LogMailer, Mailer};
pub use session::{Identity, SessionRegistry};
