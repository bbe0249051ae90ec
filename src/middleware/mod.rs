pub mod auth;

pub use auth::{AdminScope, PortalScope, SessionAuth};
