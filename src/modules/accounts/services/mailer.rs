use async_trait::async_trait;
use tracing::info;

use crate::core::Result;

/// Outbound mail boundary. Only password-reset dispatch is needed; the
/// real transport lives outside this service.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_password_reset(&self, email: &str) -> Result<()>;
}

/// Mailer that records the dispatch in the log. Used for local runs and
/// tests.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_password_reset(&self, email: &str) -> Result<()> {
        info!(email, "password reset email dispatched");
        Ok(())
    }
}
