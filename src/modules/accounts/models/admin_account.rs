use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// An administrator account. The first account created unlocks the
/// dashboard; once any account exists, sign-up is closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub email: String,

    /// Argon2 PHC-format hash; never leaves the store boundary
    pub password_hash: String,

    pub role: String,

    pub created_at: DateTime<Utc>,
}

impl AdminAccount {
    pub fn new(email: String, password_hash: String) -> Result<Self> {
        if !email.contains('@') {
            return Err(AppError::validation(format!(
                "Invalid email address: '{}'",
                email
            )));
        }

        Ok(Self {
            id: None,
            email,
            password_hash,
            role: "admin".to_string(),
            created_at: Utc::now(),
        })
    }
}
