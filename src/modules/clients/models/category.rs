use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Free-form tag attached to clients, used for filtering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Unique within an admin account
    pub name: String,
}

impl Category {
    pub fn new(name: String) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Category name cannot be empty"));
        }
        Ok(Self { id: None, name })
    }
}
