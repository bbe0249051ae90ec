use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// A client the business sells videos to. The name doubles as the join
/// key copied onto sales; the price is the default amount for new sales.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Unique within an admin account
    pub name: String,

    /// Default sale amount for this client's videos
    pub price: Decimal,

    /// Optional category tag, referenced by name
    #[serde(default)]
    pub category: Option<String>,
}

impl Client {
    pub fn new(name: String, price: Decimal, category: Option<String>) -> Result<Self> {
        let client = Self {
            id: None,
            name,
            price,
            category,
        };
        client.validate()?;
        Ok(client)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Client name cannot be empty"));
        }

        if self.price < Decimal::ZERO {
            return Err(AppError::validation("Client price cannot be negative"));
        }

        Ok(())
    }
}
