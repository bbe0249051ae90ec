// Sale model with validation
//
// A sale links a client, a freelancer and a video to an amount and a
// commission rate. Client and freelancer are stored as copied name
// strings, not references: renaming either leaves historical sales
// showing the name they had at entry time.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Payment lifecycle of a sale's commission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    /// Commission not yet paid out to the freelancer
    Unpaid,

    /// Commission paid out; `paid_date` records when
    Paid,
}

impl Default for SaleStatus {
    fn default() -> Self {
        SaleStatus::Unpaid
    }
}

impl std::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaleStatus::Unpaid => write!(f, "unpaid"),
            SaleStatus::Paid => write!(f, "paid"),
        }
    }
}

impl std::str::FromStr for SaleStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(SaleStatus::Unpaid),
            "paid" => Ok(SaleStatus::Paid),
            _ => Err(format!("Invalid sale status: {}", s)),
        }
    }
}

/// A recorded client-video sale
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Document id, assigned by the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Copied client name (join key, not a reference)
    pub client_name: String,

    /// Copied freelancer full name (join key, not a reference)
    pub freelancer_name: String,

    pub video_title: String,

    /// Sale amount in dollars. Absent on partially filled records;
    /// calculations coerce to zero.
    #[serde(default)]
    pub sale_amount: Option<Decimal>,

    /// Commission percentage (0-100). Absent coerces to zero.
    #[serde(default)]
    pub commission_rate: Option<Decimal>,

    pub sale_date: NaiveDate,

    #[serde(default)]
    pub status: SaleStatus,

    /// Present exactly when status is paid
    #[serde(default)]
    pub paid_date: Option<NaiveDate>,
}

impl Sale {
    /// Create a new unpaid sale with validation
    pub fn new(
        client_name: String,
        freelancer_name: String,
        video_title: String,
        sale_amount: Option<Decimal>,
        commission_rate: Option<Decimal>,
        sale_date: NaiveDate,
    ) -> Result<Self> {
        let sale = Self {
            id: None,
            client_name,
            freelancer_name,
            video_title,
            sale_amount,
            commission_rate,
            sale_date,
            status: SaleStatus::Unpaid,
            paid_date: None,
        };
        sale.validate()?;
        Ok(sale)
    }

    /// Validate field constraints and the paid-date invariant
    pub fn validate(&self) -> Result<()> {
        if self.client_name.trim().is_empty() {
            return Err(AppError::validation("Client name cannot be empty"));
        }

        if self.freelancer_name.trim().is_empty() {
            return Err(AppError::validation("Freelancer name cannot be empty"));
        }

        if self.video_title.trim().is_empty() {
            return Err(AppError::validation("Video title cannot be empty"));
        }

        if let Some(amount) = self.sale_amount {
            if amount < Decimal::ZERO {
                return Err(AppError::validation("Sale amount cannot be negative"));
            }
        }

        if let Some(rate) = self.commission_rate {
            if rate < Decimal::ZERO || rate > Decimal::from(100) {
                return Err(AppError::validation(
                    "Commission rate must be between 0 and 100",
                ));
            }
        }

        match self.status {
            SaleStatus::Paid if self.paid_date.is_none() => Err(AppError::validation(
                "Paid sale must carry a payment date",
            )),
            SaleStatus::Unpaid if self.paid_date.is_some() => Err(AppError::validation(
                "Unpaid sale cannot carry a payment date",
            )),
            _ => Ok(()),
        }
    }

    /// Mark the commission as paid on the given date
    pub fn mark_paid(&mut self, paid_date: NaiveDate) {
        self.status = SaleStatus::Paid;
        self.paid_date = Some(paid_date);
    }

    /// Revert to unpaid, clearing the payment date
    pub fn mark_unpaid(&mut self) {
        self.status = SaleStatus::Unpaid;
        self.paid_date = None;
    }

    pub fn is_paid(&self) -> bool {
        self.status == SaleStatus::Paid
    }
}
