// Freelancer model
//
// Freelancers live in a global collection rather than under their
// admin's namespace: the cross-account lookup must find them with only
// the opaque freelancer token and a full name, without admin
// credentials. The owning account is recorded in `admin_id`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Freelancer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub first_name: String,
    pub last_name: String,
    pub email: String,

    /// Default commission percentage for this freelancer's new sales
    pub commission: Decimal,

    /// Opaque token generated once at creation; shared with the
    /// freelancer so they can view their own report
    pub freelancer_id: String,

    /// Owning admin account
    pub admin_id: String,
}

impl Freelancer {
    /// Create a new freelancer, generating the lookup token.
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        commission: Decimal,
        admin_id: String,
    ) -> Result<Self> {
        let freelancer = Self {
            id: None,
            first_name,
            last_name,
            email,
            commission,
            freelancer_id: Uuid::new_v4().to_string(),
            admin_id,
        };
        freelancer.validate()?;
        Ok(freelancer)
    }

    pub fn validate(&self) -> Result<()> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(AppError::validation("Freelancer name cannot be empty"));
        }

        if !self.email.contains('@') {
            return Err(AppError::validation(format!(
                "Invalid email address: '{}'",
                self.email
            )));
        }

        if self.commission < Decimal::ZERO || self.commission > Decimal::from(100) {
            return Err(AppError::validation(
                "Commission must be between 0 and 100",
            ));
        }

        Ok(())
    }

    /// The display and join-key form of the name: "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
