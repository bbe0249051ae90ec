use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::freelancers::models::Freelancer;
use crate::modules::freelancers::repositories::FreelancerRepository;

/// Freelancer form fields. The lookup token and owning account are
/// never taken from the form; the token is generated at creation and
/// both are preserved on edit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreelancerDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub commission: Decimal,
}

pub struct FreelancerService {
    freelancers: FreelancerRepository,
}

impl FreelancerService {
    pub fn new(freelancers: FreelancerRepository) -> Self {
        Self { freelancers }
    }

    pub async fn add(&self, admin_id: &str, draft: FreelancerDraft) -> Result<String> {
        let freelancer = Freelancer::new(
            draft.first_name,
            draft.last_name,
            draft.email,
            draft.commission,
            admin_id.to_string(),
        )?;
        let id = self.freelancers.create(&freelancer).await?;
        info!(admin_id, freelancer_id = %id, "freelancer added");
        Ok(id)
    }

    pub async fn update(&self, admin_id: &str, id: &str, draft: FreelancerDraft) -> Result<()> {
        let existing = self.freelancers.get(id).await?;
        if existing.admin_id != admin_id {
            return Err(AppError::unauthorized(
                "Freelancer belongs to another account",
            ));
        }

        // Validate the new fields against the unchanged token/account.
        Freelancer {
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            commission: draft.commission,
            ..existing
        }
        .validate()?;

        let patch = json!({
            "firstName": draft.first_name,
            "lastName": draft.last_name,
            "email": draft.email,
            "commission": draft.commission,
        });
        self.freelancers.update(id, patch).await
    }

    pub async fn remove(&self, admin_id: &str, id: &str) -> Result<()> {
        let existing = self.freelancers.get(id).await?;
        if existing.admin_id != admin_id {
            return Err(AppError::unauthorized(
                "Freelancer belongs to another account",
            ));
        }
        self.freelancers.delete(id).await
    }
}
