use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::clients::repositories::ClientRepository;
use crate::modules::freelancers::repositories::FreelancerRepository;
use crate::modules::sales::models::Sale;
use crate::modules::sales::repositories::SaleRepository;

/// Manual sale entry. The client and freelancer are chosen by id; their
/// names are copied onto the sale at entry time, the amount defaults to
/// the client's fixed price and the rate is always the freelancer's
/// current commission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    pub video_title: String,
    pub client_id: String,
    pub freelancer_id: String,
    #[serde(default)]
    pub sale_amount: Option<Decimal>,
    pub sale_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSaleRow {
    pub video_title: String,
    pub client_id: String,
}

/// Bulk entry: one freelancer and date, many title/client rows.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSaleDraft {
    pub freelancer_id: String,
    pub sale_date: NaiveDate,
    pub rows: Vec<BulkSaleRow>,
}

/// Service for recording and mutating sales
pub struct SaleService {
    sales: SaleRepository,
    clients: ClientRepository,
    freelancers: FreelancerRepository,
}

impl SaleService {
    pub fn new(
        sales: SaleRepository,
        clients: ClientRepository,
        freelancers: FreelancerRepository,
    ) -> Self {
        Self {
            sales,
            clients,
            freelancers,
        }
    }

    /// Resolve a draft against the current client and freelancer
    /// records, copying names and defaulting amount/rate.
    async fn resolve(&self, admin_id: &str, draft: &SaleDraft) -> Result<Sale> {
        let client = self.clients.get(admin_id, &draft.client_id).await?;
        let freelancer = self.freelancers.get(&draft.freelancer_id).await?;

        if freelancer.admin_id != admin_id {
            return Err(AppError::validation(
                "Freelancer does not belong to this account",
            ));
        }

        Sale::new(
            client.name,
            freelancer.full_name(),
            draft.video_title.clone(),
            draft.sale_amount.or(Some(client.price)),
            Some(freelancer.commission),
            draft.sale_date,
        )
    }

    /// Record a single sale; starts unpaid.
    pub async fn record(&self, admin_id: &str, draft: SaleDraft) -> Result<String> {
        let sale = self.resolve(admin_id, &draft).await?;
        let id = self.sales.create(admin_id, &sale).await?;
        info!(admin_id, sale_id = %id, "sale recorded");
        Ok(id)
    }

    /// Edit a sale's entry fields. Payment status is untouched; use
    /// `mark_paid`/`mark_unpaid` for that.
    pub async fn update(&self, admin_id: &str, sale_id: &str, draft: SaleDraft) -> Result<()> {
        let resolved = self.resolve(admin_id, &draft).await?;

        let patch = json!({
            "videoTitle": resolved.video_title,
            "clientName": resolved.client_name,
            "freelancerName": resolved.freelancer_name,
            "saleAmount": resolved.sale_amount,
            "commissionRate": resolved.commission_rate,
            "saleDate": resolved.sale_date,
        });
        self.sales.update(admin_id, sale_id, patch).await
    }

    /// Record many sales atomically. Amounts and rates are copied from
    /// the selected client and freelancer per row.
    pub async fn record_bulk(&self, admin_id: &str, draft: BulkSaleDraft) -> Result<Vec<String>> {
        if draft.rows.is_empty() {
            return Err(AppError::validation("Bulk entry needs at least one row"));
        }

        let freelancer = self.freelancers.get(&draft.freelancer_id).await?;
        if freelancer.admin_id != admin_id {
            return Err(AppError::validation(
                "Freelancer does not belong to this account",
            ));
        }

        let mut sales = Vec::with_capacity(draft.rows.len());
        for row in &draft.rows {
            let client = self.clients.get(admin_id, &row.client_id).await?;
            sales.push(Sale::new(
                client.name,
                freelancer.full_name(),
                row.video_title.clone(),
                Some(client.price),
                Some(freelancer.commission),
                draft.sale_date,
            )?);
        }

        let ids = self.sales.batch_create(admin_id, &sales).await?;
        info!(admin_id, count = ids.len(), "bulk sales recorded");
        Ok(ids)
    }

    /// Mark a sale's commission as paid on the supplied date.
    pub async fn mark_paid(&self, admin_id: &str, sale_id: &str, paid_date: NaiveDate) -> Result<()> {
        let patch = json!({ "status": "paid", "paidDate": paid_date });
        self.sales.update(admin_id, sale_id, patch).await
    }

    /// Revert a sale to unpaid, clearing its payment date.
    pub async fn mark_unpaid(&self, admin_id: &str, sale_id: &str) -> Result<()> {
        let patch = json!({ "status": "unpaid", "paidDate": null });
        self.sales.update(admin_id, sale_id, patch).await
    }

    pub async fn remove(&self, admin_id: &str, sale_id: &str) -> Result<()> {
        self.sales.delete(admin_id, sale_id).await
    }
}
