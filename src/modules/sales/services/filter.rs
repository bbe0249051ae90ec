//! Compound sale filtering.
//!
//! A filter is a conjunction of independent dimensions; within the
//! category dimension any selected category matches. Filtering is pure
//! and recomputed from scratch whenever inputs change, so a transiently
//! missing client (collections sync independently) degrades to an empty
//! category instead of failing.

use chrono::NaiveDate;

use crate::modules::clients::models::Client;
use crate::modules::sales::models::Sale;

/// Freelancer dimension: everyone, or one exact name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreelancerFilter {
    All,
    Name(String),
}

impl Default for FreelancerFilter {
    fn default() -> Self {
        FreelancerFilter::All
    }
}

/// Filter specification over the live sale set
#[derive(Debug, Clone, Default)]
pub struct SaleFilter {
    pub freelancer: FreelancerFilter,

    /// Selected client categories; empty means no constraint
    pub categories: Vec<String>,

    /// Case-insensitive substring match against video title, client name
    /// or freelancer name; empty means no constraint
    pub search: String,

    /// Inclusive sale-date bounds
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    pub show_unpaid_only: bool,
}

impl SaleFilter {
    /// Whether one sale passes, given its resolved client category
    /// (empty string when the client is unknown or uncategorized).
    fn matches(&self, sale: &Sale, category: &str) -> bool {
        if self.show_unpaid_only && sale.is_paid() {
            return false;
        }

        if let FreelancerFilter::Name(name) = &self.freelancer {
            if &sale.freelancer_name != name {
                return false;
            }
        }

        if !self.categories.is_empty() && !self.categories.iter().any(|c| c == category) {
            return false;
        }

        if let Some(start) = self.start_date {
            if sale.sale_date < start {
                return false;
            }
        }

        if let Some(end) = self.end_date {
            if sale.sale_date > end {
                return false;
            }
        }

        if !self.search.is_empty() {
            let term = self.search.to_lowercase();
            let in_title = sale.video_title.to_lowercase().contains(&term);
            let in_client = sale.client_name.to_lowercase().contains(&term);
            let in_freelancer = sale.freelancer_name.to_lowercase().contains(&term);
            if !in_title && !in_client && !in_freelancer {
                return false;
            }
        }

        true
    }

    /// Apply the filter over the sale set, resolving each sale's category
    /// through the client list (first client with a matching name wins).
    /// Preserves input order; the default filter returns the set
    /// unchanged.
    pub fn apply(&self, sales: &[Sale], clients: &[Client]) -> Vec<Sale> {
        sales
            .iter()
            .filter(|sale| {
                let category = clients
                    .iter()
                    .find(|c| c.name == sale.client_name)
                    .and_then(|c| c.category.as_deref())
                    .unwrap_or("");
                self.matches(sale, category)
            })
            .cloned()
            .collect()
    }
}
