pub mod commission;
pub mod filter;
pub mod sale_service;

pub use filter::{FreelancerFilter, SaleFilter};
pub use sale_service::{BulkSaleDraft, BulkSaleRow, SaleDraft, SaleService};
