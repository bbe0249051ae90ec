// CSV export of the filtered sale set. Computed currency values are
// formatted to cents; the raw sale amount and commission rate pass
// through unformatted. An empty set is an error, never a silent
// header-only file.

use crate::core::money::format_amount;
use crate::core::{AppError, Result};
use crate::modules::sales::models::Sale;
use crate::modules::sales::services::commission::{commission, profit};

/// Download filename for the sales export
pub const CSV_FILENAME: &str = "sales_report.csv";

const HEADERS: [&str; 10] = [
    "Date",
    "Freelancer",
    "Video Title",
    "Client",
    "Sale Amount",
    "Commission Rate (%)",
    "Commission Earned",
    "Profit",
    "Status",
    "Paid On",
];

/// Render the filtered sales as CSV bytes, one row per sale.
pub fn export_csv(sales: &[Sale]) -> Result<Vec<u8>> {
    if sales.is_empty() {
        return Err(AppError::export("No sales to export"));
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(HEADERS)
        .map_err(|e| AppError::internal(format!("Failed to write CSV header: {}", e)))?;

    for sale in sales {
        let earned = commission(sale);
        let retained = profit(sale);

        writer
            .write_record([
                sale.sale_date.to_string(),
                sale.freelancer_name.clone(),
                sale.video_title.clone(),
                sale.client_name.clone(),
                sale.sale_amount.map(|a| a.to_string()).unwrap_or_default(),
                sale.commission_rate
                    .map(|r| r.to_string())
                    .unwrap_or_default(),
                format_amount(earned),
                format_amount(retained),
                sale.status.to_string(),
                sale.paid_date.map(|d| d.to_string()).unwrap_or_default(),
            ])
            .map_err(|e| AppError::internal(format!("Failed to write CSV row: {}", e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("Failed to finish CSV: {}", e)))
}
