// Share boundary: prefilled mailto link with a plain-text commission
// table, and the filename contract for the externally rasterized PDF
// report. Sharing an empty report is an error, mirroring the CSV rule.

use crate::core::money::format_amount;
use crate::core::{AppError, Result};
use crate::modules::sales::models::Sale;
use crate::modules::sales::services::commission::commission;

const MAIL_SUBJECT: &str = "Your Commission Report";

/// Filename for the externally rendered PDF report
pub fn pdf_filename(freelancer_name: &str) -> String {
    format!("{}_report.pdf", freelancer_name)
}

/// Build a `mailto:` link with a plain-text commission report for one
/// freelancer, taken from the full sale set.
pub fn mailto_report(freelancer_name: &str, sales: &[Sale]) -> Result<String> {
    let own_sales: Vec<&Sale> = sales
        .iter()
        .filter(|s| s.freelancer_name == freelancer_name)
        .collect();

    if own_sales.is_empty() {
        return Err(AppError::export(format!(
            "No sales to share for {}",
            freelancer_name
        )));
    }

    let mut total = rust_decimal::Decimal::ZERO;
    let mut body = format!(
        "Hello {},\n\nHere is your commission report:\n\n",
        freelancer_name
    );

    for sale in &own_sales {
        let earned = commission(sale);
        total += earned;
        body.push_str("---------------------------------\n");
        body.push_str(&format!("Date: {}\n", sale.sale_date));
        body.push_str(&format!("Video Title: {}\n", sale.video_title));
        body.push_str(&format!("Client: {}\n", sale.client_name));
        body.push_str(&format!("Commission: ${}\n", format_amount(earned)));
        body.push_str(&format!("Status: {}\n", sale.status));
    }
    body.push_str("---------------------------------\n");
    body.push_str(&format!("Total Earned: ${}\n\n", format_amount(total)));

    Ok(format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(MAIL_SUBJECT),
        urlencoding::encode(&body)
    ))
}
