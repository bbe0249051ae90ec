// CSV export contract: exact formatting of computed values, raw
// passthrough of entered values, standard quoting, and the
// nothing-to-export signal.

use rust_decimal_macros::dec;

use reeltally::core::AppError;
use reeltally::modules::reports::services::csv_export::{export_csv, CSV_FILENAME};
use reeltally::modules::sales::models::Sale;

fn sale(title: &str, amount: rust_decimal::Decimal, rate: rust_decimal::Decimal) -> Sale {
    Sale::new(
        "Acme".to_string(),
        "Jane Doe".to_string(),
        title.to_string(),
        Some(amount),
        Some(rate),
        "2024-03-15".parse().unwrap(),
    )
    .unwrap()
}

#[test]
fn test_known_two_row_export() {
    let sales = vec![
        sale("Promo", dec!(100), dec!(10)),
        sale("Recap", dec!(50), dec!(20)),
    ];

    let text = String::from_utf8(export_csv(&sales).unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);

    // 100 at 10% and 50 at 20% both earn 10.00.
    let row1: Vec<&str> = lines[1].split(',').collect();
    let row2: Vec<&str> = lines[2].split(',').collect();
    assert_eq!(row1[6], "10.00");
    assert_eq!(row1[7], "90.00");
    assert_eq!(row2[6], "10.00");
    assert_eq!(row2[7], "40.00");
}

#[test]
fn test_header_and_column_order() {
    let sales = vec![sale("Promo", dec!(100), dec!(10))];
    let text = String::from_utf8(export_csv(&sales).unwrap()).unwrap();

    assert!(text.starts_with(
        "Date,Freelancer,Video Title,Client,Sale Amount,Commission Rate (%),\
         Commission Earned,Profit,Status,Paid On"
    ));
}

#[test]
fn test_raw_amount_and_rate_pass_through_unformatted() {
    let sales = vec![sale("Promo", dec!(123.4), dec!(12.5))];
    let text = String::from_utf8(export_csv(&sales).unwrap()).unwrap();
    let row: Vec<&str> = text.lines().nth(1).unwrap().split(',').collect();

    assert_eq!(row[4], "123.4");
    assert_eq!(row[5], "12.5");
}

#[test]
fn test_status_and_paid_date_columns() {
    let mut paid = sale("Promo", dec!(100), dec!(10));
    paid.mark_paid("2024-04-02".parse().unwrap());
    let sales = vec![paid, sale("Recap", dec!(50), dec!(20))];

    let text = String::from_utf8(export_csv(&sales).unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[1].ends_with("paid,2024-04-02"));
    assert!(lines[2].ends_with("unpaid,"));
}

#[test]
fn test_quotes_in_string_fields_are_doubled_and_wrapped() {
    let sales = vec![sale("Say \"Action\"", dec!(100), dec!(10))];
    let text = String::from_utf8(export_csv(&sales).unwrap()).unwrap();

    assert!(text.contains("\"Say \"\"Action\"\"\""));
}

#[test]
fn test_empty_set_signals_nothing_to_export_and_writes_no_bytes() {
    match export_csv(&[]) {
        Err(AppError::Export(msg)) => assert!(msg.contains("No sales")),
        other => panic!("expected export error, got {:?}", other.map(|b| b.len())),
    }
}

#[test]
fn test_download_filename() {
    assert_eq!(CSV_FILENAME, "sales_report.csv");
}
