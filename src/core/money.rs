use rust_decimal::Decimal;

/// All ledger amounts are US dollars with cent precision. There is no
/// currency abstraction here; this module only rounds and formats.
const MONEY_SCALE: u32 = 2;

/// Rounds a computed currency value (commission, profit, totals) to cents.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(MONEY_SCALE)
}

/// Formats a currency value with exactly two decimal places, no symbol.
/// Used for CSV cells and mailto report lines.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(MONEY_SCALE))
}

/// Formats a currency value for display with a dollar sign.
pub fn format_usd(amount: Decimal) -> String {
    format!("${}", format_amount(amount))
}
