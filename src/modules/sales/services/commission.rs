//! Commission arithmetic.
//!
//! Pure and total: partially filled sales (missing amount or rate)
//! contribute zero rather than failing, since upstream records may be
//! incomplete.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::modules::sales::models::Sale;

/// Commission owed to the freelancer for one sale:
/// `amount * rate / 100`, with missing fields coerced to zero.
pub fn commission(sale: &Sale) -> Decimal {
    let amount = sale.sale_amount.unwrap_or(Decimal::ZERO);
    let rate = sale.commission_rate.unwrap_or(Decimal::ZERO);
    amount * rate / Decimal::from(100)
}

/// Amount retained by the business for one sale.
pub fn profit(sale: &Sale) -> Decimal {
    sale.sale_amount.unwrap_or(Decimal::ZERO) - commission(sale)
}

/// Summed figures over a set of sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleTotals {
    pub sale_amount: Decimal,
    pub commission: Decimal,
    pub profit: Decimal,
}

/// Fold a set of sales into totals. Empty input yields zero totals.
pub fn totals_of<'a, I>(sales: I) -> SaleTotals
where
    I: IntoIterator<Item = &'a Sale>,
{
    sales.into_iter().fold(SaleTotals::default(), |mut acc, sale| {
        acc.sale_amount += sale.sale_amount.unwrap_or(Decimal::ZERO);
        acc.commission += commission(sale);
        acc.profit += profit(sale);
        acc
    })
}
