use rust_decimal::Decimal;
use serde::Serialize;

/// Headline figures over the currently filtered sale set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKpis {
    /// Sum of sale amounts
    pub total_revenue: Decimal,

    /// Sum of commissions owed across all sales
    pub total_commissions: Decimal,

    /// Revenue minus commissions
    pub net_profit: Decimal,

    /// Commission still owed on sales not yet paid out
    pub unpaid_commissions: Decimal,
}

/// One bar of a top-N rollup chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub label: String,
    pub amount: Decimal,
}

/// One month of accumulated commission, labelled "MMM YYYY"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    pub label: String,
    pub commission: Decimal,
}

/// The freelancer portal's report figures
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreelancerSummary {
    /// Commission across every sale, paid or not
    pub total_earned: Decimal,

    /// Commission on sales not yet paid out
    pub amount_owed: Decimal,

    /// Commission per calendar month, oldest first
    pub monthly: Vec<MonthlyPoint>,

    /// Top clients by commission contributed
    pub top_clients: Vec<RankedEntry>,
}
