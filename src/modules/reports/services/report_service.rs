// Aggregation over the (already filtered) sale set: dashboard KPIs,
// top-N rollups for charting, and the freelancer portal summary with
// its monthly commission series.

use rust_decimal::Decimal;

use crate::modules::reports::models::{
    DashboardKpis, FreelancerSummary, MonthlyPoint, RankedEntry,
};
use crate::modules::sales::models::Sale;
use crate::modules::sales::services::commission::{commission, totals_of};

/// Month label format for the commission series ("Mar 2024")
const MONTH_LABEL: &str = "%b %Y";

#[derive(Clone)]
pub struct ReportService {
    /// Entries kept in the top-freelancer/top-client rollups
    rollup_size: usize,
}

impl ReportService {
    pub fn new(rollup_size: usize) -> Self {
        Self { rollup_size }
    }

    /// Headline figures over the filtered set.
    pub fn kpis(&self, sales: &[Sale]) -> DashboardKpis {
        let totals = totals_of(sales);
        let unpaid_commissions = sales
            .iter()
            .filter(|s| !s.is_paid())
            .map(commission)
            .sum();

        DashboardKpis {
            total_revenue: totals.sale_amount,
            total_commissions: totals.commission,
            net_profit: totals.sale_amount - totals.commission,
            unpaid_commissions,
        }
    }

    /// Accumulate `amount(sale)` per `key(sale)` in first-seen order,
    /// then rank descending and truncate to the rollup size.
    fn rollup<K, A>(&self, sales: &[Sale], key: K, amount: A) -> Vec<RankedEntry>
    where
        K: Fn(&Sale) -> &str,
        A: Fn(&Sale) -> Decimal,
    {
        let mut groups: Vec<RankedEntry> = Vec::new();
        for sale in sales {
            let label = key(sale);
            match groups.iter_mut().find(|g| g.label == label) {
                Some(entry) => entry.amount += amount(sale),
                None => groups.push(RankedEntry {
                    label: label.to_string(),
                    amount: amount(sale),
                }),
            }
        }

        groups.sort_by(|a, b| b.amount.cmp(&a.amount));
        groups.truncate(self.rollup_size);
        groups
    }

    pub fn top_freelancers_by_commission(&self, sales: &[Sale]) -> Vec<RankedEntry> {
        self.rollup(sales, |s| s.freelancer_name.as_str(), commission)
    }

    pub fn top_clients_by_revenue(&self, sales: &[Sale]) -> Vec<RankedEntry> {
        self.rollup(
            sales,
            |s| s.client_name.as_str(),
            |s| s.sale_amount.unwrap_or(Decimal::ZERO),
        )
    }

    pub fn top_clients_by_commission(&self, sales: &[Sale]) -> Vec<RankedEntry> {
        self.rollup(sales, |s| s.client_name.as_str(), commission)
    }

    /// Commission per calendar month. Input arrives newest first, so
    /// months accumulate in reverse chronology; the series is reversed
    /// at the end to read oldest to newest.
    pub fn monthly_commissions(&self, sales: &[Sale]) -> Vec<MonthlyPoint> {
        let mut months: Vec<MonthlyPoint> = Vec::new();
        for sale in sales {
            let label = sale.sale_date.format(MONTH_LABEL).to_string();
            match months.iter_mut().find(|m| m.label == label) {
                Some(point) => point.commission += commission(sale),
                None => months.push(MonthlyPoint {
                    label,
                    commission: commission(sale),
                }),
            }
        }

        months.reverse();
        months
    }

    /// The freelancer portal's whole report over their own sales.
    pub fn freelancer_summary(&self, sales: &[Sale]) -> FreelancerSummary {
        let total_earned = sales.iter().map(commission).sum();
        let amount_owed = sales
            .iter()
            .filter(|s| !s.is_paid())
            .map(commission)
            .sum();

        FreelancerSummary {
            total_earned,
            amount_owed,
            monthly: self.monthly_commissions(sales),
            top_clients: self.top_clients_by_commission(sales),
        }
    }
}
