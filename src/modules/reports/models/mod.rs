pub mod report;

pub use report::{DashboardKpis, FreelancerSummary, MonthlyPoint, RankedEntry};
