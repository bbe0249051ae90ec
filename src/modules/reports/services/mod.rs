pub mod csv_export;
pub mod report_service;
pub mod share;

pub use report_service::ReportService;
