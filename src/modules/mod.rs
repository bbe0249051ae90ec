pub mod accounts;
pub mod clients;
pub mod dashboard;
pub mod freelancers;
pub mod notifications;
pub mod reports;
pub mod sales;
