pub mod controllers;
pub mod services;

pub use services::{DashboardCoordinator, DashboardView, PortalSession, SessionHub};
