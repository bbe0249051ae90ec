pub mod coordinator;
pub mod hub;
pub mod portal;

pub use coordinator::{DashboardCoordinator, DashboardView};
pub use hub::SessionHub;
pub use portal::PortalSession;
