pub mod freelancer_service;
pub mod lookup_service;

pub use freelancer_service::{FreelancerDraft, FreelancerService};
pub use lookup_service::{LookupFailure, LookupService, ReadSession};
