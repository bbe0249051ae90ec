pub mod freelancer;

pub use freelancer::Freelancer;
