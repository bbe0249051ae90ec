pub mod freelancer_repository;

pub use freelancer_repository::FreelancerRepository;
