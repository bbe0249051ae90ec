pub mod freelancer_controller;

pub use freelancer_controller::configure;
