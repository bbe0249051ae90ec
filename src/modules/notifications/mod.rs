pub mod services;

pub use services::ChangeDetector;
