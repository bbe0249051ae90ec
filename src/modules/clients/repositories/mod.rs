pub mod category_repository;
pub mod client_repository;

pub use category_repository::CategoryRepository;
pub use client_repository::ClientRepository;
