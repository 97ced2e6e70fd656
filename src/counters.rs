pub mod repository;
pub mod factory;
