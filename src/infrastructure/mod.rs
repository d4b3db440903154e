pub mod cep_resolver;
pub mod memory;
pub mod models;
pub mod order_repo;
