pub mod filter;
pub mod handlers;
pub mod memory_store;
pub mod store;
pub mod summary;
pub mod validation;
