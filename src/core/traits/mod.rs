pub mod log_api;
pub mod session_store;
