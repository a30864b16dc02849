pub mod draft;
pub mod session;
pub mod usage_log;
