pub mod rest_log_api;
