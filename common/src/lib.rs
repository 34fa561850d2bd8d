pub mod config;
pub mod constants;
pub mod errors;
pub mod logger;
pub mod messages;
pub mod types;
pub mod utils;
