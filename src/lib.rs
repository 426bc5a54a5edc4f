pub mod config;
pub mod error;
pub mod fetch;
pub mod infra;
pub mod output;
pub mod query;
pub mod server;
pub mod services;
