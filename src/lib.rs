pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod loader;
pub mod pwl_client;
pub mod store;
