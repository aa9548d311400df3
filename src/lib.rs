pub mod cli;
pub mod config;
pub mod error;
pub mod catalog_source;
pub mod export;
