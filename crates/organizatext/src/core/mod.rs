//! Library-wide configuration.

pub mod config;

pub use config::{CONFIG_FILE_NAME, OrganizatextConfig, PoolConfig, ProcessingConfig};
