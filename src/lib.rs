pub mod config;
pub mod datasources;
pub mod db;
pub mod error;
pub mod logic;
pub mod models;

pub use config::Config;
pub use error::{GddError, Result};
