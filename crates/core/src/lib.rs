//! Climate API Core Library
//!
//! Shared utilities for the climate observation API:
//! - Configuration loading (XDG-compliant)
//! - Application defaults

mod config;

pub use config::{find_config_file, get_xdg_data_dir, load_config, ConfigSource};

/// Application name used for XDG paths
pub const APP_NAME: &str = "climate-api";

/// Default API port
pub const DEFAULT_API_PORT: u16 = 5000;

/// Default location of the observation database, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "./Resources/hawaii.sqlite";

/// Default number of pooled read connections
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
