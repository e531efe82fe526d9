//! Scout Core - Foundation crate for the Scout account discovery tool.
//!
//! This crate provides shared types, error handling and configuration
//! management that all other Scout crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes and enums (`ProviderId`, `Existence`)
//!
//! # Example
//!
//! ```rust
//! use scout_core::{AppConfig, ProviderId};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert!(!config.registry.skip_password_recovery);
//!
//! let id = ProviderId::new("biosmods")?;
//! assert_eq!(id.as_str(), "biosmods");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, GeneralConfig, HttpConfig, RegistryConfig, ScanConfig};
pub use error::{ConfigError, ConfigResult, Result, ScoutError};
pub use types::{is_email, Existence, ProviderId};
