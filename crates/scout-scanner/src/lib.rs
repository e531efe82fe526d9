//! Scout Scanner - concurrent account discovery across providers.
//!
//! This crate runs every registered provider probe for one email address at
//! once, collects one result per provider no matter how the probes behave,
//! and reduces the results to the accounts they confirm.
//!
//! # Features
//!
//! - One task per provider over a single shared HTTP context
//! - Probe failures and panics absorbed as inconclusive results
//! - Optional run deadline that aborts stragglers
//! - Exactly one warning per lookup whose answer may be incomplete
//!
//! # Example
//!
//! ```rust,ignore
//! use scout_scanner::AccountLookupService;
//!
//! let service = AccountLookupService::from_config(&config, registry);
//! for account in service.lookup("someone@example.com").await {
//!     println!("{} ({})", account.provider_name, account.provider_url);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod aggregator;
pub mod batch;
pub mod context;
pub mod error;
pub mod lookup;
pub mod orchestrator;
pub mod runner;
pub mod warnings;

// Re-export commonly used types
pub use aggregator::{aggregate, AccountRecord};
pub use batch::{ProbeBatch, ProbeSink};
pub use context::{ContextFactory, HttpContextFactory};
pub use error::{Result, ScanError};
pub use lookup::{AccountLookupService, LookupReport};
pub use orchestrator::ProbeOrchestrator;
pub use runner::ProbeRunner;
pub use warnings::{CollectingWarnings, TracingWarnings, WarningSink};
