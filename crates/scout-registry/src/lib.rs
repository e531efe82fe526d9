//! Scout Registry - Provider descriptors, the probe contract and the registry.
//!
//! A provider is a third-party website that may hold an account for an email
//! address. Each provider is described by a [`ProviderDescriptor`] that pairs
//! its identity (id and display domain) with the [`Probe`] that checks it.
//! Descriptors are registered explicitly and frozen into a [`ProviderRegistry`].
//!
//! # Architecture
//!
//! - **Descriptors** ([`descriptor`]): Immutable provider metadata plus probe routine
//! - **Probe contract** ([`probe`]): The async trait every provider check implements
//! - **Results** ([`result`]): Raw per-provider results stamped with descriptor identity
//! - **Filter** ([`filter`]): Configuration-driven provider exclusion
//! - **Registry** ([`registry`]): Build-once provider collection
//! - **Errors** ([`error`]): Registry and probe error types
//!
//! # Example
//!
//! ```rust
//! use scout_core::ProviderId;
//! use scout_registry::{probe_fn, ProbeReport, ProviderDescriptor, ProviderRegistry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let descriptor = ProviderDescriptor::new(
//!     ProviderId::new("example")?,
//!     "example.com",
//!     probe_fn(|_email, _ctx| async { Ok(ProbeReport::found()) }),
//! );
//!
//! let registry = ProviderRegistry::builder().register(descriptor).build()?;
//! assert_eq!(registry.count(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod descriptor;
pub mod error;
pub mod filter;
pub mod probe;
pub mod registry;
pub mod result;

// Re-export commonly used types
pub use descriptor::{ProbeMethod, ProviderDescriptor};
pub use error::{ProbeError, ProbeResult, RegistryError, Result};
pub use filter::ExclusionFilter;
pub use probe::{probe_fn, FnProbe, Probe, ProbeContext, ProbeReport};
pub use registry::{ProviderRegistry, RegistryBuilder};
pub use result::RawProbeResult;
