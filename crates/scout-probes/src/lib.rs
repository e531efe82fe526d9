//! Scout Probes - Built-in provider probes.
//!
//! Every probe family exposes a `descriptors()` function returning the
//! providers it covers. [`all_providers`] is the registration table: adding a
//! provider means adding it to a family's table, or adding a family here. The
//! orchestrator never needs to change.
//!
//! # Example
//!
//! ```rust,no_run
//! use scout_registry::ProviderRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ProviderRegistry::builder()
//!     .register_all(scout_probes::all_providers()?)
//!     .build()?;
//! println!("{} providers", registry.count());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod forums;
pub mod user_agent;

use scout_registry::ProviderDescriptor;

/// Descriptors for every built-in provider.
pub fn all_providers() -> scout_core::Result<Vec<ProviderDescriptor>> {
    let mut providers = Vec::new();
    providers.extend(forums::mybb::descriptors()?);
    Ok(providers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_registry::ProviderRegistry;

    #[test]
    fn test_all_providers_build_a_registry() {
        let providers = all_providers().expect("built-in providers are valid");
        let count = providers.len();

        let registry = ProviderRegistry::builder()
            .register_all(providers)
            .build()
            .expect("no duplicate or invalid providers");
        assert_eq!(registry.count(), count);
    }
}
