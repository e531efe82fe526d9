//! Build-once provider registry.

use crate::{
    descriptor::ProviderDescriptor,
    error::{RegistryError, Result},
    filter::ExclusionFilter,
};
use scout_core::ProviderId;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Immutable collection of provider descriptors, ordered by provider ID.
///
/// The registry is assembled once through [`RegistryBuilder`] and never
/// changes afterwards; cloning it shares the descriptors.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: Arc<BTreeMap<ProviderId, Arc<ProviderDescriptor>>>,
}

impl ProviderRegistry {
    /// Start assembling a registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// All providers, ordered by ID.
    #[must_use]
    pub fn list_providers(&self) -> Vec<Arc<ProviderDescriptor>> {
        self.providers.values().cloned().collect()
    }

    /// Get a provider by ID.
    ///
    /// # Errors
    /// Returns error if the provider is not registered.
    pub fn get(&self, provider_id: &ProviderId) -> Result<Arc<ProviderDescriptor>> {
        self.providers
            .get(provider_id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                provider_id: provider_id.to_string(),
            })
    }

    /// Get the total number of providers in the registry.
    #[must_use]
    pub fn count(&self) -> usize {
        self.providers.len()
    }

    /// Check if a provider exists in the registry.
    #[must_use]
    pub fn contains(&self, provider_id: &ProviderId) -> bool {
        self.providers.contains_key(provider_id)
    }

    /// Get all provider IDs in the registry.
    #[must_use]
    pub fn ids(&self) -> Vec<ProviderId> {
        self.providers.keys().cloned().collect()
    }
}

/// Collects descriptors and applies the exclusion filter.
#[derive(Default)]
pub struct RegistryBuilder {
    descriptors: Vec<ProviderDescriptor>,
    filter: ExclusionFilter,
}

impl RegistryBuilder {
    /// Register one provider.
    #[must_use]
    pub fn register(mut self, descriptor: ProviderDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Register many providers.
    #[must_use]
    pub fn register_all(mut self, descriptors: impl IntoIterator<Item = ProviderDescriptor>) -> Self {
        self.descriptors.extend(descriptors);
        self
    }

    /// Set the exclusion filter applied at build time.
    #[must_use]
    pub fn exclude(mut self, filter: ExclusionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Validate descriptors, drop excluded ones and freeze the registry.
    ///
    /// # Errors
    /// Returns error if a descriptor is invalid, an ID is registered twice,
    /// or no provider remains.
    pub fn build(self) -> Result<ProviderRegistry> {
        let mut providers = BTreeMap::new();
        let mut excluded = 0;

        for descriptor in self.descriptors {
            descriptor.validate()?;

            if providers.contains_key(descriptor.id()) {
                return Err(RegistryError::DuplicateProvider {
                    provider_id: descriptor.id().to_string(),
                });
            }

            if self.filter.excludes(&descriptor) {
                debug!(provider_id = %descriptor.id(), "excluded provider by configuration");
                excluded += 1;
                continue;
            }

            providers.insert(descriptor.id().clone(), Arc::new(descriptor));
        }

        if providers.is_empty() {
            return Err(RegistryError::Empty { excluded });
        }

        info!(count = providers.len(), excluded, "built provider registry");

        Ok(ProviderRegistry {
            providers: Arc::new(providers),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ProbeMethod;
    use crate::probe::{probe_fn, ProbeReport};

    fn create_test_descriptor(id: &str) -> ProviderDescriptor {
        ProviderDescriptor::new(
            ProviderId::new(id).expect("valid provider ID"),
            format!("{id}.com"),
            probe_fn(|_email, _ctx| async { Ok(ProbeReport::not_found()) }),
        )
    }

    #[test]
    fn test_registry_empty_is_error() {
        let result = ProviderRegistry::builder().build();
        assert!(matches!(result, Err(RegistryError::Empty { excluded: 0 })));
    }

    #[test]
    fn test_registry_register_and_get() {
        let registry = ProviderRegistry::builder()
            .register(create_test_descriptor("biosmods"))
            .build()
            .expect("build registry");

        let id = ProviderId::new("biosmods").expect("valid provider ID");
        let retrieved = registry.get(&id).expect("get descriptor");
        assert_eq!(retrieved.id(), &id);
        assert_eq!(retrieved.display_domain(), "biosmods.com");
    }

    #[test]
    fn test_registry_get_nonexistent() {
        let registry = ProviderRegistry::builder()
            .register(create_test_descriptor("biosmods"))
            .build()
            .expect("build registry");
        let id = ProviderId::new("nonexistent").expect("valid provider ID");

        let result = registry.get(&id);
        assert!(matches!(result, Err(RegistryError::NotFound { .. })));
        assert!(!registry.contains(&id));
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let result = ProviderRegistry::builder()
            .register(create_test_descriptor("p1"))
            .register(create_test_descriptor("p1"))
            .build();
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateProvider { provider_id }) if provider_id == "p1"
        ));
    }

    #[test]
    fn test_registry_rejects_invalid_descriptor() {
        let bad = ProviderDescriptor::new(
            ProviderId::new("p1").expect("valid provider ID"),
            "",
            probe_fn(|_email, _ctx| async { Ok(ProbeReport::not_found()) }),
        );
        let result = ProviderRegistry::builder().register(bad).build();
        assert!(matches!(result, Err(RegistryError::ValidationError { .. })));
    }

    #[test]
    fn test_registry_list_is_ordered() {
        let registry = ProviderRegistry::builder()
            .register_all(["zoho", "adobe", "mybb"].map(create_test_descriptor))
            .build()
            .expect("build registry");

        let ids: Vec<String> = registry.ids().iter().map(ToString::to_string).collect();
        assert_eq!(ids, vec!["adobe", "mybb", "zoho"]);
        assert_eq!(registry.list_providers().len(), 3);
    }

    #[test]
    fn test_registry_applies_exclusion() {
        let registry = ProviderRegistry::builder()
            .register(create_test_descriptor("adobe"))
            .register(create_test_descriptor("biosmods"))
            .register(create_test_descriptor("reset").with_method(ProbeMethod::PasswordRecovery))
            .exclude(
                ExclusionFilter::none()
                    .with_side_effect_provider("adobe")
                    .skip_side_effects(true),
            )
            .build()
            .expect("build registry");

        assert_eq!(registry.count(), 1);
        assert!(registry.contains(&ProviderId::new("biosmods").expect("valid provider ID")));
    }

    #[test]
    fn test_registry_all_excluded_is_error() {
        let result = ProviderRegistry::builder()
            .register(create_test_descriptor("adobe"))
            .exclude(ExclusionFilter::none().disable("adobe"))
            .build();
        assert!(matches!(result, Err(RegistryError::Empty { excluded: 1 })));
    }
}
