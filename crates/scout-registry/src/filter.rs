//! Configuration-driven provider exclusion.

use crate::descriptor::ProviderDescriptor;
use scout_core::RegistryConfig;
use std::collections::BTreeSet;

/// Decides which registered providers are left out of a registry.
///
/// Disabled providers are always excluded. Side-effect-risky providers (the
/// named set plus any descriptor using password recovery) are excluded only
/// when `skip_side_effects` is set.
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    skip_side_effects: bool,
    side_effect_providers: BTreeSet<String>,
    disabled: BTreeSet<String>,
}

impl ExclusionFilter {
    /// A filter that keeps everything.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Build the filter from the `[registry]` configuration section.
    #[must_use]
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self {
            skip_side_effects: config.skip_password_recovery,
            side_effect_providers: config.password_recovery_providers.iter().cloned().collect(),
            disabled: config.disabled_providers.iter().cloned().collect(),
        }
    }

    /// Turn side-effect exclusion on or off.
    #[must_use]
    pub fn skip_side_effects(mut self, skip: bool) -> Self {
        self.skip_side_effects = skip;
        self
    }

    /// Name a provider as side-effect-risky.
    #[must_use]
    pub fn with_side_effect_provider(mut self, id: impl Into<String>) -> Self {
        self.side_effect_providers.insert(id.into());
        self
    }

    /// Always exclude a provider.
    #[must_use]
    pub fn disable(mut self, id: impl Into<String>) -> Self {
        self.disabled.insert(id.into());
        self
    }

    /// Whether the descriptor must be left out.
    #[must_use]
    pub fn excludes(&self, descriptor: &ProviderDescriptor) -> bool {
        let id = descriptor.id().as_str();

        if self.disabled.contains(id) {
            return true;
        }

        self.skip_side_effects
            && (descriptor.has_side_effects() || self.side_effect_providers.contains(id))
    }
}
