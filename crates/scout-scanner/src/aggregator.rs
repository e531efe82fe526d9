//! Reduction of a probe batch to the accounts it confirms.

use crate::batch::ProbeBatch;
use serde::{Deserialize, Serialize};

/// An account confirmed for the looked-up email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// The email that was looked up
    pub login: String,
    /// Provider ID
    pub provider_name: String,
    /// Provider display domain
    pub provider_url: String,
    /// Recovery email disclosed by the provider
    pub recovery_email: Option<String>,
    /// Phone number disclosed by the provider
    pub phone_number: Option<String>,
}

/// Keep the confirmed results and map each one to an [`AccountRecord`].
///
/// Pure and order-preserving: the same batch always gives the same records.
#[must_use]
pub fn aggregate(batch: &ProbeBatch) -> Vec<AccountRecord> {
    batch
        .results()
        .iter()
        .filter(|result| result.exists.is_confirmed())
        .map(|result| AccountRecord {
            login: batch.email().to_string(),
            provider_name: result.provider_id.to_string(),
            provider_url: result.display_domain.clone(),
            recovery_email: result.recovery_email.clone(),
            phone_number: result.phone_number.clone(),
        })
        .collect()
}
