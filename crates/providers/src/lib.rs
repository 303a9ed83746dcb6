//! Completion API providers for Park Guide.
//!
//! All providers implement the `parkguide_core::Provider` trait.
//! [`build_from_config`] constructs the configured provider only when a
//! credential was resolved.

pub mod gemini;

use parkguide_config::{AppConfig, CredentialReport};
use parkguide_core::Provider;
use std::sync::Arc;
use tracing::{error, info};

pub use gemini::GeminiProvider;

/// Build the completion provider, or `None` when the assistant must run in
/// unavailable mode.
///
/// No network traffic happens here; a missing credential means no client is
/// ever constructed.
pub fn build_from_config(config: &AppConfig, report: &CredentialReport) -> Option<Arc<dyn Provider>> {
    let credential = report.credential.as_ref()?;

    match GeminiProvider::new(&credential.key, config.assistant.timeout_secs) {
        Ok(mut provider) => {
            if let Some(url) = &config.assistant.api_url {
                provider = provider.with_base_url(url);
            }
            info!(
                provider = "gemini",
                model = %config.assistant.model,
                source = ?credential.source,
                "Completion provider ready"
            );
            Some(Arc::new(provider))
        }
        Err(e) => {
            error!(error = %e, "Failed to initialise completion provider");
            None
        }
    }
}
