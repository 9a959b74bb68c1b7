//! Settings use case.
//!
//! Settings only ever leave this layer masked.

use std::sync::Arc;

use parlor_core::Result;
use parlor_core::settings::{MaskedSettings, SettingsUpdate};
use parlor_core::store::ChatStore;

pub struct SettingsService {
    store: Arc<dyn ChatStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn ChatStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, thread_id: &str) -> Result<MaskedSettings> {
        Ok(self.store.settings(thread_id).await?.masked())
    }

    /// Trims every provided field, applies it and returns the masked result.
    pub async fn update(&self, thread_id: &str, update: SettingsUpdate) -> Result<MaskedSettings> {
        let update = update.trimmed();
        let settings = self.store.update_settings(thread_id, update.clone()).await?;
        tracing::info!(
            api_url = update.api_url.is_some(),
            api_key = update.api_key.is_some(),
            platform = update.platform.is_some(),
            user_context = update.user_context.is_some(),
            "Updated settings"
        );
        Ok(settings.masked())
    }
}
