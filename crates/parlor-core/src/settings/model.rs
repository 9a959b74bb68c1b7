//! API settings models.

use serde::{Deserialize, Serialize};

/// Endpoint used when nothing else is configured.
pub const DEFAULT_API_URL: &str =
    "https://95tw6665.execute-api.us-east-2.amazonaws.com/dev/chat?flow_name=prompt-only-flow";
pub const DEFAULT_PLATFORM: &str = "adhoc";
pub const DEFAULT_USER_CONTEXT: &str = "user";

/// Fixed prefix shown in place of the hidden part of an API key.
pub const API_KEY_MASK: &str = "••••";

/// Connection settings for the external chat API.
///
/// One instance exists per persistence scope: globally in the JSON file
/// store, per session in the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSettings {
    pub api_url: String,
    pub api_key: String,
    pub platform: String,
    pub user_context: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            platform: DEFAULT_PLATFORM.to_string(),
            user_context: DEFAULT_USER_CONTEXT.to_string(),
        }
    }
}

impl ApiSettings {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Applies every field present in `update`.
    pub fn apply(&mut self, update: &SettingsUpdate) {
        if let Some(api_url) = &update.api_url {
            self.api_url = api_url.clone();
        }
        if let Some(api_key) = &update.api_key {
            self.api_key = api_key.clone();
        }
        if let Some(platform) = &update.platform {
            self.platform = platform.clone();
        }
        if let Some(user_context) = &update.user_context {
            self.user_context = user_context.clone();
        }
    }

    /// The only form in which settings leave the process.
    pub fn masked(&self) -> MaskedSettings {
        MaskedSettings {
            api_url: self.api_url.clone(),
            api_key: mask_api_key(&self.api_key),
            platform: self.platform.clone(),
            user_context: self.user_context.clone(),
        }
    }
}

/// Partial settings update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_context: Option<String>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.api_url.is_none()
            && self.api_key.is_none()
            && self.platform.is_none()
            && self.user_context.is_none()
    }

    /// Trims every present field.
    pub fn trimmed(self) -> Self {
        let trim = |v: Option<String>| v.map(|s| s.trim().to_string());
        Self {
            api_url: trim(self.api_url),
            api_key: trim(self.api_key),
            platform: trim(self.platform),
            user_context: trim(self.user_context),
        }
    }
}

/// Settings as exposed to callers: the API key is masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskedSettings {
    pub api_url: String,
    pub api_key: String,
    pub platform: String,
    pub user_context: String,
}

/// Masks an API key as the fixed prefix plus its last four characters.
/// An empty key stays empty.
pub fn mask_api_key(api_key: &str) -> String {
    if api_key.is_empty() {
        return String::new();
    }
    let count = api_key.chars().count();
    let tail: String = api_key.chars().skip(count.saturating_sub(4)).collect();
    format!("{}{}", API_KEY_MASK, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key(""), "");
        assert_eq!(mask_api_key("sk-abcdef1234"), "••••1234");
        assert_eq!(mask_api_key("abc"), "••••abc");
    }

    #[test]
    fn test_masked_never_contains_full_key() {
        let settings = ApiSettings {
            api_key: "super-secret-key-9876".to_string(),
            ..ApiSettings::default()
        };
        let masked = settings.masked();
        assert_eq!(masked.api_key, "••••9876");
        assert!(!serde_json::to_string(&masked).unwrap().contains("super-secret"));
    }

    #[test]
    fn test_apply_partial_update() {
        let mut settings = ApiSettings::default();
        settings.apply(&SettingsUpdate {
            api_key: Some("k-1".to_string()),
            ..SettingsUpdate::default()
        });
        assert_eq!(settings.api_key, "k-1");
        assert_eq!(settings.platform, DEFAULT_PLATFORM);
        assert_eq!(settings.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_update_trimmed() {
        let update = SettingsUpdate {
            api_url: Some("  https://example.test/chat ".to_string()),
            platform: Some(" web ".to_string()),
            ..SettingsUpdate::default()
        }
        .trimmed();
        assert_eq!(update.api_url.as_deref(), Some("https://example.test/chat"));
        assert_eq!(update.platform.as_deref(), Some("web"));
        assert!(update.api_key.is_none());
    }

    #[test]
    fn test_settings_json_uses_camel_case() {
        let json = serde_json::to_value(ApiSettings::default()).unwrap();
        assert!(json.get("apiUrl").is_some());
        assert!(json.get("userContext").is_some());
    }
}
