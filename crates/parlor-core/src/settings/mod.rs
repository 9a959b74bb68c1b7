//! API settings domain module.

mod model;

pub use model::{
    API_KEY_MASK, ApiSettings, DEFAULT_API_URL, DEFAULT_PLATFORM, DEFAULT_USER_CONTEXT,
    MaskedSettings, SettingsUpdate, mask_api_key,
};
