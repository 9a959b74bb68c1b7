//! Composition root: builds stores, gateway and use cases from configuration.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use parlor_application::{
    BackupService, ChatUseCase, ConversationService, MemoryService, ProjectService,
    SessionService, SettingsService,
};
use parlor_core::clock::{Clock, SystemClock};
use parlor_core::config::{AppConfig, StorageMode};
use parlor_core::gateway::ChatGateway;
use parlor_core::store::ChatStore;
use parlor_infrastructure::{JsonFileStore, SessionStore};
use parlor_interaction::HttpChatGateway;

/// Use cases that need the durable store.
pub struct DurableServices {
    pub conversations: ConversationService,
    pub projects: ProjectService,
    pub memories: MemoryService,
    pub backup: BackupService,
}

pub struct AppContext {
    pub mode: StorageMode,
    pub chat: ChatUseCase,
    pub settings: SettingsService,
    pub durable: Option<DurableServices>,
    pub sessions: Option<SessionService>,
}

impl AppContext {
    /// Durable services, or an error naming the active storage mode.
    pub fn durable(&self) -> Result<&DurableServices> {
        self.durable.as_ref().ok_or_else(|| {
            anyhow!(
                "This command needs the durable store, but storage mode is '{}'. \
                 Use --storage file or set PARLOR_STORAGE=file.",
                self.mode
            )
        })
    }
}

pub fn bootstrap(config: &AppConfig) -> AppContext {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let gateway: Arc<dyn ChatGateway> = Arc::new(HttpChatGateway::new());
    let defaults = config.api.to_settings();

    match config.storage.mode {
        StorageMode::File => {
            let data_dir = config.data_dir();
            tracing::info!(data_dir = %data_dir.display(), "Using JSON file store");
            let store = Arc::new(JsonFileStore::in_dir(&data_dir, defaults, clock.clone()));
            let chat_store: Arc<dyn ChatStore> = store.clone();

            AppContext {
                mode: StorageMode::File,
                chat: ChatUseCase::new(chat_store.clone(), gateway, clock),
                settings: SettingsService::new(chat_store),
                durable: Some(DurableServices {
                    conversations: ConversationService::new(store.clone()),
                    projects: ProjectService::new(store.clone()),
                    memories: MemoryService::new(store.clone()),
                    backup: BackupService::new(store),
                }),
                sessions: None,
            }
        }
        StorageMode::Session => {
            tracing::info!("Using in-memory session store");
            let store = Arc::new(SessionStore::new(defaults, clock.clone()));
            let chat_store: Arc<dyn ChatStore> = store.clone();

            AppContext {
                mode: StorageMode::Session,
                chat: ChatUseCase::new(chat_store.clone(), gateway, clock),
                settings: SettingsService::new(chat_store),
                durable: None,
                sessions: Some(SessionService::new(store, config.is_production())),
            }
        }
    }
}
