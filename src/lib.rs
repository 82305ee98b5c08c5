use std::{path::Path, sync::Arc};

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;
pub mod import;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{relay, storage, utils};

use entities::portfolio_data::PortfolioData;
use errors::StorageError;
use relay::{emailjs::EmailJsRelay, simulated::SimulatedRelay};
use repositories::{relay::MessageRelay, storage::StorageRepository};
use settings::{AppConfig, RelayMode, StorageBackend};
use storage::{file_store::FileStore, memory_store::MemoryStore};
use use_cases::{
    analytics::{AnalyticsHandler, PresenceTracker},
    auth::AuthHandler,
    contact::{ContactMeHandler, RelayTemplates},
    content::ContentStore,
};
use utils::clock::{Clock, SystemClock};

pub struct AppState {
    pub content: Arc<ContentStore>,
    pub auth_handler: AuthHandler,
    pub analytics_handler: AnalyticsHandler,
    pub contact_handler: ContactMeHandler,
    pub storage_backend: StorageBackend,
}

/// The collaborators an [`AppState`] is assembled from.
pub struct AppParts {
    pub storage: Arc<dyn StorageRepository>,
    pub clock: Arc<dyn Clock>,
    pub relay: Arc<dyn MessageRelay>,
    pub simulated: Arc<dyn MessageRelay>,
    pub defaults: PortfolioData,
}

impl AppState {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let storage: Arc<dyn StorageRepository> = match config.storage_backend {
            StorageBackend::File => Arc::new(FileStore::open(&config.data_dir)?),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
        };

        let simulated: Arc<dyn MessageRelay> = Arc::new(SimulatedRelay::new(config.simulated_delay()));
        let relay: Arc<dyn MessageRelay> = match config.relay_mode {
            RelayMode::EmailJs => Arc::new(EmailJsRelay::new(config)?),
            RelayMode::Simulated => simulated.clone(),
        };

        let defaults = PortfolioData::load_defaults(config.default_data_path.as_deref().map(Path::new))?;

        let state = Self::from_parts(config, AppParts {
            storage,
            clock: Arc::new(SystemClock),
            relay,
            simulated,
            defaults,
        })?;
        Ok(state)
    }

    pub fn from_parts(config: &AppConfig, parts: AppParts) -> Result<Self, StorageError> {
        let AppParts { storage, clock, relay, simulated, defaults } = parts;

        let content = Arc::new(ContentStore::open(storage.clone(), clock.clone(), defaults)?);
        let presence = PresenceTracker::open(storage.clone(), clock.clone(), config.presence_window())?;

        let auth_handler = AuthHandler::new(
            storage,
            clock,
            simulated.clone(),
            config.session_duration(),
        );
        let analytics_handler = AnalyticsHandler::new(content.clone(), presence);
        let contact_handler = ContactMeHandler::new(relay, simulated, RelayTemplates {
            contact_service_id: config.emailjs_service_id.clone(),
            hire_service_id: config.hire_service_id().to_string(),
            template_id: config.emailjs_template_id.clone(),
        });

        Ok(AppState {
            content,
            auth_handler,
            analytics_handler,
            contact_handler,
            storage_backend: config.storage_backend,
        })
    }
}
