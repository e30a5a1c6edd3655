//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and
//! REST API. The session service is generic over the store trait but
//! pinned here to the SQLite implementation.

use std::path::PathBuf;
use std::sync::Arc;

use scenewright_core::generate::GenerationService;
use scenewright_core::llm::BoxLlmProvider;
use scenewright_core::store::SessionService;
use scenewright_infra::config::{
    api_key_from_env, default_database_url, load_global_config, resolve_data_dir,
};
use scenewright_infra::llm::OpenAiCompatProvider;
use scenewright_infra::sqlite::{DatabasePool, SqliteSessionStore};
use scenewright_types::config::GlobalConfig;

/// Concrete session service pinned to the SQLite store.
pub type ConcreteSessionService = SessionService<SqliteSessionStore>;

/// Shared application state holding all services.
///
/// `generation_service` is `None` when no provider API key is configured;
/// persistence and export commands still work, generation surfaces a
/// clear error.
#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<ConcreteSessionService>,
    pub generation_service: Option<Arc<GenerationService>>,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: data dir, config, DB, services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;

        let db_pool = DatabasePool::new(&default_database_url(&data_dir)).await?;
        let session_service = SessionService::new(SqliteSessionStore::new(db_pool));

        let generation_service = match api_key_from_env(&config.provider) {
            Ok(api_key) => {
                let provider = OpenAiCompatProvider::new(
                    api_key,
                    config.provider.base_url.clone(),
                    config.provider.model.clone(),
                );
                Some(Arc::new(GenerationService::new(
                    BoxLlmProvider::new(provider),
                    config.provider.model.clone(),
                    config.tuning.clone(),
                )))
            }
            Err(reason) => {
                tracing::debug!(%reason, "generation disabled");
                None
            }
        };

        Ok(Self {
            session_service: Arc::new(session_service),
            generation_service,
            config,
            data_dir,
        })
    }

    /// The generation service, or a uniform error when no API key is set.
    pub fn generation(&self) -> anyhow::Result<&Arc<GenerationService>> {
        self.generation_service.as_ref().ok_or_else(|| {
            anyhow::anyhow!(
                "generation requires an API key: set the {} environment variable",
                self.config.provider.api_key_env
            )
        })
    }
}
