use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::api::middleware::ApiKey;
use crate::config::StaticConfig;
use crate::errors::TinylinkError;
use crate::services::LinkService;
use crate::storage::{ExpirySweeper, KvStore};

pub struct StartupContext {
    pub link_service: Arc<LinkService>,
    pub api_key: ApiKey,
    pub sweeper: ExpirySweeper,
}

/// Open the store and build the link service. Shared by server and CLI.
pub fn open_link_service(config: &StaticConfig) -> Result<LinkService, TinylinkError> {
    let store = KvStore::open(&config.storage.path)?;
    Ok(LinkService::new(store, config.features.short_code_length))
}

/// 准备服务器启动的上下文
/// 包括存储、过期清理任务和写接口密钥
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let link_service = open_link_service(config)
        .map(Arc::new)
        .context("Failed to open link store")?;
    info!(
        "Using redb store at {} (short code length: {})",
        link_service.store().path().display(),
        link_service.code_length()
    );

    let sweeper = ExpirySweeper::spawn(
        link_service.store().clone(),
        Duration::from_secs(config.storage.sweep_interval_secs),
    );
    debug!(
        "Expiry sweeper started (interval: {}s)",
        config.storage.sweep_interval_secs
    );

    let api_key = ApiKey::new(config.api.key.clone());
    if api_key.is_configured() {
        info!("Write API available at /api/shorten");
    } else {
        warn!("Write API is disabled (api.key not set)");
    }

    debug!("Pre-startup finished in {:?}", start_time.elapsed());

    Ok(StartupContext {
        link_service,
        api_key,
        sweeper,
    })
}
