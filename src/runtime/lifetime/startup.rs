use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::middleware::AccessGate;
use crate::api::rate_limit::{RateLimitConfigured, build_rate_limit_config};
use crate::config::AppConfig;
use crate::services::{
    DictionaryClient, ExternalGeoApi, GeoAccessResolver, IpEchoSource, WordsApiSource,
    http_client::build_agent,
};
use crate::storage::{SeaOrmStorage, StorageFactory};

/// 服务器启动所需的共享组件
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub dictionary: DictionaryClient,
    pub access_gate: AccessGate,
    pub rate_limit: RateLimitConfigured,
}

/// 准备服务器启动的上下文
///
/// 数据库连接失败、限流配置非法时直接返回错误；
/// 外部服务的 key 缺失只告警，等到请求时再失败。
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let missing = config.missing_external_keys();
    if !missing.is_empty() {
        warn!(
            "External service settings are empty: {}. Affected requests will fail until they are configured.",
            missing.join(", ")
        );
    }

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to initialize favorite word storage")?;

    // 所有外部请求共用同一个 ureq Agent（连接池）
    let agent = build_agent(&config.http);

    let dictionary = DictionaryClient::new(Arc::new(WordsApiSource::new(
        agent.clone(),
        &config.dictionary,
    )));

    let resolver = GeoAccessResolver::new(Arc::new(ExternalGeoApi::new(
        agent.clone(),
        &config.geo,
    )));
    let access_gate = AccessGate::new(Arc::new(IpEchoSource::new(agent, &config.geo)), resolver);

    let rate_limit =
        build_rate_limit_config(&config.rate_limit, &config.server.trusted_proxies)?;

    info!(
        "Pre-startup processing completed in {} ms (storage backend: {}, dictionary: {})",
        start_time.elapsed().as_millis(),
        storage.backend_name(),
        dictionary.source_name()
    );

    Ok(StartupContext {
        storage,
        dictionary,
        access_gate,
        rate_limit,
    })
}
