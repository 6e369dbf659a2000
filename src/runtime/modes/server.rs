//! Server mode
//!
//! Configures the HTTP server with the shared components prepared at startup
//! and runs it until a shutdown signal arrives.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::{info, warn};

use crate::api::middleware::RequestIdMiddleware;
use crate::api::rate_limit::rate_limiter;
use crate::api::services::api_routes;
use crate::config::AppConfig;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: AppConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let storage = startup.storage.clone();
    let dictionary = startup.dictionary.clone();
    let access_gate = startup.access_gate.clone();
    let rate_limit = startup.rate_limit.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    info!("Using {} CPU cores for the server", cpu_count);

    if config.server.trusted_proxies.is_empty() {
        info!("Rate limiting by connection IP (no trusted proxies configured)");
    } else {
        warn!(
            "Rate limiting: trusted proxies configured, X-Forwarded-For is honored for {:?}",
            config.server.trusted_proxies
        );
    }

    let db_for_shutdown = storage.get_db().clone();

    let server = HttpServer::new(move || {
        // 限流状态在 rate_limit 中共享，所有 worker 使用同一个计数器
        App::new()
            .wrap(rate_limiter(&rate_limit))
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(dictionary.clone()))
            .app_data(web::PayloadConfig::new(64 * 1024))
            .service(api_routes(access_gate.clone()))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(bind_address)?.run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}
