use tracing::info;

use wordgate::config::AppConfig;
use wordgate::errors::WordgateError;
use wordgate::runtime::run_server;
use wordgate::system::{init_logging, install_panic_hook};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    install_panic_hook();

    let config = AppConfig::load()?;
    // guard 必须存活到进程结束，否则缓冲中的日志会丢失
    let _log_guard = init_logging(&config.logging)?;

    info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = run_server(config).await {
        if let Some(app_err) = e.downcast_ref::<WordgateError>() {
            eprintln!("{}", app_err.format_colored());
        }
        return Err(e);
    }

    Ok(())
}
