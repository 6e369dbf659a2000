//! 出站 HTTP 客户端
//!
//! 所有外部 API（词典、地理位置、IP 回显）共用一个 ureq Agent。
//! ureq 是同步客户端，请求放在 `spawn_blocking` 中执行。

use std::time::Duration;

use tracing::warn;
use ureq::Agent;

use crate::config::HttpClientConfig;
use crate::errors::{Result, WordgateError};

/// 根据配置构建共享的 HTTP Agent（ureq 的 Agent 是 Send + Sync，clone 开销很小）
pub fn build_agent(config: &HttpClientConfig) -> Agent {
    Agent::config_builder()
        .timeout_global(config.timeout_secs.map(Duration::from_secs))
        .build()
        .into()
}

/// 在阻塞线程池中执行同步 HTTP 请求
///
/// `wrap` 决定任务本身失败（panic / 被取消）时归入哪类错误。
pub async fn run_blocking<T, F>(task: F, wrap: fn(String) -> WordgateError) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await.unwrap_or_else(|e| {
        warn!("Outbound HTTP spawn_blocking failed: {}", e);
        Err(wrap(e.to_string()))
    })
}
