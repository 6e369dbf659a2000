//! 公网 IP 探测
//!
//! 每个受保护请求都会请求一次 IP 回显服务（默认 `http://api.ipify.org/`），
//! 不做缓存。

use async_trait::async_trait;
use tracing::{trace, warn};
use ureq::Agent;

use super::http_client::run_blocking;
use crate::config::GeoConfig;
use crate::errors::{Result, WordgateError};

/// 公网 IP 来源 trait
#[async_trait]
pub trait PublicIpSource: Send + Sync {
    /// 获取当前公网 IP（原样文本，不做格式校验）
    async fn discover(&self) -> Result<String>;

    fn name(&self) -> &'static str;
}

/// 基于 IP 回显服务的实现
pub struct IpEchoSource {
    agent: Agent,
    url: String,
}

impl IpEchoSource {
    pub fn new(agent: Agent, config: &GeoConfig) -> Self {
        Self {
            agent,
            url: config.ip_echo_url.clone(),
        }
    }

    /// 去掉首尾空白，空正文视为失败
    pub fn parse_body(body: &str) -> Result<String> {
        let ip = body.trim();
        if ip.is_empty() {
            return Err(WordgateError::resolution(
                "IP echo service returned an empty body",
            ));
        }
        Ok(ip.to_string())
    }

    fn discover_sync(agent: Agent, url: String) -> Result<String> {
        let resp = agent.get(&url).call().map_err(|e| {
            warn!("IP echo request to \"{}\" failed: {}", url, e);
            WordgateError::resolution(e.to_string())
        })?;

        let body = resp
            .into_body()
            .read_to_string()
            .map_err(|e| WordgateError::resolution(e.to_string()))?;

        let ip = Self::parse_body(&body)?;
        trace!("IP echo service returned {}", ip);
        Ok(ip)
    }
}

#[async_trait]
impl PublicIpSource for IpEchoSource {
    async fn discover(&self) -> Result<String> {
        let agent = self.agent.clone();
        let url = self.url.clone();

        run_blocking(
            move || Self::discover_sync(agent, url),
            WordgateError::Resolution,
        )
        .await
    }

    fn name(&self) -> &'static str {
        "IpEcho"
    }
}
