//! 外部地理位置 API 实现
//!
//! `GET {api_url}?ip={ip}&auth={api_key}`，期望返回 `{"country": "..."}`。
//! 不缓存、不重试。

use async_trait::async_trait;
use tracing::{trace, warn};
use ureq::Agent;

use super::provider::{GeoLocator, LocationResponse};
use crate::config::GeoConfig;
use crate::errors::{Result, WordgateError};
use crate::services::http_client::run_blocking;

/// 外部 API 地理位置 Provider
pub struct ExternalGeoApi {
    agent: Agent,
    api_url: String,
    api_key: String,
}

impl ExternalGeoApi {
    pub fn new(agent: Agent, config: &GeoConfig) -> Self {
        Self {
            agent,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// 解析响应正文
    ///
    /// 空正文或 `null` 视为没有数据；只接受 JSON 对象，数组等其它形态视为解析失败。
    pub fn parse_body(body: &str) -> Result<Option<LocationResponse>> {
        if body.trim().is_empty() {
            return Ok(None);
        }

        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|e| WordgateError::resolution(e.to_string()))?;

        match value {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Object(_) => serde_json::from_value::<LocationResponse>(value)
                .map(Some)
                .map_err(|e| WordgateError::resolution(e.to_string())),
            other => Err(WordgateError::resolution(format!(
                "unexpected geolocation response: {}",
                other
            ))),
        }
    }

    /// 同步请求（在 spawn_blocking 中调用）
    ///
    /// API key 只通过 query 参数传递，不出现在任何日志里。
    fn fetch_sync(
        agent: Agent,
        api_url: String,
        api_key: String,
        ip: String,
    ) -> Result<Option<LocationResponse>> {
        if api_url.trim().is_empty() {
            return Err(WordgateError::resolution(
                "geolocation API URL is not configured",
            ));
        }

        let resp = agent
            .get(&api_url)
            .query("ip", &ip)
            .query("auth", &api_key)
            .call()
            .map_err(|e| {
                warn!("Geolocation API request for IP {} failed: {}", ip, e);
                WordgateError::resolution(e.to_string())
            })?;

        let body = resp.into_body().read_to_string().map_err(|e| {
            warn!("Geolocation API response for IP {} unreadable: {}", ip, e);
            WordgateError::resolution(e.to_string())
        })?;

        let location = Self::parse_body(&body)?;
        trace!("Geolocation API lookup for {}: {:?}", ip, location);
        Ok(location)
    }
}

#[async_trait]
impl GeoLocator for ExternalGeoApi {
    async fn fetch_location(&self, ip: &str) -> Result<Option<LocationResponse>> {
        let agent = self.agent.clone();
        let api_url = self.api_url.clone();
        let api_key = self.api_key.clone();
        let ip = ip.to_string();

        run_blocking(
            move || Self::fetch_sync(agent, api_url, api_key, ip),
            WordgateError::Resolution,
        )
        .await
    }

    fn name(&self) -> &'static str {
        "ExternalAPI"
    }
}
