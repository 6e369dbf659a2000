//! 地理位置访问决策
//!
//! 白名单是硬编码的策略常量，不走配置。

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{Result, WordgateError};

/// 允许访问的国家（与地理位置 API 返回的 `country` 字段精确匹配）
pub const ALLOWED_COUNTRIES: [&str; 2] = ["Nigeria", "United States"];

/// 判断国家是否在白名单中
pub fn is_country_allowed(country: &str) -> bool {
    ALLOWED_COUNTRIES.contains(&country)
}

/// 地理位置 API 响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationResponse {
    #[serde(default)]
    pub country: Option<String>,
}

/// 一次访问决策（每个受保护请求生成一次）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoDecision {
    pub country: String,
    pub can_access: bool,
}

impl GeoDecision {
    pub fn for_country(country: impl Into<String>) -> Self {
        let country = country.into();
        let can_access = is_country_allowed(&country);
        Self {
            country,
            can_access,
        }
    }
}

/// 地理位置查询 trait
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// 查询 IP 的地理位置，上游没有返回数据时为 `None`
    async fn fetch_location(&self, ip: &str) -> Result<Option<LocationResponse>>;

    /// 获取 provider 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// IP → 访问决策
#[derive(Clone)]
pub struct GeoAccessResolver {
    locator: Arc<dyn GeoLocator>,
}

impl GeoAccessResolver {
    pub fn new(locator: Arc<dyn GeoLocator>) -> Self {
        info!("GeoAccess: Initialized with {} provider", locator.name());
        Self { locator }
    }

    /// 解析 IP 并给出访问决策
    ///
    /// 上游无数据时返回 `Resolution("cannot resolve IP")`，不重试。
    pub async fn resolve_access(&self, ip: &str) -> Result<GeoDecision> {
        debug!("Resolving location for IP {}", ip);

        let location = self
            .locator
            .fetch_location(ip)
            .await?
            .ok_or_else(|| WordgateError::resolution("cannot resolve IP"))?;

        let decision = GeoDecision::for_country(location.country.unwrap_or_default());
        debug!(
            "IP {} resolved to country \"{}\" (can_access={})",
            ip, decision.country, decision.can_access
        );

        Ok(decision)
    }

    pub fn provider_name(&self) -> &'static str {
        self.locator.name()
    }
}
