//! 全局限流
//!
//! 所有端点共享同一个 GCRA 限流器，按客户端 IP 计数。
//! 默认：突发 2 次，每 120 秒补充 1 个令牌，
//! 任意 2 分钟窗口内第 3 个请求都会被拒绝（429）。

use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, KeyExtractor, SimpleKeyExtractionError,
};
use actix_web::dev::ServiceRequest;
use governor::middleware::StateInformationMiddleware;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::RateLimitConfig;

pub type RateLimitConfigured = GovernorConfig<ClientKeyExtractor, StateInformationMiddleware>;

/// 限流 key 提取器
///
/// - 默认使用连接 IP（peer_addr），无法被伪造
/// - 如果连接来自配置的可信代理，则使用 X-Forwarded-For
#[derive(Clone, Default)]
pub struct ClientKeyExtractor {
    trusted_proxies: Arc<Vec<String>>,
}

impl ClientKeyExtractor {
    pub fn new(trusted_proxies: &[String]) -> Self {
        Self {
            trusted_proxies: Arc::new(trusted_proxies.to_vec()),
        }
    }
}

impl KeyExtractor for ClientKeyExtractor {
    type Key = String;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        let conn_info = req.connection_info();

        let peer_ip = conn_info
            .peer_addr()
            .ok_or_else(|| SimpleKeyExtractionError::new("Unable to extract peer IP"))?;

        if !self.trusted_proxies.is_empty() && is_trusted_proxy(peer_ip, &self.trusted_proxies) {
            let real_ip = conn_info.realip_remote_addr().unwrap_or(peer_ip);
            debug!("Rate limit key from trusted proxy: {}", real_ip);
            Ok(real_ip.to_string())
        } else {
            Ok(peer_ip.to_string())
        }
    }
}

/// 检查 IP 是否在可信代理列表中
pub fn is_trusted_proxy(ip: &str, trusted_proxies: &[String]) -> bool {
    let Ok(ip_addr) = ip.parse::<IpAddr>() else {
        return false;
    };

    trusted_proxies.iter().any(|proxy| {
        if proxy.contains('/') {
            ip_in_cidr(&ip_addr, proxy)
        } else {
            proxy
                .parse::<IpAddr>()
                .is_ok_and(|proxy_addr| proxy_addr == ip_addr)
        }
    })
}

/// CIDR 检查
pub fn ip_in_cidr(ip: &IpAddr, cidr: &str) -> bool {
    let Some((network, prefix_len)) = cidr.split_once('/') else {
        return false;
    };
    let Ok(prefix_len) = prefix_len.parse::<u32>() else {
        return false;
    };
    let Ok(network_addr) = network.parse::<IpAddr>() else {
        return false;
    };

    match (ip, network_addr) {
        (IpAddr::V4(ip), IpAddr::V4(net)) if prefix_len <= 32 => {
            let mask = u32::MAX.checked_shl(32 - prefix_len).unwrap_or(0);
            (u32::from(*ip) & mask) == (u32::from(net) & mask)
        }
        (IpAddr::V6(ip), IpAddr::V6(net)) if prefix_len <= 128 => {
            let mask = u128::MAX.checked_shl(128 - prefix_len).unwrap_or(0);
            (u128::from(*ip) & mask) == (u128::from(net) & mask)
        }
        _ => false,
    }
}

/// 构建限流配置
///
/// 配置只构建一次，所有 worker 通过 `Governor::new(&config)` 共享同一个计数状态。
pub fn build_rate_limit_config(
    config: &RateLimitConfig,
    trusted_proxies: &[String],
) -> anyhow::Result<RateLimitConfigured> {
    if config.burst_size == 0 {
        anyhow::bail!("rate_limit.burst_size must be greater than 0");
    }
    if config.seconds_per_request == 0 {
        anyhow::bail!("rate_limit.seconds_per_request must be greater than 0");
    }

    let governor_config = GovernorConfigBuilder::default()
        .seconds_per_request(config.seconds_per_request)
        .burst_size(config.burst_size)
        .key_extractor(ClientKeyExtractor::new(trusted_proxies))
        .use_headers()
        .finish()
        .expect("Invalid rate limit config");

    info!(
        "Rate limiter configured: burst {}, 1 request per {}s",
        config.burst_size, config.seconds_per_request
    );
    Ok(governor_config)
}

/// 创建限流中间件
pub fn rate_limiter(
    config: &RateLimitConfigured,
) -> Governor<ClientKeyExtractor, StateInformationMiddleware> {
    Governor::new(config)
}
