//! 地理位置访问控制
//!
//! 根据 IP 解析国家，并按固定白名单决定是否允许访问：
//! - `provider`: 访问决策与查询 trait
//! - `external_api`: 基于外部 HTTP API 的实现

mod external_api;
mod provider;

pub use external_api::ExternalGeoApi;
pub use provider::{
    ALLOWED_COUNTRIES, GeoAccessResolver, GeoDecision, GeoLocator, LocationResponse,
    is_country_allowed,
};
