//! Service layer
//!
//! Outbound integrations shared by the HTTP handlers and the access gate:
//! - `dictionary`: word lookups against the dictionary API
//! - `geo_access`: IP → country → allow/deny decision
//! - `public_ip`: public IP discovery through an IP echo service

pub mod dictionary;
pub mod geo_access;
pub mod http_client;
pub mod public_ip;

pub use dictionary::{DictionaryClient, DictionaryEntry, DictionarySource, WordsApiSource};
pub use geo_access::{
    ALLOWED_COUNTRIES, ExternalGeoApi, GeoAccessResolver, GeoDecision, GeoLocator,
    LocationResponse, is_country_allowed,
};
pub use public_ip::{IpEchoSource, PublicIpSource};
