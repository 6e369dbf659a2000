//! Wordgate - dictionary lookups behind a geolocation gate, plus a favorite-words store
//!
//! # Architecture
//! - `api`: HTTP handlers, access gate and rate limiting
//! - `services`: dictionary, public IP and geolocation clients
//! - `storage`: favorite word persistence (SeaORM)
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle
//! - `system`: Logging and panic handling

pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
