//! HTTP surface
//!
//! - `middleware`: access gate and request tracing
//! - `rate_limit`: process-wide per-client rate limiting
//! - `services`: route handlers and route table

pub mod middleware;
pub mod rate_limit;
pub mod services;
