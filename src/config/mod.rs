//! 应用配置
//!
//! 启动时通过 [`AppConfig::load`] 构建一次，之后以引用或 `Arc` 的形式
//! 传给词典客户端、地理位置解析器和存储层。

mod structs;

pub use structs::*;
