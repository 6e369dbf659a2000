//! 应用生命周期
//!
//! - `lifetime`: 启动准备与优雅关闭
//! - `modes`: 运行模式（目前只有 HTTP server）

pub mod lifetime;
pub mod modes;

pub use modes::run_server;
