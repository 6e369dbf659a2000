use std::fmt;

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordgateError {
    Validation(String),
    NotFound(String),
    Resolution(String),
    Lookup(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Serialization(String),
    FileOperation(String),
}

impl WordgateError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            WordgateError::Validation(_) => "E001",
            WordgateError::NotFound(_) => "E002",
            WordgateError::Resolution(_) => "E003",
            WordgateError::Lookup(_) => "E004",
            WordgateError::DatabaseConfig(_) => "E005",
            WordgateError::DatabaseConnection(_) => "E006",
            WordgateError::DatabaseOperation(_) => "E007",
            WordgateError::Serialization(_) => "E008",
            WordgateError::FileOperation(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            WordgateError::Validation(_) => "Validation Error",
            WordgateError::NotFound(_) => "Resource Not Found",
            WordgateError::Resolution(_) => "IP Resolution Error",
            WordgateError::Lookup(_) => "Dictionary Lookup Error",
            WordgateError::DatabaseConfig(_) => "Database Configuration Error",
            WordgateError::DatabaseConnection(_) => "Database Connection Error",
            WordgateError::DatabaseOperation(_) => "Database Operation Error",
            WordgateError::Serialization(_) => "Serialization Error",
            WordgateError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            WordgateError::Validation(msg)
            | WordgateError::NotFound(msg)
            | WordgateError::Resolution(msg)
            | WordgateError::Lookup(msg)
            | WordgateError::DatabaseConfig(msg)
            | WordgateError::DatabaseConnection(msg)
            | WordgateError::DatabaseOperation(msg)
            | WordgateError::Serialization(msg)
            | WordgateError::FileOperation(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            WordgateError::Validation(_) => StatusCode::BAD_REQUEST,
            WordgateError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于启动失败时的终端输出）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for WordgateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for WordgateError {}

/// 错误响应直接回显原始错误信息（纯文本）
impl ResponseError for WordgateError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.http_status())
            .insert_header(ContentType::plaintext())
            .body(self.message().to_string())
    }
}

// 便捷的构造函数
impl WordgateError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        WordgateError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        WordgateError::NotFound(msg.into())
    }

    pub fn resolution<T: Into<String>>(msg: T) -> Self {
        WordgateError::Resolution(msg.into())
    }

    pub fn lookup<T: Into<String>>(msg: T) -> Self {
        WordgateError::Lookup(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        WordgateError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        WordgateError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        WordgateError::DatabaseOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        WordgateError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        WordgateError::FileOperation(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for WordgateError {
    fn from(err: sea_orm::DbErr) -> Self {
        WordgateError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for WordgateError {
    fn from(err: std::io::Error) -> Self {
        WordgateError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for WordgateError {
    fn from(err: serde_json::Error) -> Self {
        WordgateError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WordgateError>;
