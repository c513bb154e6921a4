use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum TinylinkError {
    Validation(String),
    NotFound(String),
    StoreRead(String),
    StoreWrite(String),
    RandomSource(String),
    StoreOpen(String),
    Config(String),
}

impl TinylinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            TinylinkError::Validation(_) => "E001",
            TinylinkError::NotFound(_) => "E002",
            TinylinkError::StoreRead(_) => "E003",
            TinylinkError::StoreWrite(_) => "E004",
            TinylinkError::RandomSource(_) => "E005",
            TinylinkError::StoreOpen(_) => "E006",
            TinylinkError::Config(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            TinylinkError::Validation(_) => "Validation Error",
            TinylinkError::NotFound(_) => "Resource Not Found",
            TinylinkError::StoreRead(_) => "Store Read Error",
            TinylinkError::StoreWrite(_) => "Store Write Error",
            TinylinkError::RandomSource(_) => "Random Source Error",
            TinylinkError::StoreOpen(_) => "Store Open Error",
            TinylinkError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            TinylinkError::Validation(msg) => msg,
            TinylinkError::NotFound(msg) => msg,
            TinylinkError::StoreRead(msg) => msg,
            TinylinkError::StoreWrite(msg) => msg,
            TinylinkError::RandomSource(msg) => msg,
            TinylinkError::StoreOpen(msg) => msg,
            TinylinkError::Config(msg) => msg,
        }
    }

    /// HTTP status the web layer answers with for this error.
    ///
    /// Only validation and not-found are the caller's fault; everything else
    /// is an internal failure and is reported as 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            TinylinkError::Validation(_) => StatusCode::BAD_REQUEST,
            TinylinkError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
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

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TinylinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TinylinkError {}

// 便捷的构造函数
impl TinylinkError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        TinylinkError::NotFound(msg.into())
    }

    pub fn store_read<T: Into<String>>(msg: T) -> Self {
        TinylinkError::StoreRead(msg.into())
    }

    pub fn store_write<T: Into<String>>(msg: T) -> Self {
        TinylinkError::StoreWrite(msg.into())
    }

    pub fn random_source<T: Into<String>>(msg: T) -> Self {
        TinylinkError::RandomSource(msg.into())
    }

    pub fn store_open<T: Into<String>>(msg: T) -> Self {
        TinylinkError::StoreOpen(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Config(msg.into())
    }
}

impl From<redb::DatabaseError> for TinylinkError {
    fn from(err: redb::DatabaseError) -> Self {
        TinylinkError::StoreOpen(err.to_string())
    }
}

impl From<config::ConfigError> for TinylinkError {
    fn from(err: config::ConfigError) -> Self {
        TinylinkError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TinylinkError>;
