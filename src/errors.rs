use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

#[derive(Debug, Clone)]
pub enum TinylinkError {
    Validation(String),
    NotFound(String),
    StoreCapacity(String),
    KeyCollision(String),
    Config(String),
    FileOperation(String),
    Serialization(String),
}

impl TinylinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            TinylinkError::Validation(_) => "E001",
            TinylinkError::NotFound(_) => "E002",
            TinylinkError::StoreCapacity(_) => "E003",
            TinylinkError::KeyCollision(_) => "E004",
            TinylinkError::Config(_) => "E005",
            TinylinkError::FileOperation(_) => "E006",
            TinylinkError::Serialization(_) => "E007",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            TinylinkError::Validation(_) => "Validation Error",
            TinylinkError::NotFound(_) => "Link Not Found",
            TinylinkError::StoreCapacity(_) => "Store Capacity Exhausted",
            TinylinkError::KeyCollision(_) => "Short Code Collision",
            TinylinkError::Config(_) => "Configuration Error",
            TinylinkError::FileOperation(_) => "File Operation Error",
            TinylinkError::Serialization(_) => "Serialization Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            TinylinkError::Validation(msg)
            | TinylinkError::NotFound(msg)
            | TinylinkError::StoreCapacity(msg)
            | TinylinkError::KeyCollision(msg)
            | TinylinkError::Config(msg)
            | TinylinkError::FileOperation(msg)
            | TinylinkError::Serialization(msg) => msg,
        }
    }

    /// Whether the failure is on the server side (store exhausted, no free key)
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            TinylinkError::StoreCapacity(_)
                | TinylinkError::KeyCollision(_)
                | TinylinkError::Config(_)
                | TinylinkError::FileOperation(_)
        )
    }

    /// 彩色输出，用于启动失败时打印到终端
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

impl TinylinkError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        TinylinkError::NotFound(msg.into())
    }

    pub fn store_capacity<T: Into<String>>(msg: T) -> Self {
        TinylinkError::StoreCapacity(msg.into())
    }

    pub fn key_collision<T: Into<String>>(msg: T) -> Self {
        TinylinkError::KeyCollision(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        TinylinkError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Serialization(msg.into())
    }
}

impl From<std::io::Error> for TinylinkError {
    fn from(err: std::io::Error) -> Self {
        TinylinkError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TinylinkError {
    fn from(err: serde_json::Error) -> Self {
        TinylinkError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for TinylinkError {
    fn from(err: config::ConfigError) -> Self {
        TinylinkError::Config(err.to_string())
    }
}

/// Lookup misses answer 400 rather than 404; internal failures never leak
/// their details to the client.
impl ResponseError for TinylinkError {
    fn status_code(&self) -> StatusCode {
        if self.is_internal() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::BAD_REQUEST
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = if self.is_internal() {
            format!("Internal server error ({})", self.code())
        } else {
            self.message().to_string()
        };

        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(body)
    }
}

pub type Result<T> = std::result::Result<T, TinylinkError>;
