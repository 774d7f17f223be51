//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 业务错误（校验、重复标识、凭据、重复提交、分数越界）与基础设施错误共用同一枚举，
//! 在操作边界通过 `to_response()` 转换为统一的 API 响应。

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use std::fmt;

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_portal_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum PortalError {
            $($variant(String),)*
        }

        impl PortalError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PortalError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PortalError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PortalError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_portal_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Serialization("E005", "Serialization Error"),
    DateParse("E006", "Date Parse Error"),
    BlobPluginNotFound("E007", "Blob Store Plugin Not Found"),
    Validation("E010", "Validation Error"),
    DuplicateIdentifier("E011", "Duplicate Identifier"),
    NotFound("E012", "Resource Not Found"),
    BadCredential("E013", "Bad Credential"),
    AlreadySubmitted("E014", "Already Submitted"),
    NoFile("E015", "No File"),
    InvalidNumber("E016", "Invalid Number"),
    OutOfRange("E017", "Out Of Range"),
}

impl PortalError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为可恢复的业务错误（用户可修正输入后重试）
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            PortalError::DatabaseConfig(_)
                | PortalError::DatabaseConnection(_)
                | PortalError::DatabaseOperation(_)
                | PortalError::FileOperation(_)
                | PortalError::Serialization(_)
                | PortalError::BlobPluginNotFound(_)
        )
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            PortalError::Validation(_)
            | PortalError::NoFile(_)
            | PortalError::DateParse(_) => StatusCode::BAD_REQUEST,
            PortalError::InvalidNumber(_) | PortalError::OutOfRange(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            PortalError::DuplicateIdentifier(_) | PortalError::AlreadySubmitted(_) => {
                StatusCode::CONFLICT
            }
            PortalError::NotFound(_) => StatusCode::NOT_FOUND,
            PortalError::BadCredential(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对应的 API 业务码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            PortalError::Validation(_) | PortalError::DateParse(_) => ErrorCode::BadRequest,
            PortalError::DuplicateIdentifier(_) => ErrorCode::DuplicateIdentifier,
            PortalError::NotFound(_) => ErrorCode::NotFound,
            PortalError::BadCredential(_) => ErrorCode::AuthFailed,
            PortalError::AlreadySubmitted(_) => ErrorCode::AlreadySubmitted,
            PortalError::NoFile(_) => ErrorCode::FileNotFound,
            PortalError::InvalidNumber(_) => ErrorCode::MarksInvalid,
            PortalError::OutOfRange(_) => ErrorCode::MarksOutOfRange,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 转换为统一响应（基础设施错误会记录日志）
    pub fn to_response(&self) -> HttpResponse {
        if !self.is_recoverable() {
            tracing::error!("{}", self.format_simple());
        }
        HttpResponse::build(self.status_code())
            .json(ApiResponse::error_empty(self.error_code(), self.message()))
    }

    /// 转换为携带数据的统一响应（用于需要回显表单的场景）
    pub fn to_response_with<T: ts_rs::TS + serde::Serialize>(&self, data: T) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ApiResponse::error(self.error_code(), data, self.message()))
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortalError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PortalError {
    fn from(err: sea_orm::DbErr) -> Self {
        PortalError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        PortalError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for PortalError {
    fn from(err: chrono::ParseError) -> Self {
        PortalError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;
