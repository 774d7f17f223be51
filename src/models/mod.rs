//! 数据模型定义
//!
//! 按业务域划分：每个域包含 `entities`（业务实体）、`requests`（请求体/查询参数）
//! 和 `responses`（响应体）。

pub mod common;

pub mod admins {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod auth {
    pub mod entities;
    pub mod requests;
    pub mod responses;

    pub use entities::{PrincipalKind, SessionState};
}

pub mod faculties {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod problems {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod students {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod submissions {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub use common::{ApiResponse, FormNumber, PaginatedResponse, PaginationInfo, PaginationQuery};

use serde::Serialize;

/// API 业务码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    RateLimitExceeded = 1029,

    // 身份相关
    AuthFailed = 2000,
    DuplicateIdentifier = 2001,

    // 提交相关
    AlreadySubmitted = 4001,
    FileNotFound = 4002,
    FileSizeExceeded = 4003,
    MultifileUploadNotAllowed = 4004,
    FileUploadFailed = 4005,

    // 评阅相关
    MarksInvalid = 5000,
    MarksOutOfRange = 5001,
}
