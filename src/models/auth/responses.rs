use serde::Serialize;
use ts_rs::TS;

use super::entities::PrincipalKind;

// 登录响应：会话令牌同时以 cookie 下发，此处返回便于非浏览器客户端使用
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginResponse<T: TS> {
    pub role: PrincipalKind,
    pub session_token: String,
    pub expires_in: i64,
    pub principal: T,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 当前会话主体
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct PrincipalResponse<T: TS> {
    pub role: PrincipalKind,
    pub principal: T,
}

// 鉴权拒绝时附带的跳转提示
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RedirectHint {
    pub role: PrincipalKind,
    pub redirect: String,
}
