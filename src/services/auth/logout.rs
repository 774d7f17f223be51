use actix_web::HttpResponse;

use crate::models::ApiResponse;
use crate::models::auth::PrincipalKind;
use crate::utils::SessionToken;

/// 注销：下发该角色的过期 cookie，其他角色的会话不受影响
pub fn handle_logout(role: PrincipalKind) -> HttpResponse {
    tracing::debug!("Clearing {} session", role);
    HttpResponse::Ok()
        .cookie(SessionToken::create_expired_cookie(role))
        .json(ApiResponse::success_empty("Logged out successfully!"))
}
