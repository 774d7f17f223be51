use crate::config::AppConfig;
use crate::models::auth::PrincipalKind;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// 会话令牌 Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,  // 主体 ID
    pub role: String, // 签发角色
    pub exp: usize,   // 过期时间
    pub iat: usize,   // 签发时间
}

pub struct SessionToken;

impl SessionToken {
    fn get_secret() -> String {
        AppConfig::get().session.secret.clone()
    }

    /// 会话有效期
    pub fn expiry() -> chrono::Duration {
        chrono::Duration::minutes(AppConfig::get().session.expiry_minutes)
    }

    /// 签发某角色的会话令牌
    pub fn issue(
        principal_id: i64,
        role: PrincipalKind,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::issue_with_expiry(principal_id, role, Self::expiry())
    }

    pub fn issue_with_expiry(
        principal_id: i64,
        role: PrincipalKind,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = SessionClaims {
            sub: principal_id.to_string(),
            role: role.as_str().to_string(),
            exp: expiration.timestamp().max(0) as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(Self::get_secret().as_ref());
        encode(&Header::default(), &claims, &encoding_key)
    }

    /// 校验令牌并要求角色一致，返回主体 ID
    pub fn verify_for(
        token: &str,
        expected: PrincipalKind,
    ) -> Result<i64, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(Self::get_secret().as_ref());
        let mut validation = Validation::default();
        validation.leeway = 0;

        let claims = decode::<SessionClaims>(token, &decoding_key, &validation)?.claims;
        if claims.role != expected.as_str() {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        claims
            .sub
            .parse::<i64>()
            .map_err(|_| jsonwebtoken::errors::ErrorKind::InvalidToken.into())
    }

    /// 某角色的会话 cookie 名
    pub fn cookie_name(role: PrincipalKind) -> String {
        format!("{}_{}_session", AppConfig::get().session.cookie_prefix, role)
    }

    /// 创建会话 Cookie
    pub fn create_cookie(role: PrincipalKind, token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(Self::cookie_name(role), token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::minutes(
                config.session.expiry_minutes,
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 创建过期的会话 Cookie（用于注销，仅影响该角色）
    pub fn create_expired_cookie(role: PrincipalKind) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(Self::cookie_name(role), "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 从请求中提取某角色的令牌：优先 cookie，其次 Bearer
    pub fn extract_from_request(req: &actix_web::HttpRequest, role: PrincipalKind) -> Option<String> {
        if let Some(cookie) = req.cookie(&Self::cookie_name(role))
            && !cookie.value().is_empty()
        {
            return Some(cookie.value().to_string());
        }

        req.headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_same_role() {
        let token = SessionToken::issue(42, PrincipalKind::Faculty).unwrap();
        assert_eq!(
            SessionToken::verify_for(&token, PrincipalKind::Faculty).unwrap(),
            42
        );
    }

    #[test]
    fn test_role_mismatch_is_rejected() {
        let token = SessionToken::issue(42, PrincipalKind::Student).unwrap();
        assert!(SessionToken::verify_for(&token, PrincipalKind::Admin).is_err());
        assert!(SessionToken::verify_for(&token, PrincipalKind::Faculty).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = SessionToken::issue_with_expiry(
            1,
            PrincipalKind::Admin,
            chrono::Duration::minutes(-5),
        )
        .unwrap();
        assert!(SessionToken::verify_for(&token, PrincipalKind::Admin).is_err());
    }

    #[test]
    fn test_cookie_names_are_per_role() {
        assert_eq!(
            SessionToken::cookie_name(PrincipalKind::Admin),
            "portal_admin_session"
        );
        let expired = SessionToken::create_expired_cookie(PrincipalKind::Faculty);
        assert_eq!(expired.name(), "portal_faculty_session");
        assert_eq!(
            expired.max_age(),
            Some(actix_web::cookie::time::Duration::seconds(0))
        );
    }
}
