/*!
 * 登录 / 注册 / 提交上传的限流
 *
 * 按 `{端点}:ip:{客户端地址}` 计数，固定窗口 60 秒，超出后返回 429 并携带 `Retry-After`。
 * 三个角色的登录入口各自计数，互不影响。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

const WINDOW_SECS: u64 = 60;

// 键: `{端点}:ip:{地址}`，值: 窗口内已放行的请求数
static ATTEMPTS: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(WINDOW_SECS))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    endpoint: String,
}

impl RateLimit {
    pub fn new(endpoint: impl Into<String>, max_requests: u32) -> Self {
        Self {
            max_requests,
            window_secs: WINDOW_SECS,
            endpoint: endpoint.into(),
        }
    }

    /// 某角色的登录入口：5 次/分钟
    pub fn login(role: &str) -> Self {
        Self::new(format!("login:{role}"), 5)
    }

    /// 学生注册：3 次/分钟
    pub fn register() -> Self {
        Self::new("register", 3)
    }

    /// 解答上传：10 次/分钟
    pub fn file_upload() -> Self {
        Self::new("upload", 10)
    }
}

/// 客户端地址：优先取连接地址，其次 X-Forwarded-For 的第一个地址，再次 X-Real-IP
fn client_addr(req: &ServiceRequest) -> String {
    let connection = req
        .connection_info()
        .realip_remote_addr()
        .map(str::to_string);

    if let Some(ip) = connection.as_deref().filter(|ip| is_ip(ip)) {
        return ip.to_string();
    }

    let forwarded = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim);
    let real_ip = req
        .headers()
        .get("X-Real-IP")
        .and_then(|v| v.to_str().ok())
        .map(str::trim);

    forwarded
        .into_iter()
        .chain(real_ip)
        .find(|ip| is_ip(ip))
        .map(str::to_string)
        .or(connection)
        .unwrap_or_else(|| "unknown".to_string())
}

fn is_ip(raw: &str) -> bool {
    raw.parse::<IpAddr>().is_ok()
}

/// 记一次请求；已达上限时返回 false 且不再累加
async fn admit(key: &str, max_requests: u32) -> bool {
    let seen = ATTEMPTS.get(key).await.unwrap_or(0);
    if seen >= max_requests {
        warn!("Rate limit exceeded for {key} ({seen}/{max_requests})");
        return false;
    }
    ATTEMPTS.insert(key.to_string(), seen + 1).await;
    true
}

fn too_many_requests(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many attempts, please try again later.",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let key = format!("{}:ip:{}", limit.endpoint, client_addr(&req));
            if !admit(&key, limit.max_requests).await {
                return Ok(req.into_response(
                    too_many_requests(limit.window_secs).map_into_right_body(),
                ));
            }
            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, web};

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login("faculty");
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window_secs, WINDOW_SECS);
        assert_eq!(login.endpoint, "login:faculty");

        assert_eq!(RateLimit::register().max_requests, 3);
        assert_eq!(RateLimit::file_upload().endpoint, "upload");
    }

    #[tokio::test]
    async fn test_admit_counts_per_key() {
        assert!(admit("admit-test:a", 1).await);
        assert!(!admit("admit-test:a", 1).await);
        assert!(admit("admit-test:b", 1).await);
    }

    #[actix_web::test]
    async fn test_requests_over_limit_get_429() {
        let app = actix_web::test::init_service(
            App::new().service(
                web::resource("/limited")
                    .wrap(RateLimit::new("rate-limit-test", 2))
                    .route(web::get().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;

        let peer: std::net::SocketAddr = "10.255.0.1:4000".parse().unwrap();
        for expected in [StatusCode::OK, StatusCode::OK, StatusCode::TOO_MANY_REQUESTS] {
            let req = actix_web::test::TestRequest::get()
                .uri("/limited")
                .peer_addr(peer)
                .to_request();
            let resp = actix_web::test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected);
        }
    }
}
