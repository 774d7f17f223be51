/*!
 * 按角色划分的会话门禁
 *
 * 管理员、教师、学生三类会话互相独立，同一个客户端可以同时持有三者。
 * 每个处理函数通过在签名中声明 `Authenticated<R>` 显式经过对应角色的门禁：
 *
 * ```rust,ignore
 * async fn dashboard(req: HttpRequest, faculty: Authenticated<FacultyRole>) -> HttpResponse {
 *     // faculty.principal 为当前教师
 * }
 * ```
 *
 * ## 判定流程
 *
 * 1. 读取该角色的会话 cookie（`{prefix}_{role}_session`），缺失时读取 `Authorization: Bearer`
 * 2. 令牌签名、有效期、角色声明任一不符即视为未登录
 * 3. 令牌指向的主体已不存在同样视为未登录
 * 4. 管理员额外要求 `is_staff`，否则返回 403
 *
 * 拒绝时返回 401/403，`data.redirect` 指向该角色的登录入口，处理函数本身不会执行。
 */

use std::marker::PhantomData;
use std::sync::Arc;

use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use crate::errors::{PortalError, Result};
use crate::models::admins::entities::Admin;
use crate::models::auth::entities::{PrincipalKind, SessionState};
use crate::models::auth::responses::RedirectHint;
use crate::models::faculties::entities::Faculty;
use crate::models::students::entities::Student;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::SessionToken;

/// 会话角色
#[async_trait]
pub trait SessionRole: 'static {
    const KIND: PrincipalKind;
    type Principal: Clone + Serialize + TS + Send + Sync + 'static;

    /// 按主体 ID 加载
    async fn load(storage: &dyn Storage, id: i64) -> Result<Option<Self::Principal>>;

    /// 登录之外的准入条件
    fn admit(_principal: &Self::Principal) -> std::result::Result<(), GateDenial> {
        Ok(())
    }
}

pub struct AdminRole;
pub struct FacultyRole;
pub struct StudentRole;

#[async_trait]
impl SessionRole for AdminRole {
    const KIND: PrincipalKind = PrincipalKind::Admin;
    type Principal = Admin;

    async fn load(storage: &dyn Storage, id: i64) -> Result<Option<Admin>> {
        storage.get_admin_by_id(id).await
    }

    fn admit(principal: &Admin) -> std::result::Result<(), GateDenial> {
        if principal.is_staff {
            Ok(())
        } else {
            Err(GateDenial::Forbidden(Self::KIND))
        }
    }
}

#[async_trait]
impl SessionRole for FacultyRole {
    const KIND: PrincipalKind = PrincipalKind::Faculty;
    type Principal = Faculty;

    async fn load(storage: &dyn Storage, id: i64) -> Result<Option<Faculty>> {
        storage.get_faculty_by_id(id).await
    }
}

#[async_trait]
impl SessionRole for StudentRole {
    const KIND: PrincipalKind = PrincipalKind::Student;
    type Principal = Student;

    async fn load(storage: &dyn Storage, id: i64) -> Result<Option<Student>> {
        storage.get_student_by_id(id).await
    }
}

/// 门禁拒绝
#[derive(Debug)]
pub enum GateDenial {
    /// 该角色未登录
    Unauthenticated(PrincipalKind),
    /// 已登录但无权访问
    Forbidden(PrincipalKind),
    /// 校验过程中的基础设施错误
    Internal(PortalError),
}

impl std::fmt::Display for GateDenial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateDenial::Unauthenticated(_) => write!(f, "Please login first!"),
            GateDenial::Forbidden(_) => write!(f, "You are not authorized to access this page!"),
            GateDenial::Internal(err) => write!(f, "{err}"),
        }
    }
}

impl ResponseError for GateDenial {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            GateDenial::Unauthenticated(_) => actix_web::http::StatusCode::UNAUTHORIZED,
            GateDenial::Forbidden(_) => actix_web::http::StatusCode::FORBIDDEN,
            GateDenial::Internal(err) => err.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (kind, code) = match self {
            GateDenial::Unauthenticated(kind) => (*kind, ErrorCode::Unauthorized),
            GateDenial::Forbidden(kind) => (*kind, ErrorCode::Forbidden),
            GateDenial::Internal(err) => return err.to_response(),
        };
        let hint = RedirectHint {
            role: kind,
            redirect: kind.login_path().to_string(),
        };
        HttpResponse::build(self.status_code()).json(ApiResponse::error(
            code,
            hint,
            self.to_string(),
        ))
    }
}

/// 某角色的门禁
pub struct AuthorizationGate<R>(PhantomData<R>);

impl<R: SessionRole> AuthorizationGate<R> {
    /// 解析请求中该角色的会话状态（只看令牌，不访问存储）
    pub fn session_state(req: &HttpRequest) -> SessionState {
        match SessionToken::extract_from_request(req, R::KIND) {
            Some(token) => match SessionToken::verify_for(&token, R::KIND) {
                Ok(id) => SessionState::Authenticated(id),
                Err(e) => {
                    debug!("Discarding {} session token: {}", R::KIND, e);
                    SessionState::Anonymous
                }
            },
            None => SessionState::Anonymous,
        }
    }

    /// 完整校验：会话有效、主体存在且满足准入条件
    pub async fn check(req: &HttpRequest) -> std::result::Result<Authenticated<R>, GateDenial> {
        let Some(principal_id) = Self::session_state(req).principal_id() else {
            info!("{} gate denied {}: no valid session", R::KIND, req.path());
            return Err(GateDenial::Unauthenticated(R::KIND));
        };

        let storage = req
            .app_data::<web::Data<Arc<dyn Storage>>>()
            .map(|data| data.get_ref().clone())
            .ok_or_else(|| {
                GateDenial::Internal(PortalError::database_config("Storage not found in app data"))
            })?;

        let principal = R::load(storage.as_ref(), principal_id)
            .await
            .map_err(GateDenial::Internal)?
            .ok_or_else(|| {
                info!(
                    "{} gate denied {}: principal {} no longer exists",
                    R::KIND,
                    req.path(),
                    principal_id
                );
                GateDenial::Unauthenticated(R::KIND)
            })?;

        if let Err(denial) = R::admit(&principal) {
            info!(
                "{} gate denied {}: principal {} not admitted",
                R::KIND,
                req.path(),
                principal_id
            );
            return Err(denial);
        }

        debug!("{} gate passed for principal {}", R::KIND, principal_id);
        Ok(Authenticated {
            principal_id,
            principal,
            _role: PhantomData,
        })
    }
}

/// 通过门禁的请求上下文
pub struct Authenticated<R: SessionRole> {
    pub principal_id: i64,
    pub principal: R::Principal,
    _role: PhantomData<R>,
}

impl<R: SessionRole> FromRequest for Authenticated<R> {
    type Error = GateDenial;
    type Future = LocalBoxFuture<'static, std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { AuthorizationGate::<R>::check(&req).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::admins::requests::CreateAdminRequest;
    use crate::test_support;
    use actix_web::{App, http::StatusCode, test};

    async fn admin_only(admin: Authenticated<AdminRole>) -> HttpResponse {
        HttpResponse::Ok().body(admin.principal.username)
    }

    async fn student_only(student: Authenticated<StudentRole>) -> HttpResponse {
        HttpResponse::Ok().body(student.principal.student_code)
    }

    #[actix_web::test]
    async fn test_gate_rejects_anonymous_with_redirect_hint() {
        let storage = test_support::storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .route("/admin", web::get().to(admin_only)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/admin").to_request())
            .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["redirect"], "/api/v1/admin/login");
        assert_eq!(body["code"], ErrorCode::Unauthorized as i32);
    }

    #[actix_web::test]
    async fn test_non_staff_admin_is_forbidden() {
        let storage = test_support::storage().await;
        let admin = storage
            .create_admin(CreateAdminRequest {
                username: "helper".to_string(),
                password: crate::utils::password::hash_password("pw").unwrap(),
                full_name: None,
                is_staff: false,
            })
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .route("/admin", web::get().to(admin_only)),
        )
        .await;

        let token = SessionToken::issue(admin.id, PrincipalKind::Admin).unwrap();
        let req = test::TestRequest::get()
            .uri("/admin")
            .cookie(SessionToken::create_cookie(PrincipalKind::Admin, &token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_token_for_other_role_is_not_accepted() {
        let storage = test_support::storage().await;
        let student = test_support::seed_student(storage.as_ref(), "S-100").await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .route("/admin", web::get().to(admin_only))
                .route("/student", web::get().to(student_only)),
        )
        .await;

        let token = SessionToken::issue(student.id, PrincipalKind::Student).unwrap();

        // 学生令牌放进管理员 cookie 也无效
        let forged = actix_web::cookie::Cookie::new(
            SessionToken::cookie_name(PrincipalKind::Admin),
            token.clone(),
        );
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/admin")
                .cookie(forged)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/student")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "S-100");
    }

    #[actix_web::test]
    async fn test_session_for_deleted_principal_is_anonymous() {
        let storage = test_support::storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .route("/student", web::get().to(student_only)),
        )
        .await;

        let token = SessionToken::issue(9999, PrincipalKind::Student).unwrap();
        let req = test::TestRequest::get()
            .uri("/student")
            .cookie(SessionToken::create_cookie(PrincipalKind::Student, &token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
