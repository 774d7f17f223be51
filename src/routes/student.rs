use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{Authenticated, RateLimit, StudentRole};
use crate::models::PaginationQuery;
use crate::models::auth::PrincipalKind;
use crate::models::auth::requests::StudentLoginRequest;
use crate::models::students::requests::{ChangePasswordRequest, RegisterStudentRequest};
use crate::services::{AuthService, DashboardService, SubmissionService};
use crate::utils::SafeIDI64;

// 懒加载的全局 Service 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn register(
    req: HttpRequest,
    body: web::Json<RegisterStudentRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.student_register(&req, body.into_inner()).await
}

pub async fn login(
    req: HttpRequest,
    body: web::Json<StudentLoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.student_login(&req, body.into_inner()).await
}

pub async fn logout() -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(PrincipalKind::Student).await
}

pub async fn me(student: Authenticated<StudentRole>) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.student_me(student.principal).await
}

pub async fn change_password(
    req: HttpRequest,
    student: Authenticated<StudentRole>,
    body: web::Json<ChangePasswordRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .student_change_password(&req, student.principal, body.into_inner())
        .await
}

pub async fn dashboard(
    req: HttpRequest,
    student: Authenticated<StudentRole>,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE
        .student(student.principal, query.into_inner(), &req)
        .await
}

pub async fn list_submissions(
    req: HttpRequest,
    student: Authenticated<StudentRole>,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_own(&student.principal, query.into_inner(), &req)
        .await
}

pub async fn submit(
    req: HttpRequest,
    student: Authenticated<StudentRole>,
    problem_id: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .submit(&student.principal, problem_id.0, payload, &req)
        .await
}

pub async fn download_submission(
    req: HttpRequest,
    student: Authenticated<StudentRole>,
    submission_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .download(submission_id.0, Some(student.principal_id), &req)
        .await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student")
            .service(
                web::resource("/register")
                    .wrap(RateLimit::register())
                    .route(web::post().to(register)),
            )
            .service(
                web::resource("/login")
                    .wrap(RateLimit::login(PrincipalKind::STUDENT))
                    .route(web::post().to(login)),
            )
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me))
            .route("/password", web::put().to(change_password))
            .route("/dashboard", web::get().to(dashboard))
            .route("/submissions", web::get().to(list_submissions))
            .service(
                web::resource("/problems/{id}/submit")
                    .wrap(RateLimit::file_upload())
                    .route(web::post().to(submit)),
            )
            .route("/submissions/{id}/file", web::get().to(download_submission)),
    );
}
