use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{AdminRole, Authenticated, RateLimit};
use crate::models::auth::PrincipalKind;
use crate::models::auth::requests::AdminLoginRequest;
use crate::models::faculties::requests::{
    CreateFacultyRequest, FacultyListParams, UpdateFacultyRequest,
};
use crate::models::problems::requests::{CreateProblemRequest, ProblemListParams};
use crate::models::students::requests::{ResetStudentPasswordRequest, StudentListParams};
use crate::models::submissions::requests::SubmissionListParams;
use crate::services::{
    AuthService, DashboardService, FacultyService, ProblemService, StudentService,
    SubmissionService,
};
use crate::utils::SafeIDI64;

// 懒加载的全局 Service 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);
static FACULTY_SERVICE: Lazy<FacultyService> = Lazy::new(FacultyService::new_lazy);
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);
static PROBLEM_SERVICE: Lazy<ProblemService> = Lazy::new(ProblemService::new_lazy);
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn login(
    req: HttpRequest,
    body: web::Json<AdminLoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.admin_login(&req, body.into_inner()).await
}

pub async fn logout() -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(PrincipalKind::Admin).await
}

pub async fn me(admin: Authenticated<AdminRole>) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.admin_me(admin.principal).await
}

pub async fn dashboard(
    req: HttpRequest,
    _admin: Authenticated<AdminRole>,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.admin(query.into_inner(), &req).await
}

pub async fn list_faculties(
    req: HttpRequest,
    _admin: Authenticated<AdminRole>,
    query: web::Query<FacultyListParams>,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.list_faculties(query.into_inner(), &req).await
}

pub async fn create_faculty(
    req: HttpRequest,
    _admin: Authenticated<AdminRole>,
    body: web::Json<CreateFacultyRequest>,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.create_faculty(body.into_inner(), &req).await
}

pub async fn update_faculty(
    req: HttpRequest,
    _admin: Authenticated<AdminRole>,
    faculty_id: SafeIDI64,
    body: web::Json<UpdateFacultyRequest>,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE
        .update_faculty(faculty_id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_faculty(
    req: HttpRequest,
    _admin: Authenticated<AdminRole>,
    faculty_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.delete_faculty(faculty_id.0, &req).await
}

pub async fn list_students(
    req: HttpRequest,
    _admin: Authenticated<AdminRole>,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(query.into_inner(), &req).await
}

pub async fn reset_student_password(
    req: HttpRequest,
    _admin: Authenticated<AdminRole>,
    student_id: SafeIDI64,
    body: web::Json<ResetStudentPasswordRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .reset_password(student_id.0, body.into_inner(), &req)
        .await
}

pub async fn list_problems(
    req: HttpRequest,
    _admin: Authenticated<AdminRole>,
    query: web::Query<ProblemListParams>,
) -> ActixResult<HttpResponse> {
    PROBLEM_SERVICE.list_problems(query.into_inner(), &req).await
}

pub async fn create_problem(
    req: HttpRequest,
    admin: Authenticated<AdminRole>,
    body: web::Json<CreateProblemRequest>,
) -> ActixResult<HttpResponse> {
    PROBLEM_SERVICE
        .create_problem(&admin.principal, body.into_inner(), &req)
        .await
}

pub async fn delete_problem(
    req: HttpRequest,
    _admin: Authenticated<AdminRole>,
    problem_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    PROBLEM_SERVICE.delete_problem(problem_id.0, &req).await
}

pub async fn download_submission(
    req: HttpRequest,
    _admin: Authenticated<AdminRole>,
    submission_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .download(submission_id.0, None, &req)
        .await
}

// 配置路由
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin")
            .service(
                web::resource("/login")
                    .wrap(RateLimit::login(PrincipalKind::ADMIN))
                    .route(web::post().to(login)),
            )
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me))
            .route("/dashboard", web::get().to(dashboard))
            .route("/faculties", web::get().to(list_faculties))
            .route("/faculties", web::post().to(create_faculty))
            .route("/faculties/{id}", web::put().to(update_faculty))
            .route("/faculties/{id}", web::delete().to(delete_faculty))
            .route("/students", web::get().to(list_students))
            .route("/students/{id}/password", web::put().to(reset_student_password))
            .route("/problems", web::get().to(list_problems))
            .route("/problems", web::post().to(create_problem))
            .route("/problems/{id}", web::delete().to(delete_problem))
            .route("/submissions/{id}/file", web::get().to(download_submission)),
    );
}
