use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{Authenticated, FacultyRole, RateLimit};
use crate::models::auth::PrincipalKind;
use crate::models::auth::requests::FacultyLoginRequest;
use crate::models::submissions::requests::{EvaluateSubmissionRequest, SubmissionListParams};
use crate::services::{AuthService, DashboardService, SubmissionService};
use crate::utils::SafeIDI64;

// 懒加载的全局 Service 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn login(
    req: HttpRequest,
    body: web::Json<FacultyLoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.faculty_login(&req, body.into_inner()).await
}

pub async fn logout() -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(PrincipalKind::Faculty).await
}

pub async fn me(faculty: Authenticated<FacultyRole>) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.faculty_me(faculty.principal).await
}

pub async fn dashboard(
    req: HttpRequest,
    faculty: Authenticated<FacultyRole>,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE
        .faculty(&faculty.principal, query.into_inner(), &req)
        .await
}

pub async fn submission_detail(
    req: HttpRequest,
    _faculty: Authenticated<FacultyRole>,
    submission_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.detail(submission_id.0, &req).await
}

pub async fn evaluate_submission(
    req: HttpRequest,
    faculty: Authenticated<FacultyRole>,
    submission_id: SafeIDI64,
    body: web::Json<EvaluateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .evaluate(&faculty.principal, submission_id.0, body.into_inner(), &req)
        .await
}

pub async fn download_submission(
    req: HttpRequest,
    _faculty: Authenticated<FacultyRole>,
    submission_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .download(submission_id.0, None, &req)
        .await
}

// 配置路由
pub fn configure_faculty_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/faculty")
            .service(
                web::resource("/login")
                    .wrap(RateLimit::login(PrincipalKind::FACULTY))
                    .route(web::post().to(login)),
            )
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me))
            .route("/dashboard", web::get().to(dashboard))
            .route("/submissions/{id}", web::get().to(submission_detail))
            .route(
                "/submissions/{id}/evaluate",
                web::post().to(evaluate_submission),
            )
            .route("/submissions/{id}/file", web::get().to(download_submission)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::requests::NewSubmission;
    use crate::test_support;
    use crate::utils::SessionToken;
    use actix_web::{App, http::StatusCode, test};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_fractional_marks_echo_the_form() {
        let storage = test_support::storage().await;
        let blobs: Arc<dyn crate::blob::BlobStore> = test_support::blobs();
        let faculty = test_support::seed_faculty(storage.as_ref(), "F-9", "drjones").await;
        let student = test_support::seed_student(storage.as_ref(), "S-9").await;
        let problem = test_support::seed_problem(storage.as_ref(), "Graphs", 10).await;
        let submission = storage
            .create_submission(NewSubmission {
                problem_id: problem.id,
                student_id: student.id,
                file_ref: "blob".to_string(),
                file_name: "graph.py".to_string(),
            })
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .app_data(web::Data::new(blobs))
                .configure(configure_faculty_routes),
        )
        .await;
        let token = SessionToken::issue(faculty.id, PrincipalKind::Faculty).unwrap();
        let cookie = SessionToken::create_cookie(PrincipalKind::Faculty, &token);

        for (marks, echoed) in [
            (serde_json::json!(7.5), "7.5"),
            (serde_json::json!(true), "true"),
        ] {
            let resp = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri(&format!("/api/v1/faculty/submissions/{}/evaluate", submission.id))
                    .cookie(cookie.clone())
                    .set_json(serde_json::json!({"marks": marks, "remarks": "close"}))
                    .to_request(),
            )
            .await;
            assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], "Please enter a valid number for marks.");
            assert_eq!(body["data"]["form"]["marks"], echoed);
            assert_eq!(body["data"]["form"]["remarks"], "close");
            assert_eq!(body["data"]["submission"]["id"], submission.id);
        }

        let kept = storage
            .get_submission_by_id(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.faculty_marks, None);
    }
}
