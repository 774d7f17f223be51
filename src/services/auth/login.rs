use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Serialize;
use ts_rs::TS;

use crate::errors::{PortalError, Result};
use crate::models::admins::entities::Admin;
use crate::models::auth::PrincipalKind;
use crate::models::auth::requests::{AdminLoginRequest, FacultyLoginRequest, StudentLoginRequest};
use crate::models::auth::responses::LoginResponse;
use crate::models::faculties::entities::Faculty;
use crate::models::students::entities::Student;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::SessionToken;
use crate::utils::password::verify_password;

use super::AuthService;

const ADMIN_LOGIN_FAILED: &str = "Invalid credentials or not an admin user";

/// 校验管理员凭据：用户名不存在、密码错误、非 staff 统一返回同一条提示
pub async fn verify_admin(storage: &dyn Storage, username: &str, password: &str) -> Result<Admin> {
    let admin = storage
        .get_admin_by_username(username.trim())
        .await?
        .ok_or_else(|| PortalError::bad_credential(ADMIN_LOGIN_FAILED))?;

    if !verify_password(password, &admin.password_hash) || !admin.is_staff {
        return Err(PortalError::bad_credential(ADMIN_LOGIN_FAILED));
    }

    if let Err(e) = storage.update_admin_last_login(admin.id).await {
        tracing::warn!("Failed to record last login for admin {}: {}", admin.id, e);
    }

    Ok(admin)
}

/// 校验教师凭据（使用教师编号）
pub async fn verify_faculty(
    storage: &dyn Storage,
    faculty_code: &str,
    password: &str,
) -> Result<Faculty> {
    let faculty_code = faculty_code.trim();
    if faculty_code.is_empty() || password.is_empty() {
        return Err(PortalError::validation(
            "Please enter Faculty ID and Password.",
        ));
    }

    let faculty = storage
        .get_faculty_by_code(faculty_code)
        .await?
        .ok_or_else(|| PortalError::not_found("Faculty ID does not exist."))?;

    if !verify_password(password, &faculty.password_hash) {
        return Err(PortalError::bad_credential("Incorrect password."));
    }

    Ok(faculty)
}

/// 校验学生凭据（使用学号）
pub async fn verify_student(
    storage: &dyn Storage,
    student_code: &str,
    password: &str,
) -> Result<Student> {
    let student_code = student_code.trim();
    if student_code.is_empty() || password.is_empty() {
        return Err(PortalError::validation(
            "Please enter Student ID and Password.",
        ));
    }

    let student = storage
        .get_student_by_code(student_code)
        .await?
        .ok_or_else(|| PortalError::not_found("Invalid Student ID."))?;

    if !verify_password(password, &student.password_hash) {
        return Err(PortalError::bad_credential("Incorrect password."));
    }

    Ok(student)
}

/// 签发会话并构造登录响应（令牌同时写入该角色的 cookie）
fn login_success<T: TS + Serialize>(
    role: PrincipalKind,
    principal_id: i64,
    principal: T,
    message: String,
) -> HttpResponse {
    let token = match SessionToken::issue(principal_id, role) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to issue {} session token: {}", role, e);
            return HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Login failed, unable to generate token",
            ));
        }
    };

    let response = LoginResponse {
        role,
        session_token: token.clone(),
        expires_in: SessionToken::expiry().num_seconds(),
        principal,
        created_at: chrono::Utc::now(),
    };

    HttpResponse::Ok()
        .cookie(SessionToken::create_cookie(role, &token))
        .json(ApiResponse::success(response, message))
}

pub async fn handle_admin_login(
    service: &AuthService,
    request: &HttpRequest,
    body: AdminLoginRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match verify_admin(storage.as_ref(), &body.username, &body.password).await {
        Ok(admin) => {
            tracing::info!("Admin {} logged in", admin.username);
            let message = format!("Welcome {}!", admin.display_name());
            Ok(login_success(PrincipalKind::Admin, admin.id, admin, message))
        }
        Err(e) => Ok(e.to_response()),
    }
}

pub async fn handle_faculty_login(
    service: &AuthService,
    request: &HttpRequest,
    body: FacultyLoginRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match verify_faculty(storage.as_ref(), &body.faculty_code, &body.password).await {
        Ok(faculty) => {
            tracing::info!("Faculty {} logged in", faculty.faculty_code);
            let message = format!("Welcome {}!", faculty.username);
            Ok(login_success(
                PrincipalKind::Faculty,
                faculty.id,
                faculty,
                message,
            ))
        }
        Err(e) => Ok(e.to_response()),
    }
}

pub async fn handle_student_login(
    service: &AuthService,
    request: &HttpRequest,
    body: StudentLoginRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match verify_student(storage.as_ref(), &body.student_code, &body.password).await {
        Ok(student) => {
            tracing::info!("Student {} logged in", student.student_code);
            let message = format!("Welcome {}!", student.full_name);
            Ok(login_success(
                PrincipalKind::Student,
                student.id,
                student,
                message,
            ))
        }
        Err(e) => Ok(e.to_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::admins::requests::CreateAdminRequest;
    use crate::test_support::{self, PASSWORD};
    use crate::utils::password::hash_password;

    #[tokio::test]
    async fn test_student_verify_right_and_wrong_password() {
        let storage = test_support::storage().await;
        let seeded = test_support::seed_student(storage.as_ref(), "CS-01").await;

        let student = verify_student(storage.as_ref(), "CS-01", PASSWORD)
            .await
            .unwrap();
        assert_eq!(student.id, seeded.id);

        let err = verify_student(storage.as_ref(), "CS-01", "wrong")
            .await
            .unwrap_err();
        assert_eq!(err, PortalError::bad_credential("Incorrect password."));

        let err = verify_student(storage.as_ref(), "CS-99", PASSWORD)
            .await
            .unwrap_err();
        assert_eq!(err, PortalError::not_found("Invalid Student ID."));
    }

    #[tokio::test]
    async fn test_faculty_verify_requires_both_fields() {
        let storage = test_support::storage().await;
        test_support::seed_faculty(storage.as_ref(), "F-1", "drsmith").await;

        let err = verify_faculty(storage.as_ref(), "  ", PASSWORD)
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Validation(_)));

        let err = verify_faculty(storage.as_ref(), "F-2", PASSWORD)
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Faculty ID does not exist.");

        let faculty = verify_faculty(storage.as_ref(), "F-1", PASSWORD)
            .await
            .unwrap();
        assert_eq!(faculty.username, "drsmith");
    }

    #[tokio::test]
    async fn test_admin_verify_requires_staff_flag() {
        let storage = test_support::storage().await;
        test_support::seed_admin(storage.as_ref(), "root").await;
        storage
            .create_admin(CreateAdminRequest {
                username: "intern".to_string(),
                password: hash_password(PASSWORD).unwrap(),
                full_name: None,
                is_staff: false,
            })
            .await
            .unwrap();

        let admin = verify_admin(storage.as_ref(), "root", PASSWORD)
            .await
            .unwrap();
        let refreshed = storage.get_admin_by_id(admin.id).await.unwrap().unwrap();
        assert!(refreshed.last_login.is_some());

        for (username, password) in [("intern", PASSWORD), ("root", "nope"), ("ghost", PASSWORD)] {
            let err = verify_admin(storage.as_ref(), username, password)
                .await
                .unwrap_err();
            assert_eq!(err.message(), ADMIN_LOGIN_FAILED);
        }
    }
}
