use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::errors::{PortalError, Result};
use crate::models::ApiResponse;
use crate::models::students::entities::Student;
use crate::models::students::requests::ResetStudentPasswordRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{check_new_password, require_fields};

/// 管理员重置学生密码（两次输入必须一致）
pub async fn reset_student_password(
    storage: &dyn Storage,
    student_id: i64,
    req: ResetStudentPasswordRequest,
) -> Result<Student> {
    let student = storage
        .get_student_by_id(student_id)
        .await?
        .ok_or_else(|| PortalError::not_found("Student not found."))?;

    require_fields(
        &[&req.new_password, &req.confirm_password],
        "All fields are required.",
    )?;
    if req.new_password != req.confirm_password {
        return Err(PortalError::validation("Passwords do not match!"));
    }
    check_new_password(&req.new_password)?;

    let digest = hash_password(&req.new_password)?;
    if !storage.update_student_password(student.id, digest).await? {
        return Err(PortalError::not_found("Student not found."));
    }
    Ok(student)
}

pub async fn handle_reset_password(
    service: &StudentService,
    student_id: i64,
    body: ResetStudentPasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match reset_student_password(storage.as_ref(), student_id, body).await {
        Ok(student) => {
            tracing::info!("Password reset for student {}", student.student_code);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(format!(
                "Password updated for {}",
                student.full_name
            ))))
        }
        Err(e) => Ok(e.to_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::login::verify_student;
    use crate::test_support::{self, PASSWORD};

    fn request(new: &str, confirm: &str) -> ResetStudentPasswordRequest {
        ResetStudentPasswordRequest {
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[tokio::test]
    async fn test_reset_requires_matching_confirmation() {
        let storage = test_support::storage().await;
        let student = test_support::seed_student(storage.as_ref(), "S-1").await;

        let err = reset_student_password(storage.as_ref(), student.id, request("abc", "abd"))
            .await
            .unwrap_err();
        assert_eq!(err, PortalError::validation("Passwords do not match!"));
        assert!(verify_student(storage.as_ref(), "S-1", PASSWORD).await.is_ok());

        let updated = reset_student_password(storage.as_ref(), student.id, request("abc", "abc"))
            .await
            .unwrap();
        assert_eq!(updated.id, student.id);
        assert!(verify_student(storage.as_ref(), "S-1", "abc").await.is_ok());
    }

    #[tokio::test]
    async fn test_reset_unknown_student() {
        let storage = test_support::storage().await;
        let err = reset_student_password(storage.as_ref(), 42, request("abc", "abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));
    }
}
