use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Serialize;
use ts_rs::TS;

use crate::errors::{PortalError, Result};
use crate::models::ApiResponse;
use crate::models::auth::PrincipalKind;
use crate::models::auth::responses::PrincipalResponse;
use crate::models::students::entities::Student;
use crate::models::students::requests::ChangePasswordRequest;
use crate::storage::Storage;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::{check_new_password, require_fields};

use super::AuthService;

pub fn handle_me<T: TS + Serialize>(role: PrincipalKind, principal: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        PrincipalResponse { role, principal },
        "Session is active",
    ))
}

/// 学生修改自己的密码：先校验当前密码，再重新哈希
pub async fn change_student_password(
    storage: &dyn Storage,
    student: &Student,
    req: ChangePasswordRequest,
) -> Result<()> {
    require_fields(
        &[&req.current_password, &req.new_password],
        "All fields are required.",
    )?;

    if !verify_password(&req.current_password, &student.password_hash) {
        return Err(PortalError::bad_credential("Incorrect password."));
    }

    check_new_password(&req.new_password)?;
    let digest = hash_password(&req.new_password)?;

    if !storage.update_student_password(student.id, digest).await? {
        return Err(PortalError::not_found("Student not found."));
    }
    Ok(())
}

pub async fn handle_change_password(
    service: &AuthService,
    request: &HttpRequest,
    student: Student,
    body: ChangePasswordRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match change_student_password(storage.as_ref(), &student, body).await {
        Ok(()) => {
            tracing::info!("Student {} changed password", student.student_code);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Password changed successfully.",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::login::verify_student;
    use crate::test_support::{self, PASSWORD};

    #[tokio::test]
    async fn test_change_password_verifies_current_first() {
        let storage = test_support::storage().await;
        let student = test_support::seed_student(storage.as_ref(), "S-7").await;

        let err = change_student_password(
            storage.as_ref(),
            &student,
            ChangePasswordRequest {
                current_password: "not-it".to_string(),
                new_password: "Another1".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PortalError::BadCredential(_)));
        assert!(verify_student(storage.as_ref(), "S-7", PASSWORD).await.is_ok());

        change_student_password(
            storage.as_ref(),
            &student,
            ChangePasswordRequest {
                current_password: PASSWORD.to_string(),
                new_password: "Another1".to_string(),
            },
        )
        .await
        .unwrap();
        assert!(verify_student(storage.as_ref(), "S-7", "Another1").await.is_ok());
        assert!(verify_student(storage.as_ref(), "S-7", PASSWORD).await.is_err());
    }
}
