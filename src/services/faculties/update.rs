use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FacultyService, ensure_identifiers_free, parse_faculty_fields};
use crate::errors::{PortalError, Result};
use crate::models::ApiResponse;
use crate::models::faculties::entities::Faculty;
use crate::models::faculties::requests::{FacultyChanges, UpdateFacultyRequest};
use crate::models::faculties::responses::FacultyResponse;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{check_new_password, require_fields};

/// 编辑教师：密码留空时保留原摘要
pub async fn update_faculty(
    storage: &dyn Storage,
    faculty_id: i64,
    req: UpdateFacultyRequest,
) -> Result<Faculty> {
    if storage.get_faculty_by_id(faculty_id).await?.is_none() {
        return Err(PortalError::not_found("Faculty not found."));
    }

    require_fields(
        &[&req.username, &req.faculty_code, &req.gender, &req.department],
        "All fields are required.",
    )?;

    let username = req.username.trim();
    let faculty_code = req.faculty_code.trim();
    let gender = parse_faculty_fields(faculty_code, &req.gender)?;

    ensure_identifiers_free(storage, username, faculty_code, Some(faculty_id)).await?;

    let password_hash = match req.password.as_deref().filter(|p| !p.is_empty()) {
        Some(password) => {
            check_new_password(password)?;
            Some(hash_password(password)?)
        }
        None => None,
    };

    storage
        .update_faculty(
            faculty_id,
            FacultyChanges {
                username: username.to_string(),
                password_hash,
                faculty_code: faculty_code.to_string(),
                gender,
                department: req.department.trim().to_string(),
            },
        )
        .await?
        .ok_or_else(|| PortalError::not_found("Faculty not found."))
}

pub async fn handle_update(
    service: &FacultyService,
    faculty_id: i64,
    body: UpdateFacultyRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match update_faculty(storage.as_ref(), faculty_id, body).await {
        Ok(faculty) => {
            tracing::info!("Faculty {} updated", faculty.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                FacultyResponse { faculty },
                "Faculty updated successfully.",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::login::verify_faculty;
    use crate::test_support::{self, PASSWORD};

    fn changes(username: &str, code: &str, password: Option<&str>) -> UpdateFacultyRequest {
        UpdateFacultyRequest {
            username: username.to_string(),
            password: password.map(str::to_string),
            faculty_code: code.to_string(),
            gender: "other".to_string(),
            department: "Chemistry".to_string(),
        }
    }

    #[tokio::test]
    async fn test_update_keeps_password_when_blank() {
        let storage = test_support::storage().await;
        let faculty = test_support::seed_faculty(storage.as_ref(), "F-1", "drsmith").await;

        let updated = update_faculty(
            storage.as_ref(),
            faculty.id,
            changes("drsmith", "F-1", Some("")),
        )
        .await
        .unwrap();
        assert_eq!(updated.department, "Chemistry");
        assert!(verify_faculty(storage.as_ref(), "F-1", PASSWORD).await.is_ok());

        update_faculty(
            storage.as_ref(),
            faculty.id,
            changes("drsmith", "F-1b", Some("fresh")),
        )
        .await
        .unwrap();
        assert!(verify_faculty(storage.as_ref(), "F-1b", "fresh").await.is_ok());
    }

    #[tokio::test]
    async fn test_update_rejects_identifier_of_other_faculty() {
        let storage = test_support::storage().await;
        let first = test_support::seed_faculty(storage.as_ref(), "F-1", "first").await;
        test_support::seed_faculty(storage.as_ref(), "F-2", "second").await;

        let err = update_faculty(storage.as_ref(), first.id, changes("first", "F-2", None))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Faculty ID already exists.");

        let err = update_faculty(storage.as_ref(), 999, changes("x", "F-9", None))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));
    }
}
