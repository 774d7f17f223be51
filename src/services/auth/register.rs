use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::{PortalError, Result};
use crate::models::auth::entities::Gender;
use crate::models::students::entities::Student;
use crate::models::students::requests::{NewStudent, RegisterStudentRequest};
use crate::models::students::responses::StudentResponse;
use crate::models::{ApiResponse, FormNumber};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{check_new_password, require_fields, validate_student_code};

use super::AuthService;

/// 解析正整数表单字段
fn positive_field(value: &Option<FormNumber>, field: &str) -> Result<i32> {
    value
        .as_ref()
        .and_then(FormNumber::parse_i64)
        .filter(|v| *v > 0)
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| PortalError::validation(format!("{field} must be a positive integer.")))
}

/// 学生自助注册
pub async fn register_student(storage: &dyn Storage, req: RegisterStudentRequest) -> Result<Student> {
    let year_missing = req.year.as_ref().is_none_or(FormNumber::is_blank);
    let semester_missing = req.semester.as_ref().is_none_or(FormNumber::is_blank);
    require_fields(
        &[
            &req.full_name,
            &req.student_code,
            &req.password,
            &req.gender,
            &req.department,
        ],
        "All fields are required.",
    )?;
    if year_missing || semester_missing {
        return Err(PortalError::validation("All fields are required."));
    }

    let student_code = req.student_code.trim().to_string();
    validate_student_code(&student_code).map_err(PortalError::validation)?;

    let gender = req
        .gender
        .parse::<Gender>()
        .map_err(|_| PortalError::validation("Invalid gender. Supported: male, female, other"))?;
    let year = positive_field(&req.year, "Year")?;
    let semester = positive_field(&req.semester, "Semester")?;
    check_new_password(&req.password)?;

    // 唯一索引兜底并发注册，这里先给出明确提示
    if storage.get_student_by_code(&student_code).await?.is_some() {
        return Err(PortalError::duplicate_identifier(
            "Student ID already registered.",
        ));
    }

    storage
        .create_student(NewStudent {
            full_name: req.full_name.trim().to_string(),
            student_code,
            password_hash: hash_password(&req.password)?,
            gender,
            year,
            semester,
            department: req.department.trim().to_string(),
        })
        .await
}

pub async fn handle_register(
    service: &AuthService,
    request: &HttpRequest,
    body: RegisterStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match register_student(storage.as_ref(), body).await {
        Ok(student) => {
            tracing::info!("Student {} registered", student.student_code);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                StudentResponse { student },
                "Registration successful! Please login.",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn request(code: &str, name: &str) -> RegisterStudentRequest {
        RegisterStudentRequest {
            full_name: name.to_string(),
            student_code: code.to_string(),
            password: "secret".to_string(),
            gender: "Female".to_string(),
            year: Some(FormNumber::from("2")),
            semester: Some(FormNumber::from(4)),
            department: "Mathematics".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_and_duplicate_code() {
        let storage = test_support::storage().await;

        let first = register_student(storage.as_ref(), request("MA-11", "Ada"))
            .await
            .unwrap();
        assert_eq!(first.year, 2);
        assert_eq!(first.semester, 4);
        assert_eq!(first.gender, Gender::Female);

        let err = register_student(storage.as_ref(), request("MA-11", "Grace"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PortalError::duplicate_identifier("Student ID already registered.")
        );

        let kept = storage.get_student_by_code("MA-11").await.unwrap().unwrap();
        assert_eq!(kept.id, first.id);
        assert_eq!(kept.full_name, "Ada");
    }

    #[tokio::test]
    async fn test_register_accepts_free_form_code() {
        let storage = test_support::storage().await;

        let student = register_student(storage.as_ref(), request("  2024 CSE #17 ", "Lin"))
            .await
            .unwrap();
        assert_eq!(student.student_code, "2024 CSE #17");
        assert!(
            storage
                .get_student_by_code("2024 CSE #17")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_register_rejects_missing_or_bad_numbers() {
        let storage = test_support::storage().await;

        let mut missing = request("MA-12", "Ada");
        missing.department = " ".to_string();
        let err = register_student(storage.as_ref(), missing).await.unwrap_err();
        assert_eq!(err.message(), "All fields are required.");

        let mut no_year = request("MA-12", "Ada");
        no_year.year = None;
        assert!(register_student(storage.as_ref(), no_year).await.is_err());

        let mut bad_semester = request("MA-12", "Ada");
        bad_semester.semester = Some(FormNumber::from("-1"));
        let err = register_student(storage.as_ref(), bad_semester)
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Semester must be a positive integer.");

        assert_eq!(storage.count_students().await.unwrap(), 0);
    }
}
