use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FacultyService, ensure_identifiers_free, parse_faculty_fields};
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::faculties::entities::Faculty;
use crate::models::faculties::requests::{CreateFacultyRequest, NewFaculty};
use crate::models::faculties::responses::FacultyResponse;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{check_new_password, require_fields};

/// 新增教师：必填校验 → 标识占用检查 → 哈希入库
pub async fn create_faculty(storage: &dyn Storage, req: CreateFacultyRequest) -> Result<Faculty> {
    require_fields(
        &[
            &req.username,
            &req.password,
            &req.faculty_code,
            &req.gender,
            &req.department,
        ],
        "All fields are required.",
    )?;

    let username = req.username.trim();
    let faculty_code = req.faculty_code.trim();
    let gender = parse_faculty_fields(faculty_code, &req.gender)?;
    check_new_password(&req.password)?;

    ensure_identifiers_free(storage, username, faculty_code, None).await?;

    storage
        .create_faculty(NewFaculty {
            username: username.to_string(),
            password_hash: hash_password(&req.password)?,
            faculty_code: faculty_code.to_string(),
            gender,
            department: req.department.trim().to_string(),
        })
        .await
}

pub async fn handle_create(
    service: &FacultyService,
    body: CreateFacultyRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match create_faculty(storage.as_ref(), body).await {
        Ok(faculty) => {
            tracing::info!("Faculty {} created", faculty.faculty_code);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                FacultyResponse { faculty },
                "Faculty added successfully.",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}
