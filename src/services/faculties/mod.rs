pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use crate::models::auth::entities::Gender;
use crate::models::faculties::requests::{
    CreateFacultyRequest, FacultyListParams, UpdateFacultyRequest,
};
use crate::storage::Storage;
use crate::utils::validate::validate_faculty_code;

pub struct FacultyService {
    storage: Option<Arc<dyn Storage>>,
}

impl FacultyService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 获取教师列表
    pub async fn list_faculties(
        &self,
        query: FacultyListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list(self, query, request).await
    }

    // 新增教师
    pub async fn create_faculty(
        &self,
        body: CreateFacultyRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create(self, body, request).await
    }

    // 编辑教师
    pub async fn update_faculty(
        &self,
        faculty_id: i64,
        body: UpdateFacultyRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update(self, faculty_id, body, request).await
    }

    // 删除教师
    pub async fn delete_faculty(
        &self,
        faculty_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::handle_delete(self, faculty_id, request).await
    }
}

/// 教师编号与用户名的占用检查（编辑时排除自身）
pub(crate) async fn ensure_identifiers_free(
    storage: &dyn Storage,
    username: &str,
    faculty_code: &str,
    exclude_id: Option<i64>,
) -> Result<()> {
    if AppConfig::get().identity.faculty_unique_username
        && storage.faculty_username_exists(username, exclude_id).await?
    {
        return Err(PortalError::duplicate_identifier("Username already exists."));
    }
    if storage.faculty_code_exists(faculty_code, exclude_id).await? {
        return Err(PortalError::duplicate_identifier("Faculty ID already exists."));
    }
    Ok(())
}

pub(crate) fn parse_faculty_fields(faculty_code: &str, gender: &str) -> Result<Gender> {
    validate_faculty_code(faculty_code).map_err(PortalError::validation)?;
    gender
        .parse::<Gender>()
        .map_err(|_| PortalError::validation("Invalid gender. Supported: male, female, other"))
}
