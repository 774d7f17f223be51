//! 三个角色的首页数据

pub mod admin;
pub mod faculty;
pub mod student;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::PaginationQuery;
use crate::models::faculties::entities::Faculty;
use crate::models::students::entities::Student;
use crate::models::submissions::requests::SubmissionListParams;
use crate::storage::Storage;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
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

    pub async fn admin(
        &self,
        query: SubmissionListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        admin::handle_admin_dashboard(self, query, request).await
    }

    pub async fn faculty(
        &self,
        faculty: &Faculty,
        query: SubmissionListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        faculty::handle_faculty_dashboard(self, faculty, query, request).await
    }

    pub async fn student(
        &self,
        student: Student,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student::handle_student_dashboard(self, student, query, request).await
    }
}
