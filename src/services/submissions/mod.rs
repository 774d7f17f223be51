pub mod detail;
pub mod download;
pub mod evaluate;
pub mod list;
pub mod submit;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::blob::BlobStore;
use crate::models::PaginationQuery;
use crate::models::faculties::entities::Faculty;
use crate::models::students::entities::Student;
use crate::models::submissions::requests::EvaluateSubmissionRequest;
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
    blobs: Option<Arc<dyn BlobStore>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            blobs: None,
        }
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

    pub(crate) fn get_blob_store(&self, request: &HttpRequest) -> Arc<dyn BlobStore> {
        if let Some(blobs) = &self.blobs {
            blobs.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn BlobStore>>>()
                .expect("Blob store not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 学生提交答案
    pub async fn submit(
        &self,
        student: &Student,
        problem_id: i64,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::handle_submit(self, student, problem_id, payload, request).await
    }

    // 学生查看自己的提交
    pub async fn list_own(
        &self,
        student: &Student,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_own(self, student, query, request).await
    }

    // 提交详情（评阅页）
    pub async fn detail(&self, submission_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        detail::handle_detail(self, submission_id, request).await
    }

    // 下载提交文件；owner 为 Some 时只允许下载该学生自己的提交
    pub async fn download(
        &self,
        submission_id: i64,
        owner: Option<i64>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, submission_id, owner, request).await
    }

    // 教师评阅
    pub async fn evaluate(
        &self,
        faculty: &Faculty,
        submission_id: i64,
        body: EvaluateSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        evaluate::handle_evaluate(self, faculty, submission_id, body, request).await
    }
}
