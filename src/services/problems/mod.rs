pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::blob::BlobStore;
use crate::models::admins::entities::Admin;
use crate::models::problems::requests::{CreateProblemRequest, ProblemListParams};
use crate::storage::Storage;

pub struct ProblemService {
    storage: Option<Arc<dyn Storage>>,
    blobs: Option<Arc<dyn BlobStore>>,
}

impl ProblemService {
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

    // 获取题目列表
    pub async fn list_problems(
        &self,
        query: ProblemListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list(self, query, request).await
    }

    // 发布题目
    pub async fn create_problem(
        &self,
        admin: &Admin,
        body: CreateProblemRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create(self, admin, body, request).await
    }

    // 删除题目
    pub async fn delete_problem(
        &self,
        problem_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::handle_delete(self, problem_id, request).await
    }
}
