use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::{PortalError, Result};
use crate::models::ApiResponse;
use crate::models::submissions::responses::{SubmissionListItem, SubmissionResponse};
use crate::storage::Storage;

pub async fn submission_detail(storage: &dyn Storage, submission_id: i64) -> Result<SubmissionListItem> {
    storage
        .get_submission_item(submission_id)
        .await?
        .ok_or_else(|| PortalError::not_found("Submission not found."))
}

pub async fn handle_detail(
    service: &SubmissionService,
    submission_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match submission_detail(storage.as_ref(), submission_id).await {
        Ok(submission) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmissionResponse { submission },
            "Submission retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
