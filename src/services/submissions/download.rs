use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use super::SubmissionService;
use crate::blob::BlobStore;
use crate::errors::{PortalError, Result};
use crate::storage::Storage;

/// 读取提交文件，返回 (原始文件名, 内容)
///
/// `owner` 为 Some 时仅允许访问该学生自己的提交，否则一律视为不存在。
pub async fn fetch_submission_file(
    storage: &dyn Storage,
    blobs: &dyn BlobStore,
    submission_id: i64,
    owner: Option<i64>,
) -> Result<(String, Vec<u8>)> {
    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .filter(|s| owner.is_none_or(|student_id| s.student_id == student_id))
        .ok_or_else(|| PortalError::not_found("Submission not found."))?;

    let bytes = blobs.retrieve(&submission.file_ref).await?;
    Ok((submission.file_name, bytes))
}

pub async fn handle_download(
    service: &SubmissionService,
    submission_id: i64,
    owner: Option<i64>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let blobs = service.get_blob_store(request);

    match fetch_submission_file(storage.as_ref(), blobs.as_ref(), submission_id, owner).await {
        // 使用提交时的原始文件名
        Ok((file_name, bytes)) => Ok(HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, "application/octet-stream"))
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name.replace('"', "")),
            ))
            .body(bytes)),
        Err(e) => Ok(e.to_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::submissions::submit::{UploadedFile, submit_solution};
    use crate::test_support;

    #[tokio::test]
    async fn test_student_only_downloads_own_file() {
        let storage = test_support::storage().await;
        let blobs = test_support::blobs();
        let owner = test_support::seed_student(storage.as_ref(), "S-1").await;
        let other = test_support::seed_student(storage.as_ref(), "S-2").await;
        let problem = test_support::seed_problem(storage.as_ref(), "Echo", 10).await;

        let submission = submit_solution(
            storage.as_ref(),
            blobs.as_ref(),
            owner.id,
            problem.id,
            Some(UploadedFile {
                file_name: "echo.c".to_string(),
                bytes: b"int main(){}".to_vec(),
            }),
        )
        .await
        .unwrap();

        let (name, bytes) =
            fetch_submission_file(storage.as_ref(), blobs.as_ref(), submission.id, Some(owner.id))
                .await
                .unwrap();
        assert_eq!(name, "echo.c");
        assert_eq!(bytes, b"int main(){}");

        let err =
            fetch_submission_file(storage.as_ref(), blobs.as_ref(), submission.id, Some(other.id))
                .await
                .unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));

        // 教师与管理员不受限制
        assert!(
            fetch_submission_file(storage.as_ref(), blobs.as_ref(), submission.id, None)
                .await
                .is_ok()
        );
    }
}
