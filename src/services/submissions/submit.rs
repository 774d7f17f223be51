use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;

use super::SubmissionService;
use crate::blob::BlobStore;
use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use crate::models::students::entities::Student;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::requests::NewSubmission;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 上传的答案文件
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// 提交答案
///
/// 预检查避免无谓写入文件，唯一索引作最终裁决；插入失败时删除已写入的文件。
pub async fn submit_solution(
    storage: &dyn Storage,
    blobs: &dyn BlobStore,
    student_id: i64,
    problem_id: i64,
    file: Option<UploadedFile>,
) -> Result<Submission> {
    if storage.get_problem_by_id(problem_id).await?.is_none() {
        return Err(PortalError::not_found("Problem not found."));
    }

    let file = file.ok_or_else(|| PortalError::no_file("Please select a file to upload."))?;

    if storage.submission_exists(student_id, problem_id).await? {
        return Err(PortalError::already_submitted(
            "You have already submitted a solution for this problem.",
        ));
    }

    let blob_ref = blobs.store(file.bytes, &file.file_name).await?;

    let created = storage
        .create_submission(NewSubmission {
            problem_id,
            student_id,
            file_ref: blob_ref.clone(),
            file_name: file.file_name,
        })
        .await;

    if created.is_err()
        && let Err(e) = blobs.remove(&blob_ref).await
    {
        tracing::warn!("Failed to remove orphan blob {}: {}", blob_ref, e);
    }
    created
}

/// 读取 multipart 中的 `file` 字段
///
/// 文件名为空视为未选择文件；内容可以为空。
async fn read_upload(
    payload: &mut Multipart,
    max_size: usize,
) -> std::result::Result<Option<UploadedFile>, HttpResponse> {
    let mut uploaded: Option<UploadedFile> = None;
    let mut seen_file_field = false;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            continue;
        }
        if seen_file_field {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            )));
        }
        seen_file_field = true;

        let file_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| {
                tracing::warn!("Upload stream error: {}", e);
                HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    "Failed to read uploaded file",
                ))
            })?;
            if bytes.len() + data.len() > max_size {
                return Err(HttpResponse::PayloadTooLarge().json(ApiResponse::error_empty(
                    ErrorCode::FileSizeExceeded,
                    "File size exceeds the limit",
                )));
            }
            bytes.extend_from_slice(&data);
        }

        if !file_name.is_empty() {
            uploaded = Some(UploadedFile { file_name, bytes });
        }
    }

    Ok(uploaded)
}

pub async fn handle_submit(
    service: &SubmissionService,
    student: &Student,
    problem_id: i64,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let max_size = AppConfig::get().upload.max_size;
    let file = match read_upload(&mut payload, max_size).await {
        Ok(file) => file,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    let blobs = service.get_blob_store(request);

    match submit_solution(
        storage.as_ref(),
        blobs.as_ref(),
        student.id,
        problem_id,
        file,
    )
    .await
    {
        Ok(submission) => {
            tracing::info!(
                "Student {} submitted problem {}",
                student.student_code,
                problem_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                submission,
                "Solution submitted successfully!",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn upload(name: &str) -> Option<UploadedFile> {
        Some(UploadedFile {
            file_name: name.to_string(),
            bytes: b"print(42)".to_vec(),
        })
    }

    #[tokio::test]
    async fn test_second_submit_is_rejected() {
        let storage = test_support::storage().await;
        let blobs = test_support::blobs();
        let student = test_support::seed_student(storage.as_ref(), "S-1").await;
        let problem = test_support::seed_problem(storage.as_ref(), "Echo", 10).await;

        let first = submit_solution(
            storage.as_ref(),
            blobs.as_ref(),
            student.id,
            problem.id,
            upload("a.py"),
        )
        .await
        .unwrap();
        assert_eq!(first.file_name, "a.py");
        assert!(!first.is_evaluated());

        let err = submit_solution(
            storage.as_ref(),
            blobs.as_ref(),
            student.id,
            problem.id,
            upload("b.py"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PortalError::AlreadySubmitted(_)));
        assert_eq!(blobs.len(), 1);
        assert!(storage.submission_exists(student.id, problem.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_submits_persist_one() {
        let storage = test_support::storage().await;
        let blobs = test_support::blobs();
        let student = test_support::seed_student(storage.as_ref(), "S-1").await;
        let problem = test_support::seed_problem(storage.as_ref(), "Echo", 10).await;

        let (a, b) = tokio::join!(
            submit_solution(
                storage.as_ref(),
                blobs.as_ref(),
                student.id,
                problem.id,
                upload("a.py"),
            ),
            submit_solution(
                storage.as_ref(),
                blobs.as_ref(),
                student.id,
                problem.id,
                upload("b.py"),
            ),
        );

        let results = [a, b];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().any(|r| matches!(r, Err(PortalError::AlreadySubmitted(_)))));
        assert_eq!(blobs.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_requires_file_and_problem() {
        let storage = test_support::storage().await;
        let blobs = test_support::blobs();
        let student = test_support::seed_student(storage.as_ref(), "S-1").await;
        let problem = test_support::seed_problem(storage.as_ref(), "Echo", 10).await;

        let err = submit_solution(storage.as_ref(), blobs.as_ref(), student.id, problem.id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::NoFile(_)));

        let err = submit_solution(
            storage.as_ref(),
            blobs.as_ref(),
            student.id,
            problem.id + 100,
            upload("a.py"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));
        assert!(blobs.is_empty());
    }

    #[tokio::test]
    async fn test_empty_file_content_is_accepted() {
        let storage = test_support::storage().await;
        let blobs = test_support::blobs();
        let student = test_support::seed_student(storage.as_ref(), "S-1").await;
        let problem = test_support::seed_problem(storage.as_ref(), "Echo", 10).await;

        let submission = submit_solution(
            storage.as_ref(),
            blobs.as_ref(),
            student.id,
            problem.id,
            Some(UploadedFile {
                file_name: "empty.txt".to_string(),
                bytes: Vec::new(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(blobs.retrieve(&submission.file_ref).await.unwrap(), Vec::<u8>::new());
    }
}
