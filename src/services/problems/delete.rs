use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProblemService;
use crate::blob::BlobStore;
use crate::errors::{PortalError, Result};
use crate::models::ApiResponse;
use crate::models::problems::responses::ProblemDeleteResponse;
use crate::storage::Storage;

/// 删除题目并级联删除提交；事务提交后尽力清理文件
pub async fn delete_problem(
    storage: &dyn Storage,
    blobs: &dyn BlobStore,
    problem_id: i64,
) -> Result<ProblemDeleteResponse> {
    let file_refs = storage
        .delete_problem(problem_id)
        .await?
        .ok_or_else(|| PortalError::not_found("Problem not found."))?;

    for blob_ref in &file_refs {
        if let Err(e) = blobs.remove(blob_ref).await {
            tracing::warn!("Failed to remove blob {}: {}", blob_ref, e);
        }
    }

    Ok(ProblemDeleteResponse {
        id: problem_id,
        removed_submissions: file_refs.len() as u64,
    })
}

pub async fn handle_delete(
    service: &ProblemService,
    problem_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let blobs = service.get_blob_store(request);

    match delete_problem(storage.as_ref(), blobs.as_ref(), problem_id).await {
        Ok(result) => {
            tracing::info!(
                "Problem {} deleted with {} submissions",
                result.id,
                result.removed_submissions
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                result,
                "Problem deleted successfully.",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::requests::{NewSubmission, SubmissionListQuery};
    use crate::test_support;

    #[tokio::test]
    async fn test_delete_problem_cascades_submissions_and_blobs() {
        let storage = test_support::storage().await;
        let blobs = test_support::blobs();
        let problem = test_support::seed_problem(storage.as_ref(), "Heaps", 10).await;
        let keep = test_support::seed_problem(storage.as_ref(), "Tries", 10).await;
        let alice = test_support::seed_student(storage.as_ref(), "S-1").await;
        let bob = test_support::seed_student(storage.as_ref(), "S-2").await;

        for (student, target) in [(&alice, &problem), (&bob, &problem), (&alice, &keep)] {
            let blob_ref = blobs.store(b"code".to_vec(), "a.py").await.unwrap();
            storage
                .create_submission(NewSubmission {
                    problem_id: target.id,
                    student_id: student.id,
                    file_ref: blob_ref,
                    file_name: "a.py".to_string(),
                })
                .await
                .unwrap();
        }
        assert_eq!(blobs.len(), 3);

        let result = delete_problem(storage.as_ref(), blobs.as_ref(), problem.id)
            .await
            .unwrap();
        assert_eq!(result.removed_submissions, 2);
        assert_eq!(blobs.len(), 1);
        assert!(storage.get_problem_by_id(problem.id).await.unwrap().is_none());

        let alice_items = storage
            .list_submissions_with_pagination(SubmissionListQuery {
                page: 1,
                size: 10,
                student_id: Some(alice.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(alice_items.items.len(), 1);
        assert_eq!(alice_items.items[0].problem.id, keep.id);

        let err = delete_problem(storage.as_ref(), blobs.as_ref(), problem.id)
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));
    }
}
