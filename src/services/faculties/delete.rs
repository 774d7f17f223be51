use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FacultyService;
use crate::errors::{PortalError, Result};
use crate::models::ApiResponse;
use crate::storage::Storage;

/// 删除教师，已有评阅保留分数、评语与教师名称
pub async fn delete_faculty(storage: &dyn Storage, faculty_id: i64) -> Result<()> {
    if storage.delete_faculty(faculty_id).await? {
        Ok(())
    } else {
        Err(PortalError::not_found("Faculty not found."))
    }
}

pub async fn handle_delete(
    service: &FacultyService,
    faculty_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match delete_faculty(storage.as_ref(), faculty_id).await {
        Ok(()) => {
            tracing::info!("Faculty {} deleted", faculty_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Faculty deleted successfully.",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::requests::{EvaluationRecord, NewSubmission};
    use crate::test_support;

    #[tokio::test]
    async fn test_delete_faculty_keeps_evaluation_snapshot() {
        let storage = test_support::storage().await;
        let faculty = test_support::seed_faculty(storage.as_ref(), "F-1", "drsmith").await;
        let student = test_support::seed_student(storage.as_ref(), "S-1").await;
        let problem = test_support::seed_problem(storage.as_ref(), "Sorting", 20).await;

        let submission = storage
            .create_submission(NewSubmission {
                problem_id: problem.id,
                student_id: student.id,
                file_ref: "blob-1".to_string(),
                file_name: "sort.py".to_string(),
            })
            .await
            .unwrap();
        storage
            .evaluate_submission(
                submission.id,
                EvaluationRecord {
                    faculty_id: faculty.id,
                    faculty_name: faculty.username.clone(),
                    marks: 15,
                    remarks: "Good".to_string(),
                },
            )
            .await
            .unwrap();

        delete_faculty(storage.as_ref(), faculty.id).await.unwrap();

        let kept = storage
            .get_submission_by_id(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.faculty_id, None);
        assert_eq!(kept.faculty_name.as_deref(), Some("drsmith"));
        assert_eq!(kept.faculty_marks, Some(15));
        assert_eq!(kept.faculty_remarks.as_deref(), Some("Good"));

        let err = delete_faculty(storage.as_ref(), faculty.id).await.unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));
    }
}
