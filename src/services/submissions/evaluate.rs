use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::{PortalError, Result};
use crate::models::ApiResponse;
use crate::models::faculties::entities::Faculty;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::requests::{
    EvaluateSubmissionRequest, EvaluationFormState, EvaluationRecord,
};
use crate::models::submissions::responses::{EvaluationErrorResponse, SubmissionListItem};
use crate::storage::Storage;

/// 解析并校验分数，要求 0 <= marks <= total_marks
pub fn parse_marks(req: &EvaluateSubmissionRequest, total_marks: i32) -> Result<i32> {
    let marks = req
        .marks
        .as_ref()
        .and_then(|m| m.parse_i64())
        .ok_or_else(|| PortalError::invalid_number("Please enter a valid number for marks."))?;

    if marks < 0 {
        return Err(PortalError::out_of_range("Marks cannot be negative."));
    }
    if marks > i64::from(total_marks) {
        return Err(PortalError::out_of_range(format!(
            "Marks cannot exceed {total_marks}."
        )));
    }
    Ok(marks as i32)
}

/// 评阅提交：单行更新，重复评阅覆盖之前的结果
pub async fn evaluate_submission(
    storage: &dyn Storage,
    faculty: &Faculty,
    submission_id: i64,
    req: &EvaluateSubmissionRequest,
) -> Result<Submission> {
    let item = storage
        .get_submission_item(submission_id)
        .await?
        .ok_or_else(|| PortalError::not_found("Submission not found."))?;

    let marks = parse_marks(req, item.problem.total_marks)?;
    let remarks = req
        .remarks
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    storage
        .evaluate_submission(
            submission_id,
            EvaluationRecord {
                faculty_id: faculty.id,
                faculty_name: faculty.username.clone(),
                marks,
                remarks,
            },
        )
        .await?
        .ok_or_else(|| PortalError::not_found("Submission not found."))
}

/// 分数错误时回显当前提交与之前填写的值
async fn render_form_error(
    storage: &dyn Storage,
    submission_id: i64,
    error: &PortalError,
    form: EvaluationFormState,
) -> HttpResponse {
    let submission: Option<SubmissionListItem> =
        storage.get_submission_item(submission_id).await.ok().flatten();
    match submission {
        Some(submission) => error.to_response_with(EvaluationErrorResponse { submission, form }),
        None => error.to_response(),
    }
}

pub async fn handle_evaluate(
    service: &SubmissionService,
    faculty: &Faculty,
    submission_id: i64,
    body: EvaluateSubmissionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match evaluate_submission(storage.as_ref(), faculty, submission_id, &body).await {
        Ok(submission) => {
            tracing::info!(
                "Submission {} evaluated by {} with {} marks",
                submission.id,
                faculty.faculty_code,
                submission.faculty_marks.unwrap_or_default()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                submission,
                "Evaluation saved successfully.",
            )))
        }
        Err(e @ (PortalError::InvalidNumber(_) | PortalError::OutOfRange(_))) => Ok(
            render_form_error(storage.as_ref(), submission_id, &e, (&body).into()).await,
        ),
        Err(e) => Ok(e.to_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FormNumber;
    use crate::models::submissions::requests::NewSubmission;
    use crate::test_support;

    fn request(marks: &str, remarks: &str) -> EvaluateSubmissionRequest {
        EvaluateSubmissionRequest {
            marks: Some(FormNumber::from(marks)),
            remarks: Some(remarks.to_string()),
        }
    }

    async fn setup(total: i32) -> (std::sync::Arc<dyn Storage>, Faculty, Submission) {
        let storage = test_support::storage().await;
        let faculty = test_support::seed_faculty(storage.as_ref(), "F-1", "drsmith").await;
        let student = test_support::seed_student(storage.as_ref(), "S-1").await;
        let problem = test_support::seed_problem(storage.as_ref(), "Trees", total).await;
        let submission = storage
            .create_submission(NewSubmission {
                problem_id: problem.id,
                student_id: student.id,
                file_ref: "blob".to_string(),
                file_name: "tree.py".to_string(),
            })
            .await
            .unwrap();
        (storage, faculty, submission)
    }

    #[test]
    fn test_parse_marks_bounds() {
        assert_eq!(parse_marks(&request(" 7 ", ""), 10).unwrap(), 7);
        assert_eq!(parse_marks(&request("0", ""), 10).unwrap(), 0);
        assert_eq!(
            parse_marks(&request("-1", ""), 10).unwrap_err(),
            PortalError::out_of_range("Marks cannot be negative.")
        );
        assert_eq!(
            parse_marks(&request("99999999999", ""), 10).unwrap_err(),
            PortalError::out_of_range("Marks cannot exceed 10.")
        );
        let missing = EvaluateSubmissionRequest::default();
        assert!(matches!(
            parse_marks(&missing, 10).unwrap_err(),
            PortalError::InvalidNumber(_)
        ));
    }

    #[tokio::test]
    async fn test_evaluate_upper_bound() {
        let (storage, faculty, submission) = setup(20).await;

        let err = evaluate_submission(storage.as_ref(), &faculty, submission.id, &request("21", ""))
            .await
            .unwrap_err();
        assert_eq!(err, PortalError::out_of_range("Marks cannot exceed 20."));

        let saved = evaluate_submission(
            storage.as_ref(),
            &faculty,
            submission.id,
            &request("20", "  Well done  "),
        )
        .await
        .unwrap();
        assert_eq!(saved.faculty_marks, Some(20));
        assert_eq!(saved.faculty_remarks.as_deref(), Some("Well done"));
        assert_eq!(saved.faculty_id, Some(faculty.id));
        assert_eq!(saved.faculty_name.as_deref(), Some("drsmith"));
        assert!(saved.evaluated_at.is_some());
    }

    #[tokio::test]
    async fn test_invalid_number_leaves_marks_unchanged() {
        let (storage, faculty, submission) = setup(20).await;
        evaluate_submission(storage.as_ref(), &faculty, submission.id, &request("12", "ok"))
            .await
            .unwrap();

        let err = evaluate_submission(storage.as_ref(), &faculty, submission.id, &request("abc", "x"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PortalError::invalid_number("Please enter a valid number for marks.")
        );

        let kept = storage
            .get_submission_by_id(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.faculty_marks, Some(12));
        assert_eq!(kept.faculty_remarks.as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn test_re_evaluation_overwrites() {
        let (storage, faculty, submission) = setup(10).await;
        evaluate_submission(storage.as_ref(), &faculty, submission.id, &request("3", "first"))
            .await
            .unwrap();
        let second = evaluate_submission(storage.as_ref(), &faculty, submission.id, &request("8", ""))
            .await
            .unwrap();
        assert_eq!(second.faculty_marks, Some(8));
        assert_eq!(second.faculty_remarks.as_deref(), Some(""));

        let err = evaluate_submission(storage.as_ref(), &faculty, 404, &request("1", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));
    }
}
