use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::Result;
use crate::models::students::entities::Student;
use crate::models::submissions::requests::{SubmissionListParams, SubmissionListQuery};
use crate::models::submissions::responses::SubmissionListResponse;
use crate::models::{ApiResponse, PaginationQuery};
use crate::storage::Storage;

/// 学生自己的提交列表默认页大小
pub const OWN_SUBMISSION_PAGE_SIZE: i64 = 10;

/// 学生自己的提交（最新在前）
pub async fn list_for_student(
    storage: &dyn Storage,
    student_id: i64,
    pagination: &PaginationQuery,
) -> Result<SubmissionListResponse> {
    let (page, size) = pagination.resolve(OWN_SUBMISSION_PAGE_SIZE);
    storage
        .list_submissions_with_pagination(SubmissionListQuery {
            page,
            size,
            student_id: Some(student_id),
            ..Default::default()
        })
        .await
}

/// 全部提交（最新在前），按学生姓名或学号搜索
pub async fn list_all(
    storage: &dyn Storage,
    params: &SubmissionListParams,
    default_size: i64,
) -> Result<SubmissionListResponse> {
    let (page, size) = params.pagination.resolve(default_size);
    storage
        .list_submissions_with_pagination(SubmissionListQuery {
            page,
            size,
            student_id: None,
            search: params
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            graded: params.graded,
        })
        .await
}

pub async fn handle_list_own(
    service: &SubmissionService,
    student: &Student,
    query: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match list_for_student(storage.as_ref(), student.id, &query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Submission list retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::requests::{EvaluationRecord, NewSubmission};
    use crate::test_support;

    #[tokio::test]
    async fn test_list_scoping_search_and_graded_filter() {
        let storage = test_support::storage().await;
        let alice = test_support::seed_student(storage.as_ref(), "AL-1").await;
        let bob = test_support::seed_student(storage.as_ref(), "BO-2").await;
        let p1 = test_support::seed_problem(storage.as_ref(), "P1", 10).await;
        let p2 = test_support::seed_problem(storage.as_ref(), "P2", 10).await;
        let faculty = test_support::seed_faculty(storage.as_ref(), "F-1", "grader").await;

        let mut ids = Vec::new();
        for (student, problem) in [(&alice, &p1), (&alice, &p2), (&bob, &p1)] {
            let created = storage
                .create_submission(NewSubmission {
                    problem_id: problem.id,
                    student_id: student.id,
                    file_ref: format!("ref-{}-{}", student.id, problem.id),
                    file_name: "main.rs".to_string(),
                })
                .await
                .unwrap();
            ids.push(created.id);
        }
        storage
            .evaluate_submission(
                ids[2],
                EvaluationRecord {
                    faculty_id: faculty.id,
                    faculty_name: faculty.username.clone(),
                    marks: 5,
                    remarks: String::new(),
                },
            )
            .await
            .unwrap();

        let own = list_for_student(storage.as_ref(), alice.id, &PaginationQuery::default())
            .await
            .unwrap();
        assert_eq!(own.items.len(), 2);
        // 同一秒内提交时按 ID 倒序
        assert_eq!(own.items[0].submission.id, ids[1]);
        assert!(own.items.iter().all(|i| i.student.id == alice.id));

        let search = SubmissionListParams {
            pagination: PaginationQuery::default(),
            search: Some("BO-".to_string()),
            graded: None,
        };
        let found = list_all(storage.as_ref(), &search, 10).await.unwrap();
        assert_eq!(found.items.len(), 1);
        assert_eq!(found.items[0].student.student_code, "BO-2");

        let pending = SubmissionListParams {
            pagination: PaginationQuery::default(),
            search: None,
            graded: Some(false),
        };
        let all_pending = list_all(storage.as_ref(), &pending, 10).await.unwrap();
        assert_eq!(all_pending.pagination.total, 2);

        let graded = SubmissionListParams {
            graded: Some(true),
            ..pending
        };
        let all_graded = list_all(storage.as_ref(), &graded, 10).await.unwrap();
        assert_eq!(all_graded.pagination.total, 1);
        assert_eq!(all_graded.items[0].submission.id, ids[2]);
    }

    #[tokio::test]
    async fn test_out_of_range_page_returns_last_page() {
        let storage = test_support::storage().await;
        let student = test_support::seed_student(storage.as_ref(), "PG-1").await;
        for title in ["Q1", "Q2", "Q3"] {
            let problem = test_support::seed_problem(storage.as_ref(), title, 10).await;
            storage
                .create_submission(NewSubmission {
                    problem_id: problem.id,
                    student_id: student.id,
                    file_ref: format!("ref-{title}"),
                    file_name: "main.rs".to_string(),
                })
                .await
                .unwrap();
        }

        let query = PaginationQuery {
            page: i64::MAX,
            size: Some(2),
        };
        let listed = list_for_student(storage.as_ref(), student.id, &query)
            .await
            .unwrap();
        assert_eq!(listed.pagination.page, 2);
        assert_eq!(listed.pagination.total_pages, 2);
        assert_eq!(listed.items.len(), 1);

        let nobody = list_for_student(storage.as_ref(), student.id + 100, &query)
            .await
            .unwrap();
        assert_eq!(nobody.pagination.page, 1);
        assert!(nobody.items.is_empty());
    }
}
