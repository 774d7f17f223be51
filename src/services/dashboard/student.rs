use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::errors::Result;
use crate::models::students::entities::Student;
use crate::models::students::responses::StudentDashboardResponse;
use crate::models::{ApiResponse, PaginationQuery};
use crate::services::submissions::list::list_for_student;
use crate::storage::Storage;

/// 当前可作答的题目每次查看时重新计算
pub async fn student_dashboard(
    storage: &dyn Storage,
    student: Student,
    pagination: PaginationQuery,
) -> Result<StudentDashboardResponse> {
    let next_problem = storage.next_available_problem(student.id).await?;
    let submissions = list_for_student(storage, student.id, &pagination).await?;

    Ok(StudentDashboardResponse {
        student,
        next_problem,
        submissions: submissions.items,
        pagination: submissions.pagination,
    })
}

pub async fn handle_student_dashboard(
    service: &DashboardService,
    student: Student,
    query: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match student_dashboard(storage.as_ref(), student, query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Dashboard retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::requests::NewSubmission;
    use crate::test_support;

    async fn submit(storage: &dyn Storage, student_id: i64, problem_id: i64) {
        storage
            .create_submission(NewSubmission {
                problem_id,
                student_id,
                file_ref: format!("ref-{problem_id}"),
                file_name: "answer.txt".to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_next_problem_advances_after_submit() {
        let storage = test_support::storage().await;
        let student = test_support::seed_student(storage.as_ref(), "S-1").await;
        let first = test_support::seed_problem(storage.as_ref(), "First", 10).await;
        let second = test_support::seed_problem(storage.as_ref(), "Second", 10).await;

        let view = student_dashboard(storage.as_ref(), student.clone(), PaginationQuery::default())
            .await
            .unwrap();
        assert_eq!(view.next_problem.map(|p| p.id), Some(first.id));
        assert!(view.submissions.is_empty());

        submit(storage.as_ref(), student.id, first.id).await;
        let view = student_dashboard(storage.as_ref(), student.clone(), PaginationQuery::default())
            .await
            .unwrap();
        assert_eq!(view.next_problem.map(|p| p.id), Some(second.id));
        assert_eq!(view.submissions.len(), 1);

        submit(storage.as_ref(), student.id, second.id).await;
        let view = student_dashboard(storage.as_ref(), student, PaginationQuery::default())
            .await
            .unwrap();
        assert!(view.next_problem.is_none());
        assert_eq!(view.pagination.total, 2);
    }
}
