use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::admins::responses::AdminDashboardResponse;
use crate::models::submissions::requests::SubmissionListParams;
use crate::services::submissions::list::list_all;
use crate::storage::Storage;

pub const ADMIN_DASHBOARD_PAGE_SIZE: i64 = 10;

/// 统计数量 + 全部提交
pub async fn admin_dashboard(
    storage: &dyn Storage,
    params: SubmissionListParams,
) -> Result<AdminDashboardResponse> {
    let submissions = list_all(storage, &params, ADMIN_DASHBOARD_PAGE_SIZE).await?;

    Ok(AdminDashboardResponse {
        student_count: storage.count_students().await? as i64,
        faculty_count: storage.count_faculties().await? as i64,
        problem_count: storage.count_problems().await? as i64,
        submissions: submissions.items,
        pagination: submissions.pagination,
    })
}

pub async fn handle_admin_dashboard(
    service: &DashboardService,
    query: SubmissionListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match admin_dashboard(storage.as_ref(), query).await {
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
    use crate::models::PaginationQuery;
    use crate::test_support;

    #[tokio::test]
    async fn test_admin_dashboard_counts() {
        let storage = test_support::storage().await;
        test_support::seed_student(storage.as_ref(), "S-1").await;
        test_support::seed_student(storage.as_ref(), "S-2").await;
        test_support::seed_faculty(storage.as_ref(), "F-1", "drsmith").await;
        test_support::seed_problem(storage.as_ref(), "P", 10).await;

        let dashboard = admin_dashboard(
            storage.as_ref(),
            SubmissionListParams {
                pagination: PaginationQuery::default(),
                search: None,
                graded: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(dashboard.student_count, 2);
        assert_eq!(dashboard.faculty_count, 1);
        assert_eq!(dashboard.problem_count, 1);
        assert!(dashboard.submissions.is_empty());
        assert_eq!(dashboard.pagination.page_size, ADMIN_DASHBOARD_PAGE_SIZE);
    }
}
