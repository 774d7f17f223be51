use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::faculties::entities::Faculty;
use crate::models::faculties::responses::FacultyDashboardResponse;
use crate::models::submissions::requests::SubmissionListParams;
use crate::services::submissions::list::list_all;
use crate::storage::Storage;

pub const FACULTY_DASHBOARD_PAGE_SIZE: i64 = 7;

pub async fn faculty_dashboard(
    storage: &dyn Storage,
    faculty: &Faculty,
    params: SubmissionListParams,
) -> Result<FacultyDashboardResponse> {
    let submissions = list_all(storage, &params, FACULTY_DASHBOARD_PAGE_SIZE).await?;

    Ok(FacultyDashboardResponse {
        faculty_username: faculty.username.clone(),
        search: params.search.unwrap_or_default().trim().to_string(),
        submissions: submissions.items,
        pagination: submissions.pagination,
    })
}

pub async fn handle_faculty_dashboard(
    service: &DashboardService,
    faculty: &Faculty,
    query: SubmissionListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match faculty_dashboard(storage.as_ref(), faculty, query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Dashboard retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
