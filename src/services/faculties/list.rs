use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FacultyService;
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::faculties::requests::{FacultyListParams, FacultyListQuery};
use crate::models::faculties::responses::FacultyListResponse;
use crate::storage::Storage;

/// 教师列表默认页大小
pub const FACULTY_PAGE_SIZE: i64 = 7;

pub async fn list_faculties(
    storage: &dyn Storage,
    params: FacultyListParams,
) -> Result<FacultyListResponse> {
    let (page, size) = params.pagination.resolve(FACULTY_PAGE_SIZE);
    storage
        .list_faculties_with_pagination(FacultyListQuery {
            page,
            size,
            search: params
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
        .await
}

pub async fn handle_list(
    service: &FacultyService,
    query: FacultyListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match list_faculties(storage.as_ref(), query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Faculty list retrieved successfully",
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
    async fn test_list_faculties_paginates_and_searches() {
        let storage = test_support::storage().await;
        for i in 0..9 {
            test_support::seed_faculty(storage.as_ref(), &format!("CS-{i}"), &format!("f{i}"))
                .await;
        }
        test_support::seed_faculty(storage.as_ref(), "EE-1", "volt").await;

        let first = list_faculties(
            storage.as_ref(),
            FacultyListParams {
                pagination: PaginationQuery::default(),
                search: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(first.items.len(), 7);
        assert_eq!(first.pagination.total, 10);
        assert_eq!(first.pagination.total_pages, 2);

        let found = list_faculties(
            storage.as_ref(),
            FacultyListParams {
                pagination: PaginationQuery::default(),
                search: Some(" ee ".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(found.items.len(), 1);
        assert_eq!(found.items[0].faculty_code, "EE-1");
    }
}
