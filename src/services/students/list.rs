use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::students::requests::{StudentListParams, StudentListQuery};
use crate::models::students::responses::StudentListResponse;
use crate::storage::Storage;

/// 学生列表默认页大小
pub const STUDENT_PAGE_SIZE: i64 = 12;

pub async fn list_students(
    storage: &dyn Storage,
    params: StudentListParams,
) -> Result<StudentListResponse> {
    let (page, size) = params.pagination.resolve(STUDENT_PAGE_SIZE);
    storage
        .list_students_with_pagination(StudentListQuery {
            page,
            size,
            search: params
                .q
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
        .await
}

pub async fn handle_list(
    service: &StudentService,
    query: StudentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match list_students(storage.as_ref(), query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Student list retrieved successfully",
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
    async fn test_list_students_searches_name_or_code() {
        let storage = test_support::storage().await;
        for code in ["CS-1", "CS-2", "EE-7"] {
            test_support::seed_student(storage.as_ref(), code).await;
        }

        let by_code = list_students(
            storage.as_ref(),
            StudentListParams {
                pagination: PaginationQuery::default(),
                q: Some("EE".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(by_code.items.len(), 1);
        assert_eq!(by_code.items[0].student_code, "EE-7");

        // 种子数据的姓名为 "Student {code}"
        let by_name = list_students(
            storage.as_ref(),
            StudentListParams {
                pagination: PaginationQuery::default(),
                q: Some("Student CS".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(by_name.pagination.total, 2);
        assert_eq!(by_name.pagination.page_size, STUDENT_PAGE_SIZE);
    }
}
