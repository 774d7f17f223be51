use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Local, NaiveDate, TimeZone};

use super::ProblemService;
use crate::errors::{PortalError, Result};
use crate::models::ApiResponse;
use crate::models::problems::requests::{ProblemListParams, ProblemListQuery};
use crate::models::problems::responses::ProblemListResponse;
use crate::storage::Storage;

/// 题目列表默认页大小
pub const PROBLEM_PAGE_SIZE: i64 = 5;

/// 将本地日历日转换为 [当天零点, 次日零点) 的 unix 秒区间
pub fn local_day_range(date: &str) -> Result<(i64, i64)> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| PortalError::validation(format!("Invalid date: {date}. Expected YYYY-MM-DD")))?;
    let next = day
        .succ_opt()
        .ok_or_else(|| PortalError::validation(format!("Invalid date: {date}")))?;

    let midnight = |d: NaiveDate| -> Result<i64> {
        let naive = d
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| PortalError::validation(format!("Invalid date: {date}")))?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.timestamp())
            .ok_or_else(|| PortalError::validation(format!("Invalid date: {date}")))
    };

    Ok((midnight(day)?, midnight(next)?))
}

pub async fn list_problems(
    storage: &dyn Storage,
    params: ProblemListParams,
) -> Result<ProblemListResponse> {
    let (page, size) = params.pagination.resolve(PROBLEM_PAGE_SIZE);
    let date = params
        .date
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    let created_range = date.as_deref().map(local_day_range).transpose()?;

    let mut response = storage
        .list_problems_with_pagination(ProblemListQuery {
            page,
            size,
            created_range,
        })
        .await?;
    response.date = date;
    Ok(response)
}

pub async fn handle_list(
    service: &ProblemService,
    query: ProblemListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match list_problems(storage.as_ref(), query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Problem list retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
