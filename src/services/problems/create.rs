use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProblemService;
use crate::errors::{PortalError, Result};
use crate::models::admins::entities::Admin;
use crate::models::problems::entities::Problem;
use crate::models::problems::requests::{CreateProblemRequest, NewProblem};
use crate::models::problems::responses::ProblemResponse;
use crate::models::{ApiResponse, FormNumber};
use crate::storage::Storage;
use crate::utils::validate::require_fields;

const ALL_FIELDS_REQUIRED: &str = "All fields are required!";

pub async fn create_problem(
    storage: &dyn Storage,
    admin_id: i64,
    req: CreateProblemRequest,
) -> Result<Problem> {
    let total_marks_missing = req.total_marks.as_ref().is_none_or(FormNumber::is_blank);
    require_fields(&[&req.title, &req.description], ALL_FIELDS_REQUIRED)?;
    if total_marks_missing {
        return Err(PortalError::validation(ALL_FIELDS_REQUIRED));
    }

    let total_marks = req
        .total_marks
        .as_ref()
        .and_then(FormNumber::parse_i64)
        .filter(|v| *v > 0)
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| PortalError::validation("Total marks must be a positive integer."))?;

    storage
        .create_problem(NewProblem {
            title: req.title.trim().to_string(),
            description: req.description.trim().to_string(),
            total_marks,
            created_by: Some(admin_id),
        })
        .await
}

pub async fn handle_create(
    service: &ProblemService,
    admin: &Admin,
    body: CreateProblemRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match create_problem(storage.as_ref(), admin.id, body).await {
        Ok(problem) => {
            tracing::info!("Problem {} created by {}", problem.id, admin.username);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ProblemResponse { problem },
                "Problem uploaded successfully!",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn request(total: Option<&str>) -> CreateProblemRequest {
        CreateProblemRequest {
            title: "Two Sum".to_string(),
            description: "Find two numbers".to_string(),
            total_marks: total.map(FormNumber::from),
        }
    }

    #[tokio::test]
    async fn test_create_problem_records_creator() {
        let storage = test_support::storage().await;
        let admin = test_support::seed_admin(storage.as_ref(), "root").await;

        let problem = create_problem(storage.as_ref(), admin.id, request(Some(" 25 ")))
            .await
            .unwrap();
        assert_eq!(problem.total_marks, 25);
        assert_eq!(problem.created_by, Some(admin.id));
    }

    #[tokio::test]
    async fn test_create_problem_validation() {
        let storage = test_support::storage().await;
        let admin = test_support::seed_admin(storage.as_ref(), "root").await;

        let err = create_problem(storage.as_ref(), admin.id, request(None))
            .await
            .unwrap_err();
        assert_eq!(err.message(), ALL_FIELDS_REQUIRED);

        for bad in ["0", "-5", "ten"] {
            let err = create_problem(storage.as_ref(), admin.id, request(Some(bad)))
                .await
                .unwrap_err();
            assert!(matches!(err, PortalError::Validation(_)));
        }
        assert_eq!(storage.count_problems().await.unwrap(), 0);
    }
}
