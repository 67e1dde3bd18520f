use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, departments::requests::DepartmentQueryParams};

pub async fn list_departments(
    service: &DepartmentService,
    query: DepartmentQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let response = storage.list_departments_with_pagination(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Department list retrieved successfully",
    )))
}
