use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::errors::SchoolDeskError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::normalize_name;

pub async fn update_department(
    service: &DepartmentService,
    id: i64,
    name: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = normalize_name(&name).map_err(SchoolDeskError::validation)?;
    let storage = service.get_storage(request)?;

    match storage.update_department(id, name).await {
        Ok(Some(department)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            department,
            "Department updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DepartmentNotFound,
            "Department not found",
        ))),
        Err(SchoolDeskError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::DepartmentAlreadyExists,
                "Department name already exists",
            ),
        )),
        Err(e) => Err(e.into()),
    }
}
