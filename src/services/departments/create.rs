use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::errors::SchoolDeskError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::normalize_name;

pub async fn create_department(
    service: &DepartmentService,
    name: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = normalize_name(&name).map_err(SchoolDeskError::validation)?;
    let storage = service.get_storage(request)?;

    match storage.create_department(name).await {
        Ok(department) => {
            tracing::info!("Department {} created", department.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                department,
                "Department created successfully",
            )))
        }
        Err(SchoolDeskError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::DepartmentAlreadyExists,
                "Department name already exists",
            ),
        )),
        Err(e) => Err(e.into()),
    }
}
