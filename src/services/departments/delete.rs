use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode};

/// 删除部门，所属用户保留但 department_id 置空
pub async fn delete_department(
    service: &DepartmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if storage.delete_department(id).await? {
        tracing::info!("Department {} deleted", id);
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Department deleted successfully",
        )))
    } else {
        Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DepartmentNotFound,
            "Department not found",
        )))
    }
}
