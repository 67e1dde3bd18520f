use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, class_not_found};
use crate::models::{ApiResponse, ErrorCode, users::entities::UserRole};
use crate::services::current_user;

pub async fn get_class(
    service: &ClassService,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;

    let Some(class) = storage.get_class_by_id(class_id).await? else {
        return Ok(class_not_found());
    };

    if user.role != UserRole::Admin && class.teacher_id != Some(user.id) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::ClassPermissionDenied,
            "You do not have permission to view this class",
        )));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        class,
        "Class information retrieved successfully",
    )))
}
