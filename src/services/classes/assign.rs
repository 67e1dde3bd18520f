use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, check_teacher, class_not_found};
use crate::models::ApiResponse;

pub async fn assign_teacher(
    service: &ClassService,
    class_id: i64,
    teacher_id: Option<i64>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Some(teacher_id) = teacher_id
        && let Some(response) = check_teacher(&storage, teacher_id).await?
    {
        return Ok(response);
    }

    match storage.assign_class_teacher(class_id, teacher_id).await? {
        Some(class) => {
            let message = if teacher_id.is_some() {
                "Teacher assigned to class"
            } else {
                "Teacher unassigned from class"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(class, message)))
        }
        None => Ok(class_not_found()),
    }
}
