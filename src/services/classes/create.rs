use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, check_grade_and_subject, check_teacher, class_conflict};
use crate::errors::SchoolDeskError;
use crate::models::{ApiResponse, classes::requests::CreateClassRequest};
use crate::utils::normalize_name;

pub async fn create_class(
    service: &ClassService,
    mut class_data: CreateClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    class_data.name = normalize_name(&class_data.name).map_err(SchoolDeskError::validation)?;
    let storage = service.get_storage(request)?;

    if let Some(response) =
        check_grade_and_subject(&storage, class_data.grade_id, class_data.subject_id).await?
    {
        return Ok(response);
    }
    if let Some(teacher_id) = class_data.teacher_id
        && let Some(response) = check_teacher(&storage, teacher_id).await?
    {
        return Ok(response);
    }

    match storage.create_class(class_data).await {
        Ok(class) => {
            tracing::info!("Class {} created in grade {}", class.name, class.grade_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                class,
                "Class created successfully",
            )))
        }
        Err(SchoolDeskError::Conflict(_)) => Ok(class_conflict()),
        Err(e) => Err(e.into()),
    }
}
