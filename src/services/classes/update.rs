use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, check_grade_and_subject, class_conflict, class_not_found};
use crate::errors::SchoolDeskError;
use crate::models::{ApiResponse, classes::requests::UpdateClassRequest};
use crate::utils::normalize_name;

/// 改名或调整年级、科目，未提供的字段沿用原值参与校验
pub async fn update_class(
    service: &ClassService,
    class_id: i64,
    mut update_data: UpdateClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(name) = update_data.name.take() {
        update_data.name = Some(normalize_name(&name).map_err(SchoolDeskError::validation)?);
    }

    let storage = service.get_storage(request)?;

    let Some(existing) = storage.get_class_by_id(class_id).await? else {
        return Ok(class_not_found());
    };

    if update_data.grade_id.is_some() || update_data.subject_id.is_some() {
        let grade_id = update_data.grade_id.unwrap_or(existing.grade_id);
        let subject_id = update_data.subject_id.unwrap_or(existing.subject_id);
        if let Some(response) = check_grade_and_subject(&storage, grade_id, subject_id).await? {
            return Ok(response);
        }
    }

    match storage.update_class(class_id, update_data).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class information updated successfully",
        ))),
        Ok(None) => Ok(class_not_found()),
        Err(SchoolDeskError::Conflict(_)) => Ok(class_conflict()),
        Err(e) => Err(e.into()),
    }
}
