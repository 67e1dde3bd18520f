use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, grade_not_found, subject_not_found};
use crate::errors::SchoolDeskError;
use crate::models::{ApiResponse, ErrorCode, grades::responses::SubjectListResponse};
use crate::utils::normalize_name;

fn subject_conflict() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::SubjectAlreadyExists,
        "Subject name already exists in this grade",
    ))
}

pub async fn list_subjects(
    service: &GradeService,
    grade_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if storage.get_grade_by_id(grade_id).await?.is_none() {
        return Ok(grade_not_found());
    }
    let items = storage.list_subjects_by_grade(grade_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubjectListResponse { items },
        "Subject list retrieved successfully",
    )))
}

pub async fn create_subject(
    service: &GradeService,
    grade_id: i64,
    name: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = normalize_name(&name).map_err(SchoolDeskError::validation)?;
    let storage = service.get_storage(request)?;

    if storage.get_grade_by_id(grade_id).await?.is_none() {
        return Ok(grade_not_found());
    }

    match storage.create_subject(grade_id, name).await {
        Ok(subject) => Ok(HttpResponse::Created().json(ApiResponse::success(
            subject,
            "Subject created successfully",
        ))),
        Err(SchoolDeskError::Conflict(_)) => Ok(subject_conflict()),
        Err(e) => Err(e.into()),
    }
}

pub async fn get_subject(
    service: &GradeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_subject_by_id(id).await? {
        Some(subject) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject retrieved successfully",
        ))),
        None => Ok(subject_not_found()),
    }
}

pub async fn update_subject(
    service: &GradeService,
    id: i64,
    name: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = normalize_name(&name).map_err(SchoolDeskError::validation)?;
    let storage = service.get_storage(request)?;

    match storage.update_subject(id, name).await {
        Ok(Some(subject)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject updated successfully",
        ))),
        Ok(None) => Ok(subject_not_found()),
        Err(SchoolDeskError::Conflict(_)) => Ok(subject_conflict()),
        Err(e) => Err(e.into()),
    }
}

/// 删除科目，同时移除其方向关联和班级
pub async fn delete_subject(
    service: &GradeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_subject(id).await? {
        Some(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Subject deleted successfully",
        ))),
        None => Ok(subject_not_found()),
    }
}
