use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, grade_not_found};
use crate::errors::SchoolDeskError;
use crate::models::{
    ApiResponse, ErrorCode,
    grades::{entities::GradeDetail, requests::GradeQueryParams},
};
use crate::utils::normalize_name;

fn grade_conflict() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::GradeAlreadyExists,
        "Grade name already exists",
    ))
}

pub async fn list_grades(
    service: &GradeService,
    query: GradeQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let response = storage.list_grades_with_pagination(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Grade list retrieved successfully",
    )))
}

/// 年级详情，包含科目和方向
pub async fn get_grade(
    service: &GradeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let Some(grade) = storage.get_grade_by_id(id).await? else {
        return Ok(grade_not_found());
    };
    let subjects = storage.list_subjects_by_grade(id).await?;
    let streams = storage.list_streams_by_grade(id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        GradeDetail {
            grade,
            subjects,
            streams,
        },
        "Grade retrieved successfully",
    )))
}

pub async fn create_grade(
    service: &GradeService,
    name: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = normalize_name(&name).map_err(SchoolDeskError::validation)?;
    let storage = service.get_storage(request)?;

    match storage.create_grade(name).await {
        Ok(grade) => Ok(HttpResponse::Created().json(ApiResponse::success(
            grade,
            "Grade created successfully",
        ))),
        Err(SchoolDeskError::Conflict(_)) => Ok(grade_conflict()),
        Err(e) => Err(e.into()),
    }
}

pub async fn update_grade(
    service: &GradeService,
    id: i64,
    name: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = normalize_name(&name).map_err(SchoolDeskError::validation)?;
    let storage = service.get_storage(request)?;

    match storage.update_grade(id, name).await {
        Ok(Some(grade)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            grade,
            "Grade updated successfully",
        ))),
        Ok(None) => Ok(grade_not_found()),
        Err(SchoolDeskError::Conflict(_)) => Ok(grade_conflict()),
        Err(e) => Err(e.into()),
    }
}

/// 删除年级及其全部下级数据
pub async fn delete_grade(
    service: &GradeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_grade(id).await? {
        Some(result) => {
            tracing::info!(
                "Grade {} deleted: {} subjects, {} streams, {} classes",
                id,
                result.removed_subjects,
                result.removed_streams,
                result.removed_classes
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                result,
                "Grade deleted successfully",
            )))
        }
        None => Ok(grade_not_found()),
    }
}
