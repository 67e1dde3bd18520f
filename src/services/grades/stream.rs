use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, grade_not_found, stream_not_found, subject_not_found};
use crate::errors::SchoolDeskError;
use crate::models::{
    ApiResponse, ErrorCode,
    grades::{
        entities::StreamDetail,
        responses::{StreamListResponse, SubjectListResponse},
    },
};
use crate::utils::normalize_name;

fn stream_conflict() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::StreamAlreadyExists,
        "Stream name already exists in this grade",
    ))
}

pub async fn list_streams(
    service: &GradeService,
    grade_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if storage.get_grade_by_id(grade_id).await?.is_none() {
        return Ok(grade_not_found());
    }
    let items = storage.list_streams_by_grade(grade_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StreamListResponse { items },
        "Stream list retrieved successfully",
    )))
}

pub async fn create_stream(
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

    match storage.create_stream(grade_id, name).await {
        Ok(stream) => Ok(HttpResponse::Created().json(ApiResponse::success(
            stream,
            "Stream created successfully",
        ))),
        Err(SchoolDeskError::Conflict(_)) => Ok(stream_conflict()),
        Err(e) => Err(e.into()),
    }
}

/// 方向详情，包含已关联的科目
pub async fn get_stream(
    service: &GradeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let Some(stream) = storage.get_stream_by_id(id).await? else {
        return Ok(stream_not_found());
    };
    let subjects = storage.list_stream_subjects(id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StreamDetail { stream, subjects },
        "Stream retrieved successfully",
    )))
}

pub async fn update_stream(
    service: &GradeService,
    id: i64,
    name: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = normalize_name(&name).map_err(SchoolDeskError::validation)?;
    let storage = service.get_storage(request)?;

    match storage.update_stream(id, name).await {
        Ok(Some(stream)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stream,
            "Stream updated successfully",
        ))),
        Ok(None) => Ok(stream_not_found()),
        Err(SchoolDeskError::Conflict(_)) => Ok(stream_conflict()),
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_stream(
    service: &GradeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_stream(id).await? {
        Some(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Stream deleted successfully",
        ))),
        None => Ok(stream_not_found()),
    }
}

pub async fn list_stream_subjects(
    service: &GradeService,
    stream_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if storage.get_stream_by_id(stream_id).await?.is_none() {
        return Ok(stream_not_found());
    }
    let items = storage.list_stream_subjects(stream_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubjectListResponse { items },
        "Stream subjects retrieved successfully",
    )))
}

/// 关联科目到方向，科目必须与方向属于同一年级
pub async fn link_stream_subject(
    service: &GradeService,
    stream_id: i64,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let Some(stream) = storage.get_stream_by_id(stream_id).await? else {
        return Ok(stream_not_found());
    };
    let Some(subject) = storage.get_subject_by_id(subject_id).await? else {
        return Ok(subject_not_found());
    };

    if subject.grade_id != stream.grade_id {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SubjectGradeMismatch,
            "Subject does not belong to the stream's grade",
        )));
    }

    match storage.link_stream_subject(stream_id, subject_id).await {
        Ok(link) => Ok(HttpResponse::Created().json(ApiResponse::success(
            link,
            "Subject linked to stream",
        ))),
        Err(SchoolDeskError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::StreamSubjectAlreadyLinked,
                "Subject is already linked to this stream",
            ),
        )),
        Err(e) => Err(e.into()),
    }
}

pub async fn unlink_stream_subject(
    service: &GradeService,
    stream_id: i64,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if storage.unlink_stream_subject(stream_id, subject_id).await? {
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Subject unlinked from stream",
        )))
    } else {
        Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StreamSubjectNotLinked,
            "Subject is not linked to this stream",
        )))
    }
}
