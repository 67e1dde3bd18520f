use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::TeacherService;
use crate::models::{
    ApiResponse, ErrorCode, PaginationQuery, classes::requests::ClassListQuery,
    users::entities::UserRole,
};
use crate::services::current_user;
use crate::storage::Storage;

async fn classes_of(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
    query: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let list_query = ClassListQuery {
        page: Some(query.page),
        size: Some(query.size),
        teacher_id: Some(teacher_id),
        ..Default::default()
    };
    let response = storage.list_classes_with_pagination(list_query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Teacher classes retrieved successfully",
    )))
}

pub async fn my_classes(
    service: &TeacherService,
    query: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;
    classes_of(&storage, user.id, query).await
}

pub async fn teacher_classes(
    service: &TeacherService,
    teacher_id: i64,
    query: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_user_by_id(teacher_id).await? {
        Some(user) if user.role == UserRole::Teacher => {
            classes_of(&storage, teacher_id, query).await
        }
        _ => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher not found",
        ))),
    }
}
