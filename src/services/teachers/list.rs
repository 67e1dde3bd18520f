use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{
    ApiResponse,
    teachers::requests::{TeacherListQuery, TeacherQueryParams},
};

pub async fn list_teachers(
    service: &TeacherService,
    query: TeacherQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let response = storage
        .list_teachers_with_pagination(TeacherListQuery::from(query))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Teacher list retrieved successfully",
    )))
}
