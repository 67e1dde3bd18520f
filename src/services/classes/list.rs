use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{
    ApiResponse,
    classes::requests::{ClassListQuery, ClassQueryParams},
    users::entities::UserRole,
};
use crate::services::current_user;

pub async fn list_classes(
    service: &ClassService,
    query: ClassQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;

    let mut list_query = ClassListQuery::from(query);
    // 教师的 teacher_id 筛选固定为本人
    if user.role == UserRole::Teacher {
        list_query.teacher_id = Some(user.id);
    }

    let response = storage.list_classes_with_pagination(list_query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Class list retrieved successfully",
    )))
}
