use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::CreateUserRequest, responses::UserResponse},
};
use crate::services::auth::register::{check_user_unique, validate_new_user};
use crate::utils::password::hash_password;

/// 管理员创建用户，任意角色，默认已审批
pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    user_data.username = user_data.username.trim().to_string();
    user_data.email = user_data.email.trim().to_string();

    if let Err(response) = validate_new_user(&user_data) {
        return Ok(response);
    }
    if let Err(response) = check_user_unique(&storage, &user_data).await? {
        return Ok(response);
    }

    if let Some(department_id) = user_data.department_id
        && storage.get_department_by_id(department_id).await?.is_none()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::DepartmentNotFound,
            "Department does not exist",
        )));
    }

    user_data.password = hash_password(&user_data.password)?;
    user_data.is_approved = Some(user_data.is_approved.unwrap_or(true));

    let user = storage.create_user(user_data).await?;
    tracing::info!("User {} created with role {}", user.username, user.role);

    Ok(HttpResponse::Created().json(ApiResponse::success(
        UserResponse { user },
        "User created successfully",
    )))
}
