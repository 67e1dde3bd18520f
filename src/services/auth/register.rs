use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::UserRole, requests::CreateUserRequest, responses::UserResponse},
};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

use super::AuthService;

/// 自助注册
///
/// 普通用户注册后立即可用；教师账号创建为未审批状态，需管理员审批后才能登录。
/// 不允许通过注册创建管理员。
pub async fn handle_register(
    service: &AuthService,
    mut create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    create_request.username = create_request.username.trim().to_string();
    create_request.email = create_request.email.trim().to_string();

    let role = create_request.role.clone().unwrap_or(UserRole::User);
    if role == UserRole::Admin {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::RoleNotAllowed,
            "Administrator accounts cannot be self-registered",
        )));
    }

    if let Err(response) = validate_new_user(&create_request) {
        return Ok(response);
    }

    if let Err(response) = check_user_unique(&storage, &create_request).await? {
        return Ok(response);
    }

    if let Some(department_id) = create_request.department_id
        && storage.get_department_by_id(department_id).await?.is_none()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::DepartmentNotFound,
            "Department does not exist",
        )));
    }

    // 将明文密码替换为哈希后的密码
    create_request.password = hash_password(&create_request.password)?;
    create_request.is_approved = Some(!role.requires_approval());
    create_request.role = Some(role);

    let user = storage.create_user(create_request).await?;
    let message = if user.is_approved {
        "Registration successful"
    } else {
        "Registration submitted, waiting for administrator approval"
    };
    tracing::info!("User {} registered as {}", user.username, user.role);

    Ok(HttpResponse::Created().json(ApiResponse::success(UserResponse { user }, message)))
}

/// 用户名、邮箱、密码格式校验，注册与管理员创建共用
pub(crate) fn validate_new_user(req: &CreateUserRequest) -> Result<(), HttpResponse> {
    if let Err(msg) = validate_username(&req.username) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }
    if let Err(msg) = validate_email(&req.email) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }
    if let Err(msg) = validate_password_simple(&req.password) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }
    Ok(())
}

/// 用户名和邮箱唯一性检查，外层 Result 为存储错误
pub(crate) async fn check_user_unique(
    storage: &Arc<dyn Storage>,
    req: &CreateUserRequest,
) -> crate::errors::Result<Result<(), HttpResponse>> {
    if storage.get_user_by_username(&req.username).await?.is_some() {
        return Ok(Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserNameAlreadyExists,
            "Username already exists",
        ))));
    }
    if storage.get_user_by_email(&req.email).await?.is_some() {
        return Ok(Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))));
    }
    Ok(Ok(()))
}
