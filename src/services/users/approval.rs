use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode, users::responses::UserResponse};

pub async fn set_approval(
    service: &UserService,
    user_id: i64,
    approved: bool,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.set_user_approval(user_id, approved).await? {
        Some(user) => {
            tracing::info!("User {} approval set to {}", user.username, approved);
            let message = if approved {
                "User approved"
            } else {
                "User approval revoked"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(UserResponse { user }, message)))
        }
        None => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "User not found"))),
    }
}
