pub mod auth;
pub mod classes;
pub mod departments;
pub mod grades;
pub mod problems;
pub mod system;
pub mod teachers;
pub mod users;

pub use auth::AuthService;
pub use classes::ClassService;
pub use departments::DepartmentService;
pub use grades::GradeService;
pub use problems::ProblemService;
pub use system::SystemService;
pub use teachers::TeacherService;
pub use users::UserService;

use actix_web::{HttpRequest, web};
use std::sync::Arc;

use crate::errors::{Result, SchoolDeskError};
use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 取出注册在 app_data 中的共享存储
pub(crate) fn storage_from_request(request: &HttpRequest) -> Result<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| SchoolDeskError::database_config("Storage not found in app data"))
}

/// 当前登录用户，路由未挂 RequireJWT 时视为未认证
pub(crate) fn current_user(request: &HttpRequest) -> Result<User> {
    RequireJWT::extract_user(request)
        .ok_or_else(|| SchoolDeskError::authentication("Unauthorized access, please login"))
}
