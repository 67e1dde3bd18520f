pub mod auth;

pub mod users;

pub mod departments;

pub mod problems;

pub mod grades;

pub mod classes;

pub mod teachers;

pub mod system;

pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use departments::configure_department_routes;
pub use grades::configure_grade_routes;
pub use problems::configure_problem_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teacher_routes;
pub use users::configure_user_routes;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_department_routes)
        .configure(configure_problem_routes)
        .configure(configure_grade_routes)
        .configure(configure_classes_routes)
        .configure(configure_teacher_routes)
        .configure(configure_system_routes);
}

#[cfg(test)]
pub(crate) mod test_support {
    use actix_web::{http::header, web};
    use std::sync::Arc;

    use crate::models::users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    };
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
    use crate::utils::jwt::JwtUtils;

    pub async fn test_storage() -> Arc<dyn Storage> {
        let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory database");
        Arc::new(storage)
    }

    pub fn storage_data(storage: &Arc<dyn Storage>) -> web::Data<Arc<dyn Storage>> {
        web::Data::new(storage.clone())
    }

    /// 直接写入用户，password 字段按原样存储
    pub async fn seed_user(
        storage: &Arc<dyn Storage>,
        username: &str,
        role: UserRole,
        approved: bool,
        password_hash: &str,
    ) -> User {
        storage
            .create_user(CreateUserRequest {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: password_hash.to_string(),
                role: Some(role),
                is_approved: Some(approved),
                department_id: None,
                profile_name: None,
                phone: None,
            })
            .await
            .expect("seed user")
    }

    pub fn bearer(user: &User) -> (header::HeaderName, String) {
        let token = JwtUtils::generate_access_token(user.id, &user.role.to_string())
            .expect("access token");
        (header::AUTHORIZATION, format!("Bearer {token}"))
    }
}
