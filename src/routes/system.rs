use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::SystemService;

// 懒加载的全局 SystemService 实例
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

pub async fn get_info(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.get_info(&request).await
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/system")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("/info", web::get().to(get_info)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppStartTime;
    use crate::routes::test_support::{bearer, seed_user, storage_data, test_storage};
    use actix_web::{App, http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_system_info_for_admin() {
        let storage = test_storage().await;
        let admin = seed_user(&storage, "admin", UserRole::Admin, true, "x").await;
        let teacher = seed_user(&storage, "teacher", UserRole::Teacher, true, "x").await;
        let started = chrono::Utc::now() - chrono::Duration::seconds(90);

        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: started,
                }))
                .configure(configure_system_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/system/info")
            .insert_header(bearer(&teacher))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/api/v1/system/info")
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));
        assert!(body["data"]["uptime_seconds"].as_i64().unwrap() >= 90);
    }
}
