use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::departments::requests::{
    CreateDepartmentRequest, DepartmentQueryParams, UpdateDepartmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::DepartmentService;
use crate::utils::SafeIDI64;

static DEPARTMENT_SERVICE: Lazy<DepartmentService> = Lazy::new(DepartmentService::new_lazy);

pub async fn list_departments(
    req: HttpRequest,
    query: web::Query<DepartmentQueryParams>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .list_departments(query.into_inner(), &req)
        .await
}

pub async fn get_department(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.get_department(id.0, &req).await
}

pub async fn create_department(
    req: HttpRequest,
    body: web::Json<CreateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .create_department(body.into_inner().name, &req)
        .await
}

pub async fn update_department(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .update_department(id.0, body.into_inner().name, &req)
        .await
}

pub async fn delete_department(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.delete_department(id.0, &req).await
}

// 配置路由
pub fn configure_department_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/departments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_departments))
                    .route(
                        web::post()
                            .to(create_department)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_department))
                    .route(
                        web::put()
                            .to(update_department)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_department)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{bearer, seed_user, storage_data, test_storage};
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_department_crud() {
        let storage = test_storage().await;
        let admin = seed_user(&storage, "admin", UserRole::Admin, true, "x").await;
        let user = seed_user(&storage, "user", UserRole::User, true, "x").await;
        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .configure(configure_department_routes),
        )
        .await;

        // 普通用户不能创建
        let req = test::TestRequest::post()
            .uri("/api/v1/departments")
            .insert_header(bearer(&user))
            .set_json(json!({ "name": "Science" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::post()
            .uri("/api/v1/departments")
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "  Science  " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["name"], "Science");
        let id = body["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri("/api/v1/departments")
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "Science" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::post()
            .uri("/api/v1/departments")
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/api/v1/departments?search=sci")
            .insert_header(bearer(&user))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["pagination"]["total"], 1);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/departments/{id}"))
            .insert_header(bearer(&admin))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/departments/{id}"))
            .insert_header(bearer(&user))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_invalid_path_id_is_bad_request() {
        let storage = test_storage().await;
        let user = seed_user(&storage, "user", UserRole::User, true, "x").await;
        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .configure(configure_department_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/departments/abc")
            .insert_header(bearer(&user))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
