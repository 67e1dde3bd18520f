use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::problems::requests::{
    CreateMainProblemRequest, CreateSubProblemRequest, ProblemQueryParams,
    UpdateMainProblemRequest, UpdateSubProblemRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ProblemService;
use crate::utils::SafeIDI64;

static PROBLEM_SERVICE: Lazy<ProblemService> = Lazy::new(ProblemService::new_lazy);

pub async fn list_main_problems(
    req: HttpRequest,
    query: web::Query<ProblemQueryParams>,
) -> ActixResult<HttpResponse> {
    PROBLEM_SERVICE
        .list_main_problems(query.into_inner(), &req)
        .await
}

pub async fn get_main_problem(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROBLEM_SERVICE.get_main_problem(id.0, &req).await
}

pub async fn create_main_problem(
    req: HttpRequest,
    body: web::Json<CreateMainProblemRequest>,
) -> ActixResult<HttpResponse> {
    PROBLEM_SERVICE
        .create_main_problem(body.into_inner().name, &req)
        .await
}

pub async fn update_main_problem(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateMainProblemRequest>,
) -> ActixResult<HttpResponse> {
    PROBLEM_SERVICE
        .update_main_problem(id.0, body.into_inner().name, &req)
        .await
}

pub async fn delete_main_problem(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROBLEM_SERVICE.delete_main_problem(id.0, &req).await
}

pub async fn list_sub_problems(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROBLEM_SERVICE.list_sub_problems(id.0, &req).await
}

pub async fn create_sub_problem(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<CreateSubProblemRequest>,
) -> ActixResult<HttpResponse> {
    PROBLEM_SERVICE
        .create_sub_problem(id.0, body.into_inner().name, &req)
        .await
}

pub async fn get_sub_problem(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROBLEM_SERVICE.get_sub_problem(id.0, &req).await
}

pub async fn update_sub_problem(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateSubProblemRequest>,
) -> ActixResult<HttpResponse> {
    PROBLEM_SERVICE
        .update_sub_problem(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_sub_problem(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROBLEM_SERVICE.delete_sub_problem(id.0, &req).await
}

// 配置路由
pub fn configure_problem_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/problems")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_main_problems))
                    .route(
                        web::post()
                            .to(create_main_problem)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_main_problem))
                    .route(
                        web::put()
                            .to(update_main_problem)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_main_problem)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/sub-problems")
                    .route(web::get().to(list_sub_problems))
                    .route(
                        web::post()
                            .to(create_sub_problem)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    )
    .service(
        web::scope("/api/v1/sub-problems")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_sub_problem))
                    .route(
                        web::put()
                            .to(update_sub_problem)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_sub_problem)
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
    async fn test_problem_hierarchy() {
        let storage = test_storage().await;
        let admin = seed_user(&storage, "admin", UserRole::Admin, true, "x").await;
        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .configure(configure_problem_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/problems")
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "Water" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let water = body["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri("/api/v1/problems")
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "Roads" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let roads = body["data"]["id"].as_i64().unwrap();

        for name in ["Leak", "No supply"] {
            let req = test::TestRequest::post()
                .uri(&format!("/api/v1/problems/{water}/sub-problems"))
                .insert_header(bearer(&admin))
                .set_json(json!({ "name": name }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        // 父级不存在
        let req = test::TestRequest::post()
            .uri("/api/v1/problems/9999/sub-problems")
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "Orphan" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/problems/{water}"))
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["name"], "Water");
        assert_eq!(body["data"]["sub_problems"].as_array().unwrap().len(), 2);
        let leak = body["data"]["sub_problems"][0]["id"].as_i64().unwrap();

        // 移动到不存在的主问题
        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/sub-problems/{leak}"))
            .insert_header(bearer(&admin))
            .set_json(json!({ "main_problem_id": 9999 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/sub-problems/{leak}"))
            .insert_header(bearer(&admin))
            .set_json(json!({ "main_problem_id": roads }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["main_problem_id"], roads);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/problems/{water}"))
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["removed_sub_problems"], 1);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/sub-problems/{leak}"))
            .insert_header(bearer(&admin))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
