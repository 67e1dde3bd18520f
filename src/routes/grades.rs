use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::requests::{
    CreateGradeRequest, CreateStreamRequest, CreateSubjectRequest, GradeQueryParams,
    LinkStreamSubjectRequest, UpdateGradeRequest, UpdateStreamRequest, UpdateSubjectRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::GradeService;
use crate::utils::{SafeIDI64, SafeSubjectIdI64};

static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

// 年级
pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeQueryParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(query.into_inner(), &req).await
}

pub async fn get_grade(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_grade(id.0, &req).await
}

pub async fn create_grade(
    req: HttpRequest,
    body: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.create_grade(body.into_inner().name, &req).await
}

pub async fn update_grade(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .update_grade(id.0, body.into_inner().name, &req)
        .await
}

pub async fn delete_grade(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.delete_grade(id.0, &req).await
}

// 科目
pub async fn list_subjects(req: HttpRequest, grade_id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_subjects(grade_id.0, &req).await
}

pub async fn create_subject(
    req: HttpRequest,
    grade_id: SafeIDI64,
    body: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .create_subject(grade_id.0, body.into_inner().name, &req)
        .await
}

pub async fn get_subject(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_subject(id.0, &req).await
}

pub async fn update_subject(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .update_subject(id.0, body.into_inner().name, &req)
        .await
}

pub async fn delete_subject(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.delete_subject(id.0, &req).await
}

// 方向
pub async fn list_streams(req: HttpRequest, grade_id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_streams(grade_id.0, &req).await
}

pub async fn create_stream(
    req: HttpRequest,
    grade_id: SafeIDI64,
    body: web::Json<CreateStreamRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .create_stream(grade_id.0, body.into_inner().name, &req)
        .await
}

pub async fn get_stream(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_stream(id.0, &req).await
}

pub async fn update_stream(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateStreamRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .update_stream(id.0, body.into_inner().name, &req)
        .await
}

pub async fn delete_stream(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.delete_stream(id.0, &req).await
}

pub async fn list_stream_subjects(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_stream_subjects(id.0, &req).await
}

pub async fn link_stream_subject(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<LinkStreamSubjectRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .link_stream_subject(id.0, body.subject_id, &req)
        .await
}

pub async fn unlink_stream_subject(
    req: HttpRequest,
    id: SafeIDI64,
    subject_id: SafeSubjectIdI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .unlink_stream_subject(id.0, subject_id.0, &req)
        .await
}

// 读接口对所有登录用户开放，写接口仅管理员
pub fn configure_grade_routes(cfg: &mut web::ServiceConfig) {
    let admin = || middlewares::RequireRole::new_any(UserRole::admin_roles());

    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_grades))
                    .route(web::post().to(create_grade).wrap(admin())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_grade))
                    .route(web::put().to(update_grade).wrap(admin()))
                    .route(web::delete().to(delete_grade).wrap(admin())),
            )
            .service(
                web::resource("/{id}/subjects")
                    .route(web::get().to(list_subjects))
                    .route(web::post().to(create_subject).wrap(admin())),
            )
            .service(
                web::resource("/{id}/streams")
                    .route(web::get().to(list_streams))
                    .route(web::post().to(create_stream).wrap(admin())),
            ),
    )
    .service(
        web::scope("/api/v1/subjects")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_subject))
                    .route(web::put().to(update_subject).wrap(admin()))
                    .route(web::delete().to(delete_subject).wrap(admin())),
            ),
    )
    .service(
        web::scope("/api/v1/streams")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_stream))
                    .route(web::put().to(update_stream).wrap(admin()))
                    .route(web::delete().to(delete_stream).wrap(admin())),
            )
            .service(
                web::resource("/{id}/subjects")
                    .route(web::get().to(list_stream_subjects))
                    .route(web::post().to(link_stream_subject).wrap(admin())),
            )
            .service(
                web::resource("/{id}/subjects/{subject_id}")
                    .route(web::delete().to(unlink_stream_subject).wrap(admin())),
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
    async fn test_grade_subject_stream_flow() {
        let storage = test_storage().await;
        let admin = seed_user(&storage, "admin", UserRole::Admin, true, "x").await;
        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .configure(configure_grade_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/grades")
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "Form 1" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let form1 = body["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri("/api/v1/grades")
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "Form 2" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let form2 = body["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/grades/{form1}/subjects"))
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "Physics" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let physics = body["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/grades/{form2}/subjects"))
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "Biology" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let biology = body["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/grades/{form1}/streams"))
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "Science" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let science = body["data"]["id"].as_i64().unwrap();

        let link = |subject_id: i64| {
            test::TestRequest::post()
                .uri(&format!("/api/v1/streams/{science}/subjects"))
                .insert_header(bearer(&admin))
                .set_json(json!({ "subject_id": subject_id }))
                .to_request()
        };

        let resp = test::call_service(&app, link(physics)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let resp = test::call_service(&app, link(physics)).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        // 不同年级的科目
        let resp = test::call_service(&app, link(biology)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = test::call_service(&app, link(9999)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/streams/{science}"))
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["subjects"][0]["name"], "Physics");

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/grades/{form1}"))
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["subjects"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["streams"].as_array().unwrap().len(), 1);

        let unlink = || {
            test::TestRequest::delete()
                .uri(&format!("/api/v1/streams/{science}/subjects/{physics}"))
                .insert_header(bearer(&admin))
                .to_request()
        };
        let resp = test::call_service(&app, unlink()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = test::call_service(&app, unlink()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/grades/{form1}"))
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["removed_subjects"], 1);
        assert_eq!(body["data"]["removed_streams"], 1);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/subjects/{physics}"))
            .insert_header(bearer(&admin))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_duplicate_grade_is_conflict() {
        let storage = test_storage().await;
        let admin = seed_user(&storage, "admin", UserRole::Admin, true, "x").await;
        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .configure(configure_grade_routes),
        )
        .await;

        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let req = test::TestRequest::post()
                .uri("/api/v1/grades")
                .insert_header(bearer(&admin))
                .set_json(json!({ "name": "Form 3" }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected);
        }
    }
}
