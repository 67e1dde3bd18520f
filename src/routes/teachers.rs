use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::PaginationQuery;
use crate::models::teachers::requests::TeacherQueryParams;
use crate::models::users::entities::UserRole;
use crate::services::TeacherService;
use crate::utils::SafeIDI64;

static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

pub async fn list_teachers(
    req: HttpRequest,
    query: web::Query<TeacherQueryParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_teachers(query.into_inner(), &req).await
}

pub async fn my_classes(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.my_classes(query.into_inner(), &req).await
}

pub async fn teacher_classes(
    req: HttpRequest,
    teacher_id: SafeIDI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .teacher_classes(teacher_id.0, query.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teachers")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::get()
                        .to(list_teachers)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/me/classes").route(
                    web::get()
                        .to(my_classes)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .service(
                web::resource("/{id}/classes").route(
                    web::get()
                        .to(teacher_classes)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::routes::test_support::{bearer, seed_user, storage_data, test_storage};
    use actix_web::{App, http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_teacher_routes() {
        let storage = test_storage().await;
        let admin = seed_user(&storage, "admin", UserRole::Admin, true, "x").await;
        let teacher = seed_user(&storage, "teacher", UserRole::Teacher, true, "x").await;
        seed_user(&storage, "pending", UserRole::Teacher, false, "x").await;
        let grade = storage.create_grade("Form 1".to_string()).await.unwrap();
        let subject = storage
            .create_subject(grade.id, "Maths".to_string())
            .await
            .unwrap();
        storage
            .create_class(CreateClassRequest {
                name: "1A".to_string(),
                grade_id: grade.id,
                subject_id: subject.id,
                teacher_id: Some(teacher.id),
            })
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .configure(configure_teacher_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/teachers?approved=true")
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["pagination"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["username"], "teacher");
        assert_eq!(body["data"]["items"][0]["class_count"], 1);

        let req = test::TestRequest::get()
            .uri("/api/v1/teachers/me/classes")
            .insert_header(bearer(&teacher))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["items"][0]["name"], "1A");

        // 管理员不是教师
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/teachers/{}/classes", admin.id))
            .insert_header(bearer(&admin))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/teachers/{}/classes", teacher.id))
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["pagination"]["total"], 1);
    }
}
