use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::{
    AssignTeacherRequest, ClassQueryParams, CreateClassRequest, UpdateClassRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ClassService;
use crate::utils::SafeIDI64;

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

// HTTP处理程序
pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ClassQueryParams>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(query.into_inner(), &req).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(class_data.into_inner(), &req)
        .await
}

pub async fn get_class(req: HttpRequest, class_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(class_id.0, &req).await
}

pub async fn update_class(
    req: HttpRequest,
    class_id: SafeIDI64,
    update_data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(class_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn assign_teacher(
    req: HttpRequest,
    class_id: SafeIDI64,
    body: web::Json<AssignTeacherRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .assign_teacher(class_id.0, body.teacher_id, &req)
        .await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(class_id.0, &req).await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                // 教师只看到自己的班级，管理员可以查询所有班级
                web::resource("")
                    .route(
                        web::get()
                            .to(list_classes)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_class)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_class)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::put()
                            .to(update_class)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_class)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/teacher").route(
                    web::put()
                        .to(assign_teacher)
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
    async fn test_class_validation_and_visibility() {
        let storage = test_storage().await;
        let admin = seed_user(&storage, "admin", UserRole::Admin, true, "x").await;
        let alice = seed_user(&storage, "alice", UserRole::Teacher, true, "x").await;
        let bob = seed_user(&storage, "bob", UserRole::Teacher, true, "x").await;
        let citizen = seed_user(&storage, "citizen", UserRole::User, true, "x").await;

        let form1 = storage.create_grade("Form 1".to_string()).await.unwrap();
        let form2 = storage.create_grade("Form 2".to_string()).await.unwrap();
        let physics = storage
            .create_subject(form1.id, "Physics".to_string())
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .configure(configure_classes_routes),
        )
        .await;

        let create = |body: Value| {
            test::TestRequest::post()
                .uri("/api/v1/classes")
                .insert_header(bearer(&admin))
                .set_json(body)
                .to_request()
        };

        // 科目不属于该年级
        let resp = test::call_service(
            &app,
            create(json!({ "name": "2A", "grade_id": form2.id, "subject_id": physics.id })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // 指定的教师不是教师角色
        let resp = test::call_service(
            &app,
            create(json!({
                "name": "1A",
                "grade_id": form1.id,
                "subject_id": physics.id,
                "teacher_id": citizen.id
            })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = test::call_service(
            &app,
            create(json!({
                "name": "1A",
                "grade_id": form1.id,
                "subject_id": physics.id,
                "teacher_id": alice.id
            })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let class_a = body["data"]["id"].as_i64().unwrap();

        let resp = test::call_service(
            &app,
            create(json!({ "name": "1A", "grade_id": form1.id, "subject_id": physics.id })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = test::call_service(
            &app,
            create(json!({ "name": "1B", "grade_id": form1.id, "subject_id": physics.id })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        // 教师即使传入其他 teacher_id 也只能看到自己的班级
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/classes?teacher_id={}", bob.id))
            .insert_header(bearer(&alice))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["pagination"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["name"], "1A");

        let req = test::TestRequest::get()
            .uri("/api/v1/classes")
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["pagination"]["total"], 2);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/classes/{class_a}"))
            .insert_header(bearer(&bob))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/classes/{class_a}"))
            .insert_header(bearer(&alice))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/v1/classes")
            .insert_header(bearer(&citizen))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_assign_and_unassign_teacher() {
        let storage = test_storage().await;
        let admin = seed_user(&storage, "admin", UserRole::Admin, true, "x").await;
        let teacher = seed_user(&storage, "teacher", UserRole::Teacher, true, "x").await;
        let grade = storage.create_grade("Form 1".to_string()).await.unwrap();
        let subject = storage
            .create_subject(grade.id, "Maths".to_string())
            .await
            .unwrap();
        let class = storage
            .create_class(CreateClassRequest {
                name: "1A".to_string(),
                grade_id: grade.id,
                subject_id: subject.id,
                teacher_id: None,
            })
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .configure(configure_classes_routes),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/classes/{}/teacher", class.id))
            .insert_header(bearer(&admin))
            .set_json(json!({ "teacher_id": teacher.id }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["teacher_id"], teacher.id);

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/classes/{}/teacher", class.id))
            .insert_header(bearer(&admin))
            .set_json(json!({ "teacher_id": null }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["data"]["teacher_id"].is_null());
    }
}
