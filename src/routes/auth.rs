use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::LoginRequest;
use crate::models::users::requests::CreateUserRequest;
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn login(
    req: HttpRequest,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(user_data.into_inner(), &req).await
}

pub async fn refresh_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(&request).await
}

pub async fn register(
    req: HttpRequest,
    user_data: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(user_data.into_inner(), &req).await
}

pub async fn logout() -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout().await
}

pub async fn verify_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.verify_token(&request).await
}

pub async fn get_user(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_user(&request).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(
                web::resource("/login")
                    .wrap(middlewares::RateLimit::login())
                    .route(web::post().to(login)),
            )
            .service(
                web::resource("/register")
                    .wrap(middlewares::RateLimit::register())
                    .route(web::post().to(register)),
            )
            .route("/refresh", web::post().to(refresh_token))
            .route("/logout", web::post().to(logout))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/verify-token", web::get().to(verify_token))
                    .route("/me", web::get().to(get_user)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::{
        entities::{UserRole, UserStatus},
        requests::UpdateUserRequest,
    };
    use crate::routes::test_support::{bearer, seed_user, storage_data, test_storage};
    use crate::utils::{
        jwt::{JwtUtils, REFRESH_TOKEN_COOKIE},
        password::hash_password,
    };
    use actix_web::{App, cookie::Cookie, http::StatusCode, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_login_issues_tokens_and_cookie() {
        let storage = test_storage().await;
        let hash = hash_password("Password123").unwrap();
        seed_user(&storage, "alice", UserRole::User, true, &hash).await;

        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .configure(configure_auth_routes),
        )
        .await;

        // 邮箱同样可以登录
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "username": "alice@example.com", "password": "Password123" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(
            resp.response()
                .cookies()
                .any(|c| c.name() == REFRESH_TOKEN_COOKIE && !c.value().is_empty())
        );
        let body: Value = test::read_body_json(resp).await;
        assert!(body["data"]["access_token"].as_str().is_some());
        assert_eq!(body["data"]["user"]["username"], "alice");
        assert!(body["data"]["user"].get("password_hash").is_none());

        let user = storage.get_user_by_username("alice").await.unwrap().unwrap();
        assert!(user.last_login.is_some());

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "username": "alice", "password": "wrong-pass1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_unapproved_teacher_cannot_login() {
        let storage = test_storage().await;
        let hash = hash_password("Password123").unwrap();
        seed_user(&storage, "bob", UserRole::Teacher, false, &hash).await;

        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "username": "bob", "password": "Password123" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 2002);
    }

    #[actix_web::test]
    async fn test_register_roles() {
        let storage = test_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "username": "teacher1",
                "email": "teacher1@example.com",
                "password": "Password123",
                "role": "teacher"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["user"]["is_approved"], false);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "username": "teacher1",
                "email": "other@example.com",
                "password": "Password123"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "username": "root",
                "email": "root@example.com",
                "password": "Password123",
                "role": "admin"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "username": "carol",
                "email": "carol@example.com",
                "password": "Password123",
                "department_id": 42
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_refresh_without_cookie_is_rejected() {
        let storage = test_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_suspended_user_cannot_login() {
        let storage = test_storage().await;
        let hash = hash_password("Password123").unwrap();
        let user = seed_user(&storage, "erin", UserRole::User, true, &hash).await;
        storage
            .update_user(
                user.id,
                UpdateUserRequest {
                    status: Some(UserStatus::Suspended),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "username": "erin", "password": "Password123" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 2003);
    }

    #[actix_web::test]
    async fn test_refresh_issues_new_access_token() {
        let storage = test_storage().await;
        let user = seed_user(&storage, "frank", UserRole::Teacher, true, "x").await;
        let refresh_token =
            JwtUtils::generate_refresh_token(user.id, &user.role.to_string(), None).unwrap();

        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, refresh_token.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        let access_token = body["data"]["access_token"].as_str().unwrap();
        let claims = JwtUtils::verify_access_token(access_token).unwrap();
        assert_eq!(claims.user_id(), Some(user.id));

        // 访问令牌不能充当刷新令牌
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, access_token.to_string()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_refresh_rejected_after_user_loses_access() {
        let storage = test_storage().await;
        let suspended = seed_user(&storage, "gina", UserRole::User, true, "x").await;
        let revoked = seed_user(&storage, "hank", UserRole::Teacher, true, "x").await;
        storage
            .update_user(
                suspended.id,
                UpdateUserRequest {
                    status: Some(UserStatus::Suspended),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        storage.set_user_approval(revoked.id, false).await.unwrap();

        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .configure(configure_auth_routes),
        )
        .await;

        for user in [&suspended, &revoked] {
            let refresh_token =
                JwtUtils::generate_refresh_token(user.id, &user.role.to_string(), None).unwrap();
            let req = test::TestRequest::post()
                .uri("/api/v1/auth/refresh")
                .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, refresh_token))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            assert!(
                resp.response()
                    .cookies()
                    .any(|c| c.name() == REFRESH_TOKEN_COOKIE && c.value().is_empty())
            );
        }
    }

    #[actix_web::test]
    async fn test_logout_clears_refresh_cookie() {
        let storage = test_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, "stale"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == REFRESH_TOKEN_COOKIE)
            .unwrap();
        assert!(cookie.value().is_empty());
        assert_eq!(
            cookie.max_age(),
            Some(actix_web::cookie::time::Duration::ZERO)
        );
    }

    #[actix_web::test]
    async fn test_me_requires_token() {
        let storage = test_storage().await;
        let user = seed_user(&storage, "dave", UserRole::User, true, "x").await;
        let app = test::init_service(
            App::new()
                .app_data(storage_data(&storage))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/auth/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(bearer(&user))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["user"]["id"], user.id);
    }
}
