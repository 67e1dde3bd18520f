use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::models::{ApiResponse, AppStartTime, system::responses::SystemInfoResponse};

pub async fn get_info(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    // 未注册启动时间时以当前时间代替
    let started_at = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|data| data.start_datetime)
        .unwrap_or_else(chrono::Utc::now);
    let uptime_seconds = (chrono::Utc::now() - started_at).num_seconds().max(0);

    let response = SystemInfoResponse {
        system_name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        started_at,
        uptime_seconds,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "System information retrieved successfully",
    )))
}
