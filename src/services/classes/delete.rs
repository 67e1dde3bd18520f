use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, class_not_found};
use crate::models::ApiResponse;

pub async fn delete_class(
    service: &ClassService,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if storage.delete_class(class_id).await? {
        tracing::info!("Class {} deleted", class_id);
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Class deleted successfully")))
    } else {
        Ok(class_not_found())
    }
}
