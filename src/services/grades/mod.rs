//! 年级、科目、方向服务
//!
//! 科目和方向都隶属于年级；方向与科目通过关联表连接，且只能关联同年级的科目。

pub mod grade;
pub mod stream;
pub mod subject;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::{ApiResponse, ErrorCode, grades::requests::GradeQueryParams};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

pub(crate) fn grade_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::GradeNotFound,
        "Grade not found",
    ))
}

pub(crate) fn subject_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::SubjectNotFound,
        "Subject not found",
    ))
}

pub(crate) fn stream_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::StreamNotFound,
        "Stream not found",
    ))
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 年级
    pub async fn list_grades(
        &self,
        query: GradeQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grade::list_grades(self, query, request).await
    }

    pub async fn get_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        grade::get_grade(self, id, request).await
    }

    pub async fn create_grade(
        &self,
        name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grade::create_grade(self, name, request).await
    }

    pub async fn update_grade(
        &self,
        id: i64,
        name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grade::update_grade(self, id, name, request).await
    }

    pub async fn delete_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        grade::delete_grade(self, id, request).await
    }

    // 科目
    pub async fn list_subjects(
        &self,
        grade_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        subject::list_subjects(self, grade_id, request).await
    }

    pub async fn create_subject(
        &self,
        grade_id: i64,
        name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        subject::create_subject(self, grade_id, name, request).await
    }

    pub async fn get_subject(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        subject::get_subject(self, id, request).await
    }

    pub async fn update_subject(
        &self,
        id: i64,
        name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        subject::update_subject(self, id, name, request).await
    }

    pub async fn delete_subject(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        subject::delete_subject(self, id, request).await
    }

    // 方向
    pub async fn list_streams(
        &self,
        grade_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        stream::list_streams(self, grade_id, request).await
    }

    pub async fn create_stream(
        &self,
        grade_id: i64,
        name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        stream::create_stream(self, grade_id, name, request).await
    }

    pub async fn get_stream(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        stream::get_stream(self, id, request).await
    }

    pub async fn update_stream(
        &self,
        id: i64,
        name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        stream::update_stream(self, id, name, request).await
    }

    pub async fn delete_stream(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        stream::delete_stream(self, id, request).await
    }

    pub async fn list_stream_subjects(
        &self,
        stream_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        stream::list_stream_subjects(self, stream_id, request).await
    }

    pub async fn link_stream_subject(
        &self,
        stream_id: i64,
        subject_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        stream::link_stream_subject(self, stream_id, subject_id, request).await
    }

    pub async fn unlink_stream_subject(
        &self,
        stream_id: i64,
        subject_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        stream::unlink_stream_subject(self, stream_id, subject_id, request).await
    }
}
