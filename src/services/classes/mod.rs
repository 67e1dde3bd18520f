pub mod assign;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::{
    ApiResponse, ErrorCode,
    classes::requests::{ClassQueryParams, CreateClassRequest, UpdateClassRequest},
    users::entities::UserRole,
};
use crate::storage::Storage;

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

pub(crate) fn class_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ClassNotFound,
        "Class not found",
    ))
}

pub(crate) fn class_conflict() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::ClassAlreadyExists,
        "Class name already exists in this grade",
    ))
}

/// 校验年级存在且科目属于该年级，不满足时返回 400 响应
pub(crate) async fn check_grade_and_subject(
    storage: &Arc<dyn Storage>,
    grade_id: i64,
    subject_id: i64,
) -> Result<Option<HttpResponse>> {
    if storage.get_grade_by_id(grade_id).await?.is_none() {
        return Ok(Some(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::GradeNotFound,
            "Grade does not exist",
        ))));
    }

    match storage.get_subject_by_id(subject_id).await? {
        None => Ok(Some(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject does not exist",
        )))),
        Some(subject) if subject.grade_id != grade_id => {
            Ok(Some(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::SubjectGradeMismatch,
                "Subject does not belong to the class grade",
            ))))
        }
        Some(_) => Ok(None),
    }
}

/// 校验用户存在且是教师角色
pub(crate) async fn check_teacher(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
) -> Result<Option<HttpResponse>> {
    match storage.get_user_by_id(teacher_id).await? {
        Some(user) if user.role == UserRole::Teacher => Ok(None),
        _ => Ok(Some(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidTeacher,
            "Teacher does not exist or is not a teacher",
        )))),
    }
}

impl ClassService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 班级列表，教师只能看到自己的班级
    pub async fn list_classes(
        &self,
        query: ClassQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_classes(self, query, request).await
    }

    pub async fn get_class(&self, class_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_class(self, class_id, request).await
    }

    pub async fn create_class(
        &self,
        class_data: CreateClassRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, class_data, request).await
    }

    pub async fn update_class(
        &self,
        class_id: i64,
        update_data: UpdateClassRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, class_id, update_data, request).await
    }

    // 分配或取消分配教师
    pub async fn assign_teacher(
        &self,
        class_id: i64,
        teacher_id: Option<i64>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assign::assign_teacher(self, class_id, teacher_id, request).await
    }

    pub async fn delete_class(
        &self,
        class_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, class_id, request).await
    }
}
