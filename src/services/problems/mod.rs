//! 问题分类服务
//!
//! 主问题与子问题两级结构，删除主问题时级联删除其子问题。

pub mod main_problem;
pub mod sub_problem;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::problems::requests::{ProblemQueryParams, UpdateSubProblemRequest};
use crate::storage::Storage;

pub struct ProblemService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProblemService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_main_problems(
        &self,
        query: ProblemQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        main_problem::list_main_problems(self, query, request).await
    }

    pub async fn get_main_problem(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        main_problem::get_main_problem(self, id, request).await
    }

    pub async fn create_main_problem(
        &self,
        name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        main_problem::create_main_problem(self, name, request).await
    }

    pub async fn update_main_problem(
        &self,
        id: i64,
        name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        main_problem::update_main_problem(self, id, name, request).await
    }

    pub async fn delete_main_problem(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        main_problem::delete_main_problem(self, id, request).await
    }

    pub async fn list_sub_problems(
        &self,
        main_problem_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        sub_problem::list_sub_problems(self, main_problem_id, request).await
    }

    pub async fn create_sub_problem(
        &self,
        main_problem_id: i64,
        name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        sub_problem::create_sub_problem(self, main_problem_id, name, request).await
    }

    pub async fn get_sub_problem(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        sub_problem::get_sub_problem(self, id, request).await
    }

    pub async fn update_sub_problem(
        &self,
        id: i64,
        update: UpdateSubProblemRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        sub_problem::update_sub_problem(self, id, update, request).await
    }

    pub async fn delete_sub_problem(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        sub_problem::delete_sub_problem(self, id, request).await
    }
}
