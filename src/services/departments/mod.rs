pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::departments::requests::DepartmentQueryParams;
use crate::storage::Storage;

pub struct DepartmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl DepartmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_departments(
        &self,
        query: DepartmentQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_departments(self, query, request).await
    }

    pub async fn get_department(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_department(self, id, request).await
    }

    pub async fn create_department(
        &self,
        name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_department(self, name, request).await
    }

    pub async fn update_department(
        &self,
        id: i64,
        name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_department(self, id, name, request).await
    }

    pub async fn delete_department(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_department(self, id, request).await
    }
}
