use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProblemService;
use crate::errors::SchoolDeskError;
use crate::models::{
    ApiResponse, ErrorCode,
    problems::{entities::MainProblemDetail, requests::ProblemQueryParams},
};
use crate::utils::normalize_name;

fn main_problem_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::MainProblemNotFound,
        "Main problem not found",
    ))
}

fn main_problem_conflict() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::MainProblemAlreadyExists,
        "Main problem name already exists",
    ))
}

pub async fn list_main_problems(
    service: &ProblemService,
    query: ProblemQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let response = storage.list_main_problems_with_pagination(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Main problem list retrieved successfully",
    )))
}

/// 主问题详情，附带全部子问题
pub async fn get_main_problem(
    service: &ProblemService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let Some(problem) = storage.get_main_problem_by_id(id).await? else {
        return Ok(main_problem_not_found());
    };
    let sub_problems = storage.list_sub_problems(id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MainProblemDetail {
            problem,
            sub_problems,
        },
        "Main problem retrieved successfully",
    )))
}

pub async fn create_main_problem(
    service: &ProblemService,
    name: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = normalize_name(&name).map_err(SchoolDeskError::validation)?;
    let storage = service.get_storage(request)?;

    match storage.create_main_problem(name).await {
        Ok(problem) => Ok(HttpResponse::Created().json(ApiResponse::success(
            problem,
            "Main problem created successfully",
        ))),
        Err(SchoolDeskError::Conflict(_)) => Ok(main_problem_conflict()),
        Err(e) => Err(e.into()),
    }
}

pub async fn update_main_problem(
    service: &ProblemService,
    id: i64,
    name: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = normalize_name(&name).map_err(SchoolDeskError::validation)?;
    let storage = service.get_storage(request)?;

    match storage.update_main_problem(id, name).await {
        Ok(Some(problem)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            problem,
            "Main problem updated successfully",
        ))),
        Ok(None) => Ok(main_problem_not_found()),
        Err(SchoolDeskError::Conflict(_)) => Ok(main_problem_conflict()),
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_main_problem(
    service: &ProblemService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_main_problem(id).await? {
        Some(result) => {
            tracing::info!(
                "Main problem {} deleted with {} sub problems",
                id,
                result.removed_sub_problems
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                result,
                "Main problem deleted successfully",
            )))
        }
        None => Ok(main_problem_not_found()),
    }
}
