use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProblemService;
use crate::errors::SchoolDeskError;
use crate::models::{
    ApiResponse, ErrorCode,
    problems::{requests::UpdateSubProblemRequest, responses::SubProblemListResponse},
};
use crate::utils::normalize_name;

fn main_problem_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::MainProblemNotFound,
        "Main problem not found",
    ))
}

fn sub_problem_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::SubProblemNotFound,
        "Sub problem not found",
    ))
}

// 同一主问题下子问题名称唯一
fn sub_problem_conflict() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::SubProblemAlreadyExists,
        "Sub problem name already exists under this main problem",
    ))
}

pub async fn list_sub_problems(
    service: &ProblemService,
    main_problem_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if storage.get_main_problem_by_id(main_problem_id).await?.is_none() {
        return Ok(main_problem_not_found());
    }
    let items = storage.list_sub_problems(main_problem_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubProblemListResponse {
            main_problem_id,
            items,
        },
        "Sub problem list retrieved successfully",
    )))
}

pub async fn create_sub_problem(
    service: &ProblemService,
    main_problem_id: i64,
    name: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = normalize_name(&name).map_err(SchoolDeskError::validation)?;
    let storage = service.get_storage(request)?;

    if storage.get_main_problem_by_id(main_problem_id).await?.is_none() {
        return Ok(main_problem_not_found());
    }

    match storage.create_sub_problem(main_problem_id, name).await {
        Ok(sub_problem) => Ok(HttpResponse::Created().json(ApiResponse::success(
            sub_problem,
            "Sub problem created successfully",
        ))),
        Err(SchoolDeskError::Conflict(_)) => Ok(sub_problem_conflict()),
        Err(e) => Err(e.into()),
    }
}

pub async fn get_sub_problem(
    service: &ProblemService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_sub_problem_by_id(id).await? {
        Some(sub_problem) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            sub_problem,
            "Sub problem retrieved successfully",
        ))),
        None => Ok(sub_problem_not_found()),
    }
}

/// 改名或移动到另一个主问题
pub async fn update_sub_problem(
    service: &ProblemService,
    id: i64,
    mut update: UpdateSubProblemRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(name) = update.name.take() {
        update.name = Some(normalize_name(&name).map_err(SchoolDeskError::validation)?);
    }

    let storage = service.get_storage(request)?;

    if let Some(main_problem_id) = update.main_problem_id
        && storage.get_main_problem_by_id(main_problem_id).await?.is_none()
    {
        return Ok(main_problem_not_found());
    }

    match storage.update_sub_problem(id, update).await {
        Ok(Some(sub_problem)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            sub_problem,
            "Sub problem updated successfully",
        ))),
        Ok(None) => Ok(sub_problem_not_found()),
        Err(SchoolDeskError::Conflict(_)) => Ok(sub_problem_conflict()),
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_sub_problem(
    service: &ProblemService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if storage.delete_sub_problem(id).await? {
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Sub problem deleted successfully",
        )))
    } else {
        Ok(sub_problem_not_found())
    }
}
