use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/problem.ts")]
pub struct ProblemQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/problem.ts")]
pub struct CreateMainProblemRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/problem.ts")]
pub struct UpdateMainProblemRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/problem.ts")]
pub struct CreateSubProblemRequest {
    pub name: String,
}

// 子问题更新请求，可同时改名和移动到另一个主问题
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/problem.ts")]
pub struct UpdateSubProblemRequest {
    pub name: Option<String>,
    pub main_problem_id: Option<i64>,
}
