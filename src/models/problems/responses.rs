use serde::Serialize;
use ts_rs::TS;

use super::entities::{MainProblem, SubProblem};
use crate::models::common::PaginatedResponse;

pub type MainProblemListResponse = PaginatedResponse<MainProblem>;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/problem.ts")]
pub struct SubProblemListResponse {
    pub main_problem_id: i64,
    pub items: Vec<SubProblem>,
}

// 级联删除结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/problem.ts")]
pub struct MainProblemDeleteResponse {
    pub id: i64,
    pub removed_sub_problems: i64,
}
