use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 主问题（投诉大类）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/problem.ts")]
pub struct MainProblem {
    pub id: i64,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 子问题，隶属于某个主问题
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/problem.ts")]
pub struct SubProblem {
    pub id: i64,
    pub main_problem_id: i64,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 主问题及其全部子问题
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/problem.ts")]
pub struct MainProblemDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub problem: MainProblem,
    pub sub_problems: Vec<SubProblem>,
}
