use serde::Serialize;
use ts_rs::TS;

use crate::models::common::PaginationInfo;
use crate::models::users::entities::User;

// 教师及其任课班级数量
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherSummary {
    #[serde(flatten)]
    #[ts(flatten)]
    pub user: User,
    pub class_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherListResponse {
    pub items: Vec<TeacherSummary>,
    pub pagination: PaginationInfo,
}
