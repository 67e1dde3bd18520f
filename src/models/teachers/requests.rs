use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_bool;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub approved: Option<bool>,
    pub search: Option<String>,
}

// 教师列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct TeacherListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub approved: Option<bool>,
    pub search: Option<String>,
}

impl From<TeacherQueryParams> for TeacherListQuery {
    fn from(params: TeacherQueryParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            approved: params.approved,
            search: params.search,
        }
    }
}
