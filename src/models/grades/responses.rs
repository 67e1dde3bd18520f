use serde::Serialize;
use ts_rs::TS;

use super::entities::{Grade, Stream, Subject};
use crate::models::common::PaginatedResponse;

pub type GradeListResponse = PaginatedResponse<Grade>;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct SubjectListResponse {
    pub items: Vec<Subject>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct StreamListResponse {
    pub items: Vec<Stream>,
}

// 删除年级时一并移除的下级记录数量
#[derive(Debug, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeDeleteResponse {
    pub id: i64,
    pub removed_subjects: i64,
    pub removed_streams: i64,
    pub removed_stream_links: i64,
    pub removed_classes: i64,
}

#[derive(Debug, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct SubjectDeleteResponse {
    pub id: i64,
    pub removed_stream_links: i64,
    pub removed_classes: i64,
}

#[derive(Debug, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct StreamDeleteResponse {
    pub id: i64,
    pub removed_stream_links: i64,
}
