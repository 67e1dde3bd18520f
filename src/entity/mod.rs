//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod classes;
pub mod departments;
pub mod grades;
pub mod main_problems;
pub mod stream_subjects;
pub mod streams;
pub mod sub_problems;
pub mod subjects;
pub mod users;

use chrono::{DateTime, Utc};

/// 数据库中的 unix 秒时间戳转换为 UTC 时间
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
