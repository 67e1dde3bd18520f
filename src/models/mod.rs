pub mod auth;
pub mod classes;
pub mod common;
pub mod departments;
pub mod grades;
pub mod problems;
pub mod system;
pub mod teachers;
pub mod users;

pub use common::{ApiResponse, ErrorCode, PaginatedResponse, PaginationInfo, PaginationQuery};

/// 程序启动时间，用于系统信息接口计算运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
