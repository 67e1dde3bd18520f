//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 同时作为全局的 HTTP 错误映射：错误种类决定状态码和响应中的业务错误码。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sea_orm::{DbErr, SqlErr};

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_schooldesk_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SchoolDeskError {
            $($variant(String),)*
        }

        impl SchoolDeskError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolDeskError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolDeskError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolDeskError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchoolDeskError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolDeskError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_schooldesk_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Conflict("E006", "Resource Conflict"),
    Serialization("E007", "Serialization Error"),
    DateParse("E008", "Date Parse Error"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
}

impl SchoolDeskError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 响应体中使用的业务错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            SchoolDeskError::Validation(_) | SchoolDeskError::DateParse(_) => {
                ErrorCode::BadRequest
            }
            SchoolDeskError::NotFound(_) => ErrorCode::NotFound,
            SchoolDeskError::Conflict(_) => ErrorCode::Conflict,
            SchoolDeskError::Authentication(_) => ErrorCode::Unauthorized,
            SchoolDeskError::Authorization(_) => ErrorCode::Forbidden,
            _ => ErrorCode::InternalServerError,
        }
    }
}

impl fmt::Display for SchoolDeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolDeskError {}

impl ResponseError for SchoolDeskError {
    fn status_code(&self) -> StatusCode {
        match self {
            SchoolDeskError::Validation(_) | SchoolDeskError::DateParse(_) => {
                StatusCode::BAD_REQUEST
            }
            SchoolDeskError::Authentication(_) => StatusCode::UNAUTHORIZED,
            SchoolDeskError::Authorization(_) => StatusCode::FORBIDDEN,
            SchoolDeskError::NotFound(_) => StatusCode::NOT_FOUND,
            SchoolDeskError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self.format_simple());
        }
        HttpResponse::build(status).json(ApiResponse::error_empty(
            self.error_code(),
            self.message(),
        ))
    }
}

// 为常见的错误类型实现 From trait
impl From<DbErr> for SchoolDeskError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => SchoolDeskError::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => SchoolDeskError::Validation(msg),
            _ => SchoolDeskError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for SchoolDeskError {
    fn from(err: serde_json::Error) -> Self {
        SchoolDeskError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolDeskError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolDeskError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolDeskError>;

/// 将数据库错误映射为业务错误，保留唯一约束与外键冲突的语义
pub fn db_error(context: &str, err: DbErr) -> SchoolDeskError {
    match SchoolDeskError::from(err) {
        SchoolDeskError::DatabaseOperation(msg) => {
            SchoolDeskError::DatabaseOperation(format!("{context}: {msg}"))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolDeskError::database_config("test").code(), "E001");
        assert_eq!(SchoolDeskError::validation("test").code(), "E004");
        assert_eq!(SchoolDeskError::conflict("test").code(), "E006");
        assert_eq!(SchoolDeskError::authentication("test").code(), "E009");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SchoolDeskError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            SchoolDeskError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = SchoolDeskError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = SchoolDeskError::conflict("Grade name already exists");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Conflict"));
        assert!(formatted.contains("Grade name already exists"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            SchoolDeskError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SchoolDeskError::authentication("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            SchoolDeskError::authorization("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            SchoolDeskError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SchoolDeskError::conflict("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            SchoolDeskError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_db_error_keeps_context() {
        let err = db_error("删除年级失败", DbErr::Custom("boom".into()));
        assert_eq!(err.code(), "E003");
        assert!(err.message().starts_with("删除年级失败"));
    }
}
