//! 路径参数提取器
//!
//! 从 `match_info` 中读取正整数 ID，非法值直接以 400 拒绝，避免各处理函数重复解析。

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload};

use crate::errors::SchoolDeskError;

macro_rules! define_safe_id_extractors {
    ($(
        $(#[$meta:meta])*
        $name:ident => $param:literal
    ),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = SchoolDeskError;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_id(req.match_info().get($param), $param).map($name))
                }
            }
        )*
    };
}

define_safe_id_extractors! {
    /// 路径中的 `{id}`
    SafeIDI64 => "id",
    /// 路径中的 `{subject_id}`
    SafeSubjectIdI64 => "subject_id",
}

fn parse_positive_id(raw: Option<&str>, param: &str) -> Result<i64, SchoolDeskError> {
    let raw = raw.ok_or_else(|| SchoolDeskError::validation(format!("Missing path parameter: {param}")))?;
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(SchoolDeskError::validation(format!(
            "Invalid path parameter {param}: {raw}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_id() {
        assert_eq!(parse_positive_id(Some("42"), "id").unwrap(), 42);
        assert!(parse_positive_id(Some("0"), "id").is_err());
        assert!(parse_positive_id(Some("-3"), "id").is_err());
        assert!(parse_positive_id(Some("abc"), "id").is_err());
        assert!(parse_positive_id(None, "id").is_err());
    }
}
