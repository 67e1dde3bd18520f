/// 业务错误码
///
/// 通用错误位于 1xxx，各业务模块按千位分段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,
    AccountNotApproved = 2002,
    AccountSuspended = 2003,

    // 用户
    UserNotFound = 3000,
    UserNameInvalid = 3002,
    UserEmailInvalid = 3003,
    UserPasswordInvalid = 3004,
    UserNameAlreadyExists = 3005,
    UserEmailAlreadyExists = 3006,
    CanNotDeleteCurrentUser = 3007,
    RoleNotAllowed = 3008,

    // 部门
    DepartmentNotFound = 4000,
    DepartmentAlreadyExists = 4001,

    // 问题分类
    MainProblemNotFound = 5000,
    MainProblemAlreadyExists = 5001,
    SubProblemNotFound = 5002,
    SubProblemAlreadyExists = 5003,

    // 年级 / 科目 / 方向
    GradeNotFound = 6000,
    GradeAlreadyExists = 6001,
    SubjectNotFound = 6002,
    SubjectAlreadyExists = 6003,
    StreamNotFound = 6004,
    StreamAlreadyExists = 6005,
    StreamSubjectNotLinked = 6006,
    StreamSubjectAlreadyLinked = 6007,
    SubjectGradeMismatch = 6008,

    // 班级 / 教师
    ClassNotFound = 7000,
    ClassAlreadyExists = 7001,
    ClassPermissionDenied = 7002,
    TeacherNotFound = 7003,
    InvalidTeacher = 7004,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::NotFound as i32, 1004);
        assert_eq!(ErrorCode::GradeNotFound as i32, 6000);
    }
}
