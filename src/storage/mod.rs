use std::sync::Arc;

use crate::models::{
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    departments::{
        entities::Department, requests::DepartmentQueryParams,
        responses::DepartmentListResponse,
    },
    grades::{
        entities::{Grade, Stream, StreamSubject, Subject},
        requests::GradeQueryParams,
        responses::{
            GradeDeleteResponse, GradeListResponse, StreamDeleteResponse, SubjectDeleteResponse,
        },
    },
    problems::{
        entities::{MainProblem, SubProblem},
        requests::{ProblemQueryParams, UpdateSubProblemRequest},
        responses::{MainProblemDeleteResponse, MainProblemListResponse},
    },
    teachers::{requests::TeacherListQuery, responses::TeacherListResponse},
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段已是哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 设置审批状态
    async fn set_user_approval(&self, id: i64, approved: bool) -> Result<Option<User>>;
    // 删除用户，其任课班级的 teacher_id 置空
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;
    // 列出教师及其班级数量
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse>;

    /// 部门管理方法
    async fn create_department(&self, name: String) -> Result<Department>;
    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>>;
    async fn list_departments_with_pagination(
        &self,
        query: DepartmentQueryParams,
    ) -> Result<DepartmentListResponse>;
    async fn update_department(&self, id: i64, name: String) -> Result<Option<Department>>;
    // 删除部门，所属用户的 department_id 置空
    async fn delete_department(&self, id: i64) -> Result<bool>;

    /// 问题分类管理方法
    async fn create_main_problem(&self, name: String) -> Result<MainProblem>;
    async fn get_main_problem_by_id(&self, id: i64) -> Result<Option<MainProblem>>;
    async fn list_main_problems_with_pagination(
        &self,
        query: ProblemQueryParams,
    ) -> Result<MainProblemListResponse>;
    async fn update_main_problem(&self, id: i64, name: String) -> Result<Option<MainProblem>>;
    // 级联删除主问题及其子问题
    async fn delete_main_problem(&self, id: i64) -> Result<Option<MainProblemDeleteResponse>>;
    async fn create_sub_problem(&self, main_problem_id: i64, name: String) -> Result<SubProblem>;
    async fn get_sub_problem_by_id(&self, id: i64) -> Result<Option<SubProblem>>;
    async fn list_sub_problems(&self, main_problem_id: i64) -> Result<Vec<SubProblem>>;
    async fn update_sub_problem(
        &self,
        id: i64,
        update: UpdateSubProblemRequest,
    ) -> Result<Option<SubProblem>>;
    async fn delete_sub_problem(&self, id: i64) -> Result<bool>;

    /// 年级管理方法
    async fn create_grade(&self, name: String) -> Result<Grade>;
    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>>;
    async fn list_grades_with_pagination(
        &self,
        query: GradeQueryParams,
    ) -> Result<GradeListResponse>;
    async fn update_grade(&self, id: i64, name: String) -> Result<Option<Grade>>;
    // 级联删除年级下的科目、方向、关联和班级
    async fn delete_grade(&self, id: i64) -> Result<Option<GradeDeleteResponse>>;

    /// 科目管理方法
    async fn create_subject(&self, grade_id: i64, name: String) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects_by_grade(&self, grade_id: i64) -> Result<Vec<Subject>>;
    async fn update_subject(&self, id: i64, name: String) -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<Option<SubjectDeleteResponse>>;

    /// 方向管理方法
    async fn create_stream(&self, grade_id: i64, name: String) -> Result<Stream>;
    async fn get_stream_by_id(&self, id: i64) -> Result<Option<Stream>>;
    async fn list_streams_by_grade(&self, grade_id: i64) -> Result<Vec<Stream>>;
    async fn update_stream(&self, id: i64, name: String) -> Result<Option<Stream>>;
    async fn delete_stream(&self, id: i64) -> Result<Option<StreamDeleteResponse>>;
    // 方向与科目关联
    async fn link_stream_subject(&self, stream_id: i64, subject_id: i64)
    -> Result<StreamSubject>;
    async fn unlink_stream_subject(&self, stream_id: i64, subject_id: i64) -> Result<bool>;
    async fn list_stream_subjects(&self, stream_id: i64) -> Result<Vec<Subject>>;

    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 列出班级
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    // 更新班级信息
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    // 分配或取消分配教师
    async fn assign_class_teacher(
        &self,
        class_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Option<Class>>;
    // 删除班级
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
