//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod classes;
mod departments;
mod grades;
mod problems;
mod streams;
mod subjects;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{SchoolDeskError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接指定数据库并执行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolDeskError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolDeskError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(pool_size.min(5))
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolDeskError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolDeskError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}


// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn set_user_approval(&self, id: i64, approved: bool) -> Result<Option<User>> {
        self.set_user_approval_impl(id, approved).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        self.list_teachers_with_pagination_impl(query).await
    }

    // 部门模块
    async fn create_department(&self, name: String) -> Result<Department> {
        self.create_department_impl(name).await
    }

    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>> {
        self.get_department_by_id_impl(id).await
    }

    async fn list_departments_with_pagination(
        &self,
        query: DepartmentQueryParams,
    ) -> Result<DepartmentListResponse> {
        self.list_departments_with_pagination_impl(query).await
    }

    async fn update_department(&self, id: i64, name: String) -> Result<Option<Department>> {
        self.update_department_impl(id, name).await
    }

    async fn delete_department(&self, id: i64) -> Result<bool> {
        self.delete_department_impl(id).await
    }

    // 问题分类模块
    async fn create_main_problem(&self, name: String) -> Result<MainProblem> {
        self.create_main_problem_impl(name).await
    }

    async fn get_main_problem_by_id(&self, id: i64) -> Result<Option<MainProblem>> {
        self.get_main_problem_by_id_impl(id).await
    }

    async fn list_main_problems_with_pagination(
        &self,
        query: ProblemQueryParams,
    ) -> Result<MainProblemListResponse> {
        self.list_main_problems_with_pagination_impl(query).await
    }

    async fn update_main_problem(&self, id: i64, name: String) -> Result<Option<MainProblem>> {
        self.update_main_problem_impl(id, name).await
    }

    async fn delete_main_problem(&self, id: i64) -> Result<Option<MainProblemDeleteResponse>> {
        self.delete_main_problem_impl(id).await
    }

    async fn create_sub_problem(&self, main_problem_id: i64, name: String) -> Result<SubProblem> {
        self.create_sub_problem_impl(main_problem_id, name).await
    }

    async fn get_sub_problem_by_id(&self, id: i64) -> Result<Option<SubProblem>> {
        self.get_sub_problem_by_id_impl(id).await
    }

    async fn list_sub_problems(&self, main_problem_id: i64) -> Result<Vec<SubProblem>> {
        self.list_sub_problems_impl(main_problem_id).await
    }

    async fn update_sub_problem(
        &self,
        id: i64,
        update: UpdateSubProblemRequest,
    ) -> Result<Option<SubProblem>> {
        self.update_sub_problem_impl(id, update).await
    }

    async fn delete_sub_problem(&self, id: i64) -> Result<bool> {
        self.delete_sub_problem_impl(id).await
    }

    // 年级模块
    async fn create_grade(&self, name: String) -> Result<Grade> {
        self.create_grade_impl(name).await
    }

    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(id).await
    }

    async fn list_grades_with_pagination(
        &self,
        query: GradeQueryParams,
    ) -> Result<GradeListResponse> {
        self.list_grades_with_pagination_impl(query).await
    }

    async fn update_grade(&self, id: i64, name: String) -> Result<Option<Grade>> {
        self.update_grade_impl(id, name).await
    }

    async fn delete_grade(&self, id: i64) -> Result<Option<GradeDeleteResponse>> {
        self.delete_grade_impl(id).await
    }

    // 科目模块
    async fn create_subject(&self, grade_id: i64, name: String) -> Result<Subject> {
        self.create_subject_impl(grade_id, name).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects_by_grade(&self, grade_id: i64) -> Result<Vec<Subject>> {
        self.list_subjects_by_grade_impl(grade_id).await
    }

    async fn update_subject(&self, id: i64, name: String) -> Result<Option<Subject>> {
        self.update_subject_impl(id, name).await
    }

    async fn delete_subject(&self, id: i64) -> Result<Option<SubjectDeleteResponse>> {
        self.delete_subject_impl(id).await
    }

    // 方向模块
    async fn create_stream(&self, grade_id: i64, name: String) -> Result<Stream> {
        self.create_stream_impl(grade_id, name).await
    }

    async fn get_stream_by_id(&self, id: i64) -> Result<Option<Stream>> {
        self.get_stream_by_id_impl(id).await
    }

    async fn list_streams_by_grade(&self, grade_id: i64) -> Result<Vec<Stream>> {
        self.list_streams_by_grade_impl(grade_id).await
    }

    async fn update_stream(&self, id: i64, name: String) -> Result<Option<Stream>> {
        self.update_stream_impl(id, name).await
    }

    async fn delete_stream(&self, id: i64) -> Result<Option<StreamDeleteResponse>> {
        self.delete_stream_impl(id).await
    }

    async fn link_stream_subject(
        &self,
        stream_id: i64,
        subject_id: i64,
    ) -> Result<StreamSubject> {
        self.link_stream_subject_impl(stream_id, subject_id).await
    }

    async fn unlink_stream_subject(&self, stream_id: i64, subject_id: i64) -> Result<bool> {
        self.unlink_stream_subject_impl(stream_id, subject_id).await
    }

    async fn list_stream_subjects(&self, stream_id: i64) -> Result<Vec<Subject>> {
        self.list_stream_subjects_impl(stream_id).await
    }

    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn assign_class_teacher(
        &self,
        class_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Option<Class>> {
        self.assign_class_teacher_impl(class_id, teacher_id).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }
}
