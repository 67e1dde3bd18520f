use super::SeaOrmStorage;
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, db_error};
use crate::models::{
    PaginationInfo,
    teachers::{
        requests::TeacherListQuery,
        responses::{TeacherListResponse, TeacherSummary},
    },
    users::{
        entities::{User, UserRole, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.unwrap_or(UserRole::User).to_string()),
            status: Set(UserStatus::Active.to_string()),
            is_approved: Set(req.is_approved.unwrap_or(true)),
            department_id: Set(req.department_id),
            profile_name: Set(req.profile_name),
            phone: Set(req.phone),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建用户失败", e))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名或邮箱获取用户
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let term = search.trim();
            select = select.filter(
                Condition::any()
                    .add(like_contains(Column::Username, term))
                    .add(like_contains(Column::Email, term))
                    .add(like_contains(Column::ProfileName, term)),
            );
        }

        if let Some(ref role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        if let Some(approved) = query.approved {
            select = select.filter(Column::IsApproved.eq(approved));
        }

        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("查询用户总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询用户页数失败", e))?;
        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| db_error("查询用户列表失败", e))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| db_error("更新最后登录时间失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新用户信息，角色不再是教师时解除其任课班级
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        if let Some(ref role) = update.role
            && *role != UserRole::Teacher
        {
            Classes::update_many()
                .col_expr(ClassColumn::TeacherId, Expr::value(Option::<i64>::None))
                .filter(ClassColumn::TeacherId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| db_error("解除班级教师失败", e))?;
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(department_id) = update.department_id {
            model.department_id = Set(Some(department_id));
        }
        if let Some(profile_name) = update.profile_name {
            model.profile_name = Set(Some(profile_name));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }

        model
            .update(&txn)
            .await
            .map_err(|e| db_error("更新用户失败", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        self.get_user_by_id_impl(id).await
    }

    /// 设置审批状态
    pub async fn set_user_approval_impl(&self, id: i64, approved: bool) -> Result<Option<User>> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::IsApproved, Expr::value(approved))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| db_error("更新审批状态失败", e))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get_user_by_id_impl(id).await
    }

    /// 删除用户，先解除其任课班级
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        Classes::update_many()
            .col_expr(ClassColumn::TeacherId, Expr::value(Option::<i64>::None))
            .filter(ClassColumn::TeacherId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("解除班级教师失败", e))?;

        let result = Users::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| db_error("删除用户失败", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| db_error("统计用户数量失败", e))
    }

    /// 分页列出教师，附带任课班级数量
    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Users::find().filter(Column::Role.eq(UserRole::TEACHER));

        if let Some(approved) = query.approved {
            select = select.filter(Column::IsApproved.eq(approved));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let term = search.trim();
            select = select.filter(
                Condition::any()
                    .add(like_contains(Column::Username, term))
                    .add(like_contains(Column::Email, term))
                    .add(like_contains(Column::ProfileName, term)),
            );
        }

        let paginator = select
            .order_by_asc(Column::Username)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("查询教师总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询教师页数失败", e))?;
        let teachers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| db_error("查询教师列表失败", e))?;

        let mut items = Vec::with_capacity(teachers.len());
        for teacher in teachers {
            let class_count = Classes::find()
                .filter(ClassColumn::TeacherId.eq(teacher.id))
                .count(&self.db)
                .await
                .map_err(|e| db_error("统计教师班级失败", e))?;
            items.push(TeacherSummary {
                user: teacher.into_user(),
                class_count: class_count as i64,
            });
        }

        Ok(TeacherListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }
}
