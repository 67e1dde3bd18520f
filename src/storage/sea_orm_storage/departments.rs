//! 部门存储操作

use super::SeaOrmStorage;
use crate::entity::departments::{ActiveModel, Column, Entity as Departments};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{Result, db_error};
use crate::models::{
    PaginationInfo, PaginatedResponse,
    departments::{
        entities::Department, requests::DepartmentQueryParams,
        responses::DepartmentListResponse,
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn create_department_impl(&self, name: String) -> Result<Department> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建部门失败", e))?;

        Ok(result.into_department())
    }

    pub async fn get_department_by_id_impl(&self, id: i64) -> Result<Option<Department>> {
        let result = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询部门失败", e))?;

        Ok(result.map(|m| m.into_department()))
    }

    /// 分页列出部门，按名称排序
    pub async fn list_departments_with_pagination_impl(
        &self,
        query: DepartmentQueryParams,
    ) -> Result<DepartmentListResponse> {
        let page = query.pagination.page();
        let size = query.pagination.size();

        let mut select = Departments::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let term = search.trim();
            select = select.filter(like_contains(Column::Name, term));
        }

        let paginator = select.order_by_asc(Column::Name).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("查询部门总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询部门页数失败", e))?;
        let departments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| db_error("查询部门列表失败", e))?;

        Ok(PaginatedResponse {
            items: departments
                .into_iter()
                .map(|m| m.into_department())
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_department_impl(
        &self,
        id: i64,
        name: String,
    ) -> Result<Option<Department>> {
        if self.get_department_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            name: Set(name),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新部门失败", e))?;

        Ok(Some(result.into_department()))
    }

    /// 删除部门，所属用户解除关联
    pub async fn delete_department_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        Users::update_many()
            .col_expr(UserColumn::DepartmentId, Expr::value(Option::<i64>::None))
            .filter(UserColumn::DepartmentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("解除用户部门失败", e))?;

        let result = Departments::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| db_error("删除部门失败", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(result.rows_affected > 0)
    }
}
