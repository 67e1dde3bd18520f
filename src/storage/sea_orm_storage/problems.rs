//! 问题分类存储操作（主问题 / 子问题）

use super::SeaOrmStorage;
use crate::entity::main_problems::{
    ActiveModel as MainProblemActiveModel, Column as MainProblemColumn, Entity as MainProblems,
};
use crate::entity::sub_problems::{
    ActiveModel as SubProblemActiveModel, Column as SubProblemColumn, Entity as SubProblems,
};
use crate::errors::{Result, db_error};
use crate::models::{
    PaginationInfo, PaginatedResponse,
    problems::{
        entities::{MainProblem, SubProblem},
        requests::{ProblemQueryParams, UpdateSubProblemRequest},
        responses::{MainProblemDeleteResponse, MainProblemListResponse},
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_main_problem_impl(&self, name: String) -> Result<MainProblem> {
        let now = chrono::Utc::now().timestamp();

        let model = MainProblemActiveModel {
            name: Set(name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建主问题失败", e))?;

        Ok(result.into_main_problem())
    }

    pub async fn get_main_problem_by_id_impl(&self, id: i64) -> Result<Option<MainProblem>> {
        let result = MainProblems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询主问题失败", e))?;

        Ok(result.map(|m| m.into_main_problem()))
    }

    pub async fn list_main_problems_with_pagination_impl(
        &self,
        query: ProblemQueryParams,
    ) -> Result<MainProblemListResponse> {
        let page = query.pagination.page();
        let size = query.pagination.size();

        let mut select = MainProblems::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let term = search.trim();
            select = select.filter(like_contains(MainProblemColumn::Name, term));
        }

        let paginator = select
            .order_by_asc(MainProblemColumn::Name)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("查询主问题总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询主问题页数失败", e))?;
        let problems = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| db_error("查询主问题列表失败", e))?;

        Ok(PaginatedResponse {
            items: problems
                .into_iter()
                .map(|m| m.into_main_problem())
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_main_problem_impl(
        &self,
        id: i64,
        name: String,
    ) -> Result<Option<MainProblem>> {
        if self.get_main_problem_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = MainProblemActiveModel {
            id: Set(id),
            name: Set(name),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新主问题失败", e))?;

        Ok(Some(result.into_main_problem()))
    }

    /// 删除主问题，子问题在同一事务内一并删除
    pub async fn delete_main_problem_impl(
        &self,
        id: i64,
    ) -> Result<Option<MainProblemDeleteResponse>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        if MainProblems::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| db_error("查询主问题失败", e))?
            .is_none()
        {
            return Ok(None);
        }

        let removed = SubProblems::delete_many()
            .filter(SubProblemColumn::MainProblemId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("删除子问题失败", e))?;

        MainProblems::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| db_error("删除主问题失败", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(Some(MainProblemDeleteResponse {
            id,
            removed_sub_problems: removed.rows_affected as i64,
        }))
    }

    pub async fn create_sub_problem_impl(
        &self,
        main_problem_id: i64,
        name: String,
    ) -> Result<SubProblem> {
        let now = chrono::Utc::now().timestamp();

        let model = SubProblemActiveModel {
            main_problem_id: Set(main_problem_id),
            name: Set(name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建子问题失败", e))?;

        Ok(result.into_sub_problem())
    }

    pub async fn get_sub_problem_by_id_impl(&self, id: i64) -> Result<Option<SubProblem>> {
        let result = SubProblems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询子问题失败", e))?;

        Ok(result.map(|m| m.into_sub_problem()))
    }

    pub async fn list_sub_problems_impl(&self, main_problem_id: i64) -> Result<Vec<SubProblem>> {
        let result = SubProblems::find()
            .filter(SubProblemColumn::MainProblemId.eq(main_problem_id))
            .order_by_asc(SubProblemColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询子问题列表失败", e))?;

        Ok(result.into_iter().map(|m| m.into_sub_problem()).collect())
    }

    pub async fn update_sub_problem_impl(
        &self,
        id: i64,
        update: UpdateSubProblemRequest,
    ) -> Result<Option<SubProblem>> {
        if self.get_sub_problem_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = SubProblemActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(main_problem_id) = update.main_problem_id {
            model.main_problem_id = Set(main_problem_id);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新子问题失败", e))?;

        Ok(Some(result.into_sub_problem()))
    }

    pub async fn delete_sub_problem_impl(&self, id: i64) -> Result<bool> {
        let result = SubProblems::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除子问题失败", e))?;

        Ok(result.rows_affected > 0)
    }
}
