//! 年级存储操作

use super::SeaOrmStorage;
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::entity::stream_subjects::{Column as StreamSubjectColumn, Entity as StreamSubjects};
use crate::entity::streams::{Column as StreamColumn, Entity as Streams};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::errors::{Result, db_error};
use crate::models::{
    PaginationInfo, PaginatedResponse,
    grades::{
        entities::Grade,
        requests::GradeQueryParams,
        responses::{GradeDeleteResponse, GradeListResponse},
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_grade_impl(&self, name: String) -> Result<Grade> {
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
            .map_err(|e| db_error("创建年级失败", e))?;

        Ok(result.into_grade())
    }

    pub async fn get_grade_by_id_impl(&self, id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询年级失败", e))?;

        Ok(result.map(|m| m.into_grade()))
    }

    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeQueryParams,
    ) -> Result<GradeListResponse> {
        let page = query.pagination.page();
        let size = query.pagination.size();

        let mut select = Grades::find();

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
            .map_err(|e| db_error("查询年级总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询年级页数失败", e))?;
        let grades = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| db_error("查询年级列表失败", e))?;

        Ok(PaginatedResponse {
            items: grades.into_iter().map(|m| m.into_grade()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_grade_impl(&self, id: i64, name: String) -> Result<Option<Grade>> {
        if self.get_grade_by_id_impl(id).await?.is_none() {
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
            .map_err(|e| db_error("更新年级失败", e))?;

        Ok(Some(result.into_grade()))
    }

    /// 删除年级
    ///
    /// 同一事务内依次删除：方向-科目关联、班级、方向、科目，最后删除年级本身。
    pub async fn delete_grade_impl(&self, id: i64) -> Result<Option<GradeDeleteResponse>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        if Grades::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| db_error("查询年级失败", e))?
            .is_none()
        {
            return Ok(None);
        }

        let subject_ids: Vec<i64> = Subjects::find()
            .select_only()
            .column(SubjectColumn::Id)
            .filter(SubjectColumn::GradeId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| db_error("查询年级科目失败", e))?;

        let stream_ids: Vec<i64> = Streams::find()
            .select_only()
            .column(StreamColumn::Id)
            .filter(StreamColumn::GradeId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| db_error("查询年级方向失败", e))?;

        let links = StreamSubjects::delete_many()
            .filter(
                Condition::any()
                    .add(StreamSubjectColumn::StreamId.is_in(stream_ids))
                    .add(StreamSubjectColumn::SubjectId.is_in(subject_ids.clone())),
            )
            .exec(&txn)
            .await
            .map_err(|e| db_error("删除方向科目关联失败", e))?;

        let classes = Classes::delete_many()
            .filter(
                Condition::any()
                    .add(ClassColumn::GradeId.eq(id))
                    .add(ClassColumn::SubjectId.is_in(subject_ids)),
            )
            .exec(&txn)
            .await
            .map_err(|e| db_error("删除年级班级失败", e))?;

        let streams = Streams::delete_many()
            .filter(StreamColumn::GradeId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("删除年级方向失败", e))?;

        let subjects = Subjects::delete_many()
            .filter(SubjectColumn::GradeId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("删除年级科目失败", e))?;

        Grades::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| db_error("删除年级失败", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(Some(GradeDeleteResponse {
            id,
            removed_subjects: subjects.rows_affected as i64,
            removed_streams: streams.rows_affected as i64,
            removed_stream_links: links.rows_affected as i64,
            removed_classes: classes.rows_affected as i64,
        }))
    }
}
