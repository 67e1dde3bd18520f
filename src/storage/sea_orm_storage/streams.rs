//! 方向及方向-科目关联存储操作

use super::SeaOrmStorage;
use crate::entity::stream_subjects::{
    ActiveModel as StreamSubjectActiveModel, Column as StreamSubjectColumn,
    Entity as StreamSubjects,
};
use crate::entity::streams::{ActiveModel, Column, Entity as Streams};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::errors::{Result, db_error};
use crate::models::grades::{
    entities::{Stream, StreamSubject, Subject},
    responses::StreamDeleteResponse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_stream_impl(&self, grade_id: i64, name: String) -> Result<Stream> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            grade_id: Set(grade_id),
            name: Set(name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建方向失败", e))?;

        Ok(result.into_stream())
    }

    pub async fn get_stream_by_id_impl(&self, id: i64) -> Result<Option<Stream>> {
        let result = Streams::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询方向失败", e))?;

        Ok(result.map(|m| m.into_stream()))
    }

    pub async fn list_streams_by_grade_impl(&self, grade_id: i64) -> Result<Vec<Stream>> {
        let result = Streams::find()
            .filter(Column::GradeId.eq(grade_id))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询方向列表失败", e))?;

        Ok(result.into_iter().map(|m| m.into_stream()).collect())
    }

    pub async fn update_stream_impl(&self, id: i64, name: String) -> Result<Option<Stream>> {
        if self.get_stream_by_id_impl(id).await?.is_none() {
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
            .map_err(|e| db_error("更新方向失败", e))?;

        Ok(Some(result.into_stream()))
    }

    /// 删除方向及其科目关联
    pub async fn delete_stream_impl(&self, id: i64) -> Result<Option<StreamDeleteResponse>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        if Streams::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| db_error("查询方向失败", e))?
            .is_none()
        {
            return Ok(None);
        }

        let links = StreamSubjects::delete_many()
            .filter(StreamSubjectColumn::StreamId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("删除方向科目关联失败", e))?;

        Streams::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| db_error("删除方向失败", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(Some(StreamDeleteResponse {
            id,
            removed_stream_links: links.rows_affected as i64,
        }))
    }

    pub async fn link_stream_subject_impl(
        &self,
        stream_id: i64,
        subject_id: i64,
    ) -> Result<StreamSubject> {
        let model = StreamSubjectActiveModel {
            stream_id: Set(stream_id),
            subject_id: Set(subject_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("关联方向科目失败", e))?;

        Ok(result.into_stream_subject())
    }

    pub async fn unlink_stream_subject_impl(&self, stream_id: i64, subject_id: i64) -> Result<bool> {
        let result = StreamSubjects::delete_many()
            .filter(StreamSubjectColumn::StreamId.eq(stream_id))
            .filter(StreamSubjectColumn::SubjectId.eq(subject_id))
            .exec(&self.db)
            .await
            .map_err(|e| db_error("取消方向科目关联失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出方向已关联的科目
    pub async fn list_stream_subjects_impl(&self, stream_id: i64) -> Result<Vec<Subject>> {
        let subject_ids: Vec<i64> = StreamSubjects::find()
            .select_only()
            .column(StreamSubjectColumn::SubjectId)
            .filter(StreamSubjectColumn::StreamId.eq(stream_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询方向科目关联失败", e))?;

        if subject_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Subjects::find()
            .filter(SubjectColumn::Id.is_in(subject_ids))
            .order_by_asc(SubjectColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询方向科目失败", e))?;

        Ok(result.into_iter().map(|m| m.into_subject()).collect())
    }
}
