//! 科目存储操作

use super::SeaOrmStorage;
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::stream_subjects::{Column as StreamSubjectColumn, Entity as StreamSubjects};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{Result, db_error};
use crate::models::grades::{entities::Subject, responses::SubjectDeleteResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_subject_impl(&self, grade_id: i64, name: String) -> Result<Subject> {
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
            .map_err(|e| db_error("创建科目失败", e))?;

        Ok(result.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询科目失败", e))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn list_subjects_by_grade_impl(&self, grade_id: i64) -> Result<Vec<Subject>> {
        let result = Subjects::find()
            .filter(Column::GradeId.eq(grade_id))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询科目列表失败", e))?;

        Ok(result.into_iter().map(|m| m.into_subject()).collect())
    }

    pub async fn update_subject_impl(&self, id: i64, name: String) -> Result<Option<Subject>> {
        if self.get_subject_by_id_impl(id).await?.is_none() {
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
            .map_err(|e| db_error("更新科目失败", e))?;

        Ok(Some(result.into_subject()))
    }

    /// 删除科目及其方向关联和班级
    pub async fn delete_subject_impl(&self, id: i64) -> Result<Option<SubjectDeleteResponse>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        if Subjects::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| db_error("查询科目失败", e))?
            .is_none()
        {
            return Ok(None);
        }

        let links = StreamSubjects::delete_many()
            .filter(StreamSubjectColumn::SubjectId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("删除方向科目关联失败", e))?;

        let classes = Classes::delete_many()
            .filter(ClassColumn::SubjectId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("删除科目班级失败", e))?;

        Subjects::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| db_error("删除科目失败", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(Some(SubjectDeleteResponse {
            id,
            removed_stream_links: links.rows_affected as i64,
            removed_classes: classes.rows_affected as i64,
        }))
    }
}
