//! 子问题实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sub_problems")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub main_problem_id: i64,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::main_problems::Entity",
        from = "Column::MainProblemId",
        to = "super::main_problems::Column::Id"
    )]
    MainProblem,
}

impl Related<super::main_problems::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MainProblem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_sub_problem(self) -> crate::models::problems::entities::SubProblem {
        crate::models::problems::entities::SubProblem {
            id: self.id,
            main_problem_id: self.main_problem_id,
            name: self.name,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
