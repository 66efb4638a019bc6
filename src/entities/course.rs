use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::trainer::Entity> for Entity {
    fn to() -> RelationDef {
        super::trainer_stack::Relation::Trainer.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::trainer_stack::Relation::Course.def().rev())
    }
}

impl Related<super::interview::Entity> for Entity {
    fn to() -> RelationDef {
        super::interview_course::Relation::Interview.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::interview_course::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
