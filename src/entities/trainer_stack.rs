use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trainer_stacks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub trainer_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trainer::Entity",
        from = "Column::TrainerId",
        to = "super::trainer::Column::Id",
        on_delete = "Cascade"
    )]
    Trainer,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl ActiveModelBehavior for ActiveModel {}
