use super::choices::{Location, RoundType, Venue};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "interviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub venue: Venue,
    pub company_id: i32,
    pub applying_role: String,
    pub interview_round: RoundType,
    pub round_number: i32,
    pub parent_interview_id: Option<i32>,
    pub location: Location,
    pub other_location: Option<String>,
    pub interview_date: Date,
    pub interview_time: Time,
    pub created_by: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id",
        on_delete = "Cascade"
    )]
    Company,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentInterviewId",
        to = "Column::Id",
        on_delete = "Cascade"
    )]
    ParentInterview,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    CreatedBy,
    #[sea_orm(has_many = "super::interview_student::Entity")]
    StudentStatus,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::interview_student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentStatus.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        super::interview_course::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::interview_course::Relation::Interview.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
