use super::choices::{Availability, EmploymentType, Mode, TrainerLocation};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trainers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub location: TrainerLocation,
    pub years_of_experience: i32,
    pub availability: Availability,
    pub mode: Mode,
    pub employment_type: EmploymentType,
    #[sea_orm(column_type = "Text")]
    pub timing_slots: String, // JSON array: ["10:00-12:00", "14:00-16:00"]
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        super::trainer_stack::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::trainer_stack::Relation::Trainer.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Decoded timing slots; a malformed column reads as no slots.
    pub fn slots(&self) -> Vec<String> {
        serde_json::from_str(&self.timing_slots).unwrap_or_default()
    }
}
