use super::choices::{Choice, Location, Portal, Progress};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Prefix of every generated company code.
pub const CODE_PREFIX: &str = "COMP";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub company_code: String,
    pub date: Date,
    pub portal: Portal,
    pub other_portal: Option<String>,
    pub company_name: String,
    pub spoc: String,
    pub mobile: String,
    pub email: String,
    pub location: Location,
    pub other_location: Option<String>,
    pub progress: Progress,
    pub created_by: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::interview::Entity")]
    ScheduledInterviews,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    CreatedBy,
}

impl Related<super::interview::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduledInterviews.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Portal name as shown to users, resolving the free-text "others" entry.
    pub fn portal_display(&self) -> String {
        match (self.portal, &self.other_portal) {
            (Portal::Others, Some(other)) if !other.is_empty() => other.clone(),
            (portal, _) => portal.label().to_string(),
        }
    }

    pub fn location_display(&self) -> String {
        match (self.location, &self.other_location) {
            (Location::Others, Some(other)) if !other.is_empty() => other.clone(),
            (location, _) => location.label().to_string(),
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.company_name, self.company_code)
    }
}
