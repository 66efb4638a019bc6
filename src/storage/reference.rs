//! Users, courses and students: records owned by other parts of the
//! placement office that this desk only references.

use crate::entities::{course, student, user};
use crate::errors::PlacementError;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

/// Fetch a user by name, creating it on first use.
pub async fn ensure_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<user::Model, PlacementError> {
    if let Some(existing) = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let created = user::ActiveModel {
        username: Set(username.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(username, id = created.id, "created user");
    Ok(created)
}

// Courses

pub async fn create_course(
    db: &DatabaseConnection,
    name: &str,
) -> Result<course::Model, PlacementError> {
    let model = course::ActiveModel {
        name: Set(name.trim().to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(model)
}

pub async fn list_courses(db: &DatabaseConnection) -> Result<Vec<course::Model>, PlacementError> {
    Ok(course::Entity::find()
        .order_by_asc(course::Column::Name)
        .all(db)
        .await?)
}

pub async fn course_name_taken(db: &DatabaseConnection, name: &str) -> Result<bool, PlacementError> {
    let found = course::Entity::find()
        .filter(course::Column::Name.eq(name.trim()))
        .one(db)
        .await?;
    Ok(found.is_some())
}

// Students

pub async fn create_student(
    db: &DatabaseConnection,
    name: &str,
    email: Option<String>,
    phone: Option<String>,
) -> Result<student::Model, PlacementError> {
    let model = student::ActiveModel {
        name: Set(name.trim().to_string()),
        email: Set(email),
        phone: Set(phone),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(model)
}

pub async fn list_students(
    db: &DatabaseConnection,
) -> Result<Vec<student::Model>, PlacementError> {
    Ok(student::Entity::find()
        .order_by_asc(student::Column::Name)
        .all(db)
        .await?)
}

pub async fn get_student(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<student::Model>, PlacementError> {
    Ok(student::Entity::find_by_id(id).one(db).await?)
}
