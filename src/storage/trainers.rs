use super::{icontains, non_blank, query_value};
use crate::entities::choices::{Availability, EmploymentType, Mode, TrainerLocation};
use crate::entities::{course, trainer, trainer_stack};
use crate::errors::PlacementError;
use crate::pagination::{self, Page};
use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// Query parameters of the trainer list. Values are kept raw so the filter
/// form can echo them back; blank values are ignored.
#[derive(Debug, Clone, Default)]
pub struct TrainerFilter {
    pub q: Option<String>,
    pub stack: Option<String>,
    pub location: Option<String>,
    pub experience: Option<String>,
    pub availability: Option<String>,
    pub mode: Option<String>,
    pub employment: Option<String>,
}

impl TrainerFilter {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let get = |key: &str| query_value(pairs, key);
        Self {
            q: get("q"),
            stack: get("stack"),
            location: get("location"),
            experience: get("experience"),
            availability: get("availability"),
            mode: get("mode"),
            employment: get("employment"),
        }
    }

    /// All given predicates, combined with AND.
    pub fn condition(&self) -> Condition {
        let mut cond = Condition::all();

        if let Some(q) = non_blank(&self.q) {
            cond = cond.add(
                Condition::any()
                    .add(icontains(trainer::Column::Name, q))
                    .add(icontains(trainer::Column::Email, q))
                    .add(icontains(trainer::Column::PhoneNumber, q)),
            );
        }

        if let Some(stack) = non_blank(&self.stack).and_then(|s| s.trim().parse::<i32>().ok()) {
            cond = cond.add(
                trainer::Column::Id.in_subquery(
                    Query::select()
                        .column(trainer_stack::Column::TrainerId)
                        .from(trainer_stack::Entity)
                        .and_where(trainer_stack::Column::CourseId.eq(stack))
                        .to_owned(),
                ),
            );
        }

        if let Some(location) = non_blank(&self.location) {
            cond = cond.add(trainer::Column::Location.eq(location));
        }

        if let Some(years) = non_blank(&self.experience).and_then(|s| s.trim().parse::<i32>().ok())
        {
            cond = cond.add(trainer::Column::YearsOfExperience.gte(years));
        }

        if let Some(availability) = non_blank(&self.availability) {
            cond = cond.add(trainer::Column::Availability.eq(availability));
        }

        if let Some(mode) = non_blank(&self.mode) {
            cond = cond.add(trainer::Column::Mode.eq(mode));
        }

        if let Some(employment) = non_blank(&self.employment) {
            cond = cond.add(trainer::Column::EmploymentType.eq(employment));
        }

        cond
    }
}

/// Validated trainer fields, as produced by the trainer form.
#[derive(Debug, Clone)]
pub struct TrainerInput {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub stack: Vec<i32>,
    pub location: TrainerLocation,
    pub years_of_experience: i32,
    pub availability: Availability,
    pub mode: Mode,
    pub employment_type: EmploymentType,
    pub timing_slots: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TrainerRow {
    pub trainer: trainer::Model,
    pub stack: Vec<course::Model>,
}

pub async fn create_trainer(
    db: &DatabaseConnection,
    input: TrainerInput,
) -> Result<trainer::Model, PlacementError> {
    let slots = serde_json::to_string(&input.timing_slots)?;
    let txn = db.begin().await?;

    let model = trainer::ActiveModel {
        name: Set(input.name),
        email: Set(input.email),
        phone_number: Set(input.phone_number),
        location: Set(input.location),
        years_of_experience: Set(input.years_of_experience),
        availability: Set(input.availability),
        mode: Set(input.mode),
        employment_type: Set(input.employment_type),
        timing_slots: Set(slots),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    replace_stack(&txn, model.id, &input.stack).await?;
    txn.commit().await?;

    tracing::info!(trainer_id = model.id, name = %model.name, "trainer created");
    Ok(model)
}

pub async fn update_trainer(
    db: &DatabaseConnection,
    id: i32,
    input: TrainerInput,
) -> Result<trainer::Model, PlacementError> {
    let existing = trainer::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| PlacementError::not_found("Trainer", id))?;
    let slots = serde_json::to_string(&input.timing_slots)?;

    let txn = db.begin().await?;
    let mut active = existing.into_active_model();
    active.name = Set(input.name);
    active.email = Set(input.email);
    active.phone_number = Set(input.phone_number);
    active.location = Set(input.location);
    active.years_of_experience = Set(input.years_of_experience);
    active.availability = Set(input.availability);
    active.mode = Set(input.mode);
    active.employment_type = Set(input.employment_type);
    active.timing_slots = Set(slots);
    let model = active.update(&txn).await?;

    replace_stack(&txn, id, &input.stack).await?;
    txn.commit().await?;

    Ok(model)
}

async fn replace_stack<C: ConnectionTrait>(
    conn: &C,
    trainer_id: i32,
    course_ids: &[i32],
) -> Result<(), PlacementError> {
    trainer_stack::Entity::delete_many()
        .filter(trainer_stack::Column::TrainerId.eq(trainer_id))
        .exec(conn)
        .await?;

    let mut ids = course_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(());
    }

    trainer_stack::Entity::insert_many(ids.into_iter().map(|course_id| {
        trainer_stack::ActiveModel {
            trainer_id: Set(trainer_id),
            course_id: Set(course_id),
        }
    }))
    .exec(conn)
    .await?;
    Ok(())
}

pub async fn get_trainer(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<TrainerRow>, PlacementError> {
    match trainer::Entity::find_by_id(id).one(db).await? {
        Some(trainer) => Ok(Some(with_stack(db, trainer).await?)),
        None => Ok(None),
    }
}

async fn with_stack(
    db: &DatabaseConnection,
    trainer: trainer::Model,
) -> Result<TrainerRow, PlacementError> {
    let stack = trainer
        .find_related(course::Entity)
        .order_by_asc(course::Column::Name)
        .all(db)
        .await?;
    Ok(TrainerRow { trainer, stack })
}

pub async fn list_trainers(
    db: &DatabaseConnection,
    filter: &TrainerFilter,
    raw_page: Option<&str>,
) -> Result<Page<TrainerRow>, PlacementError> {
    let select = trainer::Entity::find()
        .filter(filter.condition())
        .order_by_desc(trainer::Column::Id);
    let page = pagination::fetch_page(db, select, raw_page).await?;

    let mut rows = Vec::with_capacity(page.items.len());
    for trainer in page.items {
        rows.push(with_stack(db, trainer).await?);
    }

    Ok(Page {
        items: rows,
        number: page.number,
        num_pages: page.num_pages,
        total: page.total,
    })
}

pub async fn delete_trainer(db: &DatabaseConnection, id: i32) -> Result<(), PlacementError> {
    let txn = db.begin().await?;
    trainer_stack::Entity::delete_many()
        .filter(trainer_stack::Column::TrainerId.eq(id))
        .exec(&txn)
        .await?;
    let result = trainer::Entity::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(PlacementError::not_found("Trainer", id));
    }
    txn.commit().await?;
    tracing::info!(trainer_id = id, "trainer deleted");
    Ok(())
}

/// Remove every trainer in one transaction. Nothing is removed on failure.
pub async fn delete_all_trainers(db: &DatabaseConnection) -> Result<u64, PlacementError> {
    let txn = db.begin().await?;
    trainer_stack::Entity::delete_many().exec(&txn).await?;
    let result = trainer::Entity::delete_many().exec(&txn).await?;
    txn.commit().await?;

    tracing::warn!(count = result.rows_affected, "all trainers deleted");
    Ok(result.rows_affected)
}

pub async fn count_trainers(db: &DatabaseConnection) -> Result<u64, PlacementError> {
    use sea_orm::PaginatorTrait;
    Ok(trainer::Entity::find().count(db).await?)
}
