//! Student outcomes per interview.

use crate::entities::choices::OutcomeStatus;
use crate::entities::{interview, interview_student, student};
use crate::errors::PlacementError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

#[derive(Debug, Clone)]
pub struct OutcomeRow {
    pub outcome: interview_student::Model,
    pub student: student::Model,
}

/// What to do with the stored offer letter on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferLetterChange {
    Keep,
    /// Newly stored file, relative to the media root.
    Replace(String),
    Clear,
}

/// Attach a student to an interview with status `in_progress`.
pub async fn add_student(
    db: &DatabaseConnection,
    interview_id: i32,
    student_id: i32,
) -> Result<interview_student::Model, PlacementError> {
    if interview::Entity::find_by_id(interview_id).one(db).await?.is_none() {
        return Err(PlacementError::not_found("Interview", interview_id));
    }
    let student = student::Entity::find_by_id(student_id)
        .one(db)
        .await?
        .ok_or_else(|| PlacementError::not_found("Student", student_id))?;

    let existing = interview_student::Entity::find()
        .filter(interview_student::Column::InterviewId.eq(interview_id))
        .filter(interview_student::Column::StudentId.eq(student_id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(PlacementError::Validation {
            field: "student",
            message: format!("{} is already part of this interview.", student.name),
        });
    }

    let model = interview_student::ActiveModel {
        interview_id: Set(interview_id),
        student_id: Set(student_id),
        status: Set(OutcomeStatus::InProgress),
        reason: Set(None),
        offer_letter: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(interview_id, student_id, "student added to interview");
    Ok(model)
}

pub async fn get_outcome(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<OutcomeRow>, PlacementError> {
    let found = interview_student::Entity::find_by_id(id)
        .find_also_related(student::Entity)
        .one(db)
        .await?;
    Ok(found.and_then(|(outcome, student)| student.map(|student| OutcomeRow { outcome, student })))
}

/// Outcomes of an interview, by student name.
pub async fn outcomes_for_interview(
    db: &DatabaseConnection,
    interview_id: i32,
) -> Result<Vec<OutcomeRow>, PlacementError> {
    let rows = interview_student::Entity::find()
        .filter(interview_student::Column::InterviewId.eq(interview_id))
        .find_also_related(student::Entity)
        .order_by_asc(student::Column::Name)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(outcome, student)| student.map(|student| OutcomeRow { outcome, student }))
        .collect())
}

/// Update status, reason and offer letter. Returns the file that was
/// replaced or cleared so the caller can remove it.
pub async fn update_outcome(
    db: &DatabaseConnection,
    id: i32,
    status: OutcomeStatus,
    reason: Option<String>,
    offer_letter: OfferLetterChange,
) -> Result<(interview_student::Model, Option<String>), PlacementError> {
    let existing = interview_student::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| PlacementError::not_found("Interview student", id))?;

    let previous = existing.offer_letter.clone();
    let mut active = existing.into_active_model();
    active.status = Set(status);
    active.reason = Set(reason);

    let stale = match offer_letter {
        OfferLetterChange::Keep => None,
        OfferLetterChange::Replace(path) => {
            active.offer_letter = Set(Some(path));
            previous
        }
        OfferLetterChange::Clear => {
            active.offer_letter = Set(None);
            previous
        }
    };

    let model = active.update(db).await?;
    tracing::info!(outcome_id = id, status = ?model.status, "outcome updated");
    Ok((model, stale))
}

/// Delete an outcome, returning its offer letter path if it had one.
pub async fn delete_outcome(
    db: &DatabaseConnection,
    id: i32,
) -> Result<interview_student::Model, PlacementError> {
    let existing = interview_student::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| PlacementError::not_found("Interview student", id))?;
    interview_student::Entity::delete_by_id(id).exec(db).await?;
    tracing::info!(outcome_id = id, interview_id = existing.interview_id, "outcome removed");
    Ok(existing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::interviews::create_interview;
    use crate::storage::interviews::tests::{company, input};
    use crate::storage::reference::create_student;
    use crate::storage::test_support::TestDb;

    async fn interview_with_student(
        db: &DatabaseConnection,
    ) -> (interview::Model, student::Model) {
        let zoho = company(db, "Zoho").await;
        let interview = create_interview(db, input(zoho.id, vec![], 3), None)
            .await
            .expect("Failed to create interview");
        let student = create_student(db, "Meena", None, None)
            .await
            .expect("Failed to create student");
        (interview, student)
    }

    #[tokio::test]
    async fn test_add_student_starts_in_progress() {
        let test_db = TestDb::new().await;
        let db = test_db.connection();
        let (interview, student) = interview_with_student(db).await;

        let outcome = add_student(db, interview.id, student.id)
            .await
            .expect("Failed to add student");
        assert_eq!(outcome.status, OutcomeStatus::InProgress);

        let rows = outcomes_for_interview(db, interview.id).await.expect("query");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].student.name, "Meena");
    }

    #[tokio::test]
    async fn test_duplicate_student_rejected() {
        let test_db = TestDb::new().await;
        let db = test_db.connection();
        let (interview, student) = interview_with_student(db).await;

        add_student(db, interview.id, student.id).await.expect("add");
        let again = add_student(db, interview.id, student.id).await;

        assert!(matches!(
            again,
            Err(PlacementError::Validation { field: "student", .. })
        ));
    }

    #[tokio::test]
    async fn test_add_unknown_records() {
        let test_db = TestDb::new().await;
        let db = test_db.connection();
        let (interview, student) = interview_with_student(db).await;

        assert!(matches!(
            add_student(db, interview.id + 50, student.id).await,
            Err(PlacementError::NotFound { entity: "Interview", .. })
        ));
        assert!(matches!(
            add_student(db, interview.id, student.id + 50).await,
            Err(PlacementError::NotFound { entity: "Student", .. })
        ));
    }

    #[tokio::test]
    async fn test_update_reports_replaced_letter() {
        let test_db = TestDb::new().await;
        let db = test_db.connection();
        let (interview, student) = interview_with_student(db).await;
        let outcome = add_student(db, interview.id, student.id).await.expect("add");

        let (updated, stale) = update_outcome(
            db,
            outcome.id,
            OutcomeStatus::Selected,
            None,
            OfferLetterChange::Replace("offer_letters/meena_ab12cd.pdf".into()),
        )
        .await
        .expect("update");
        assert_eq!(updated.status, OutcomeStatus::Selected);
        assert_eq!(stale, None);

        let (updated, stale) = update_outcome(
            db,
            outcome.id,
            OutcomeStatus::Placed,
            None,
            OfferLetterChange::Keep,
        )
        .await
        .expect("update");
        assert_eq!(
            updated.offer_letter.as_deref(),
            Some("offer_letters/meena_ab12cd.pdf")
        );
        assert_eq!(stale, None);

        let (updated, stale) = update_outcome(
            db,
            outcome.id,
            OutcomeStatus::Rejected,
            Some("Did not clear the HR round".into()),
            OfferLetterChange::Clear,
        )
        .await
        .expect("update");
        assert_eq!(updated.offer_letter, None);
        assert_eq!(stale.as_deref(), Some("offer_letters/meena_ab12cd.pdf"));
    }

    #[tokio::test]
    async fn test_outcomes_follow_interview_delete() {
        use crate::storage::interviews::delete_interview;

        let test_db = TestDb::new().await;
        let db = test_db.connection();
        let (interview, student) = interview_with_student(db).await;
        let outcome = add_student(db, interview.id, student.id).await.expect("add");

        delete_interview(db, interview.id).await.expect("delete");
        assert!(get_outcome(db, outcome.id).await.expect("query").is_none());
    }

    #[tokio::test]
    async fn test_delete_outcome() {
        let test_db = TestDb::new().await;
        let db = test_db.connection();
        let (interview, student) = interview_with_student(db).await;
        let outcome = add_student(db, interview.id, student.id).await.expect("add");

        let removed = delete_outcome(db, outcome.id).await.expect("delete");
        assert_eq!(removed.id, outcome.id);
        assert!(matches!(
            delete_outcome(db, outcome.id).await,
            Err(PlacementError::NotFound { .. })
        ));
    }
}
