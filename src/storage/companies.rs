use super::{icontains, non_blank, query_value};
use crate::entities::choices::{Location, Portal, Progress};
use crate::entities::company::{self, CODE_PREFIX};
use crate::entities::interview;
use crate::errors::PlacementError;
use crate::pagination::{self, Page};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// Code that follows `last`, the code of the most recently inserted company.
///
/// `COMP0041` is followed by `COMP0042`; the number is zero-padded to four
/// digits and widens past `COMP9999`.
pub fn next_company_code(last: Option<&str>) -> Result<String, PlacementError> {
    let Some(last) = last else {
        return Ok(format!("{CODE_PREFIX}0001"));
    };

    let number: u64 = last
        .strip_prefix(CODE_PREFIX)
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| {
            PlacementError::Other(format!("cannot derive next company code from `{last}`"))
        })?;

    let next = number.checked_add(1).ok_or_else(|| {
        PlacementError::Other(format!("company code `{last}` cannot be incremented"))
    })?;

    Ok(format!("{CODE_PREFIX}{next:04}"))
}

/// Validated company fields, as produced by the company form.
#[derive(Debug, Clone)]
pub struct CompanyInput {
    pub date: NaiveDate,
    pub portal: Portal,
    pub other_portal: Option<String>,
    pub company_name: String,
    pub spoc: String,
    pub mobile: String,
    pub email: String,
    pub location: Location,
    pub other_location: Option<String>,
    pub progress: Progress,
}

#[derive(Debug, Clone, Default)]
pub struct CompanyFilter {
    pub q: Option<String>,
    pub progress: Option<String>,
    pub location: Option<String>,
    pub portal: Option<String>,
}

impl CompanyFilter {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            q: query_value(pairs, "q"),
            progress: query_value(pairs, "progress"),
            location: query_value(pairs, "location"),
            portal: query_value(pairs, "portal"),
        }
    }

    pub fn condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(q) = non_blank(&self.q) {
            cond = cond.add(
                Condition::any()
                    .add(icontains(company::Column::CompanyName, q))
                    .add(icontains(company::Column::CompanyCode, q))
                    .add(icontains(company::Column::Spoc, q))
                    .add(icontains(company::Column::Email, q)),
            );
        }
        if let Some(progress) = non_blank(&self.progress) {
            cond = cond.add(company::Column::Progress.eq(progress));
        }
        if let Some(location) = non_blank(&self.location) {
            cond = cond.add(company::Column::Location.eq(location));
        }
        if let Some(portal) = non_blank(&self.portal) {
            cond = cond.add(company::Column::Portal.eq(portal));
        }
        cond
    }
}

/// Insert a company, assigning the next sequential code.
///
/// The last row is read and the new row written in one transaction; the
/// unique index on `company_code` rejects a concurrent writer that derived
/// the same code.
pub async fn create_company(
    db: &DatabaseConnection,
    input: CompanyInput,
    created_by: Option<i32>,
) -> Result<company::Model, PlacementError> {
    let txn = db.begin().await?;

    let last = company::Entity::find()
        .order_by_desc(company::Column::Id)
        .one(&txn)
        .await?;
    let code = next_company_code(last.as_ref().map(|c| c.company_code.as_str()))?;

    let model = company::ActiveModel {
        company_code: Set(code),
        date: Set(input.date),
        portal: Set(input.portal),
        other_portal: Set(input.other_portal),
        company_name: Set(input.company_name),
        spoc: Set(input.spoc),
        mobile: Set(input.mobile),
        email: Set(input.email),
        location: Set(input.location),
        other_location: Set(input.other_location),
        progress: Set(input.progress),
        created_by: Set(created_by),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(company_id = model.id, code = %model.company_code, "company created");
    Ok(model)
}

/// Update everything except the code and creation metadata.
pub async fn update_company(
    db: &DatabaseConnection,
    id: i32,
    input: CompanyInput,
) -> Result<company::Model, PlacementError> {
    let existing = get_company(db, id)
        .await?
        .ok_or_else(|| PlacementError::not_found("Company", id))?;

    let mut active = existing.into_active_model();
    active.date = Set(input.date);
    active.portal = Set(input.portal);
    active.other_portal = Set(input.other_portal);
    active.company_name = Set(input.company_name);
    active.spoc = Set(input.spoc);
    active.mobile = Set(input.mobile);
    active.email = Set(input.email);
    active.location = Set(input.location);
    active.other_location = Set(input.other_location);
    active.progress = Set(input.progress);

    Ok(active.update(db).await?)
}

pub async fn get_company(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<company::Model>, PlacementError> {
    Ok(company::Entity::find_by_id(id).one(db).await?)
}

pub async fn list_companies(
    db: &DatabaseConnection,
    filter: &CompanyFilter,
    raw_page: Option<&str>,
) -> Result<Page<company::Model>, PlacementError> {
    let select = company::Entity::find()
        .filter(filter.condition())
        .order_by_desc(company::Column::Id);
    Ok(pagination::fetch_page(db, select, raw_page).await?)
}

/// Every company, by name, for select inputs.
pub async fn all_companies(db: &DatabaseConnection) -> Result<Vec<company::Model>, PlacementError> {
    Ok(company::Entity::find()
        .order_by_asc(company::Column::CompanyName)
        .all(db)
        .await?)
}

/// Interviews scheduled with a company, earliest first.
pub async fn scheduled_interviews(
    db: &DatabaseConnection,
    company: &company::Model,
) -> Result<Vec<interview::Model>, PlacementError> {
    Ok(company
        .find_related(interview::Entity)
        .order_by_asc(interview::Column::InterviewDate)
        .order_by_asc(interview::Column::InterviewTime)
        .all(db)
        .await?)
}

/// Delete a company together with its interviews.
pub async fn delete_company(db: &DatabaseConnection, id: i32) -> Result<(), PlacementError> {
    let result = company::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(PlacementError::not_found("Company", id));
    }
    tracing::info!(company_id = id, "company deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::reference::ensure_user;
    use crate::storage::test_support::TestDb;

    fn input(name: &str) -> CompanyInput {
        CompanyInput {
            date: NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date"),
            portal: Portal::Linkedin,
            other_portal: None,
            company_name: name.to_string(),
            spoc: "Priya".to_string(),
            mobile: "9876543210".to_string(),
            email: "hr@example.com".to_string(),
            location: Location::Chennai,
            other_location: None,
            progress: Progress::ResumeShared,
        }
    }

    #[test]
    fn test_first_code() {
        assert_eq!(next_company_code(None).expect("code"), "COMP0001");
    }

    #[test]
    fn test_code_increments_and_pads() {
        assert_eq!(next_company_code(Some("COMP0001")).expect("code"), "COMP0002");
        assert_eq!(next_company_code(Some("COMP0099")).expect("code"), "COMP0100");
        assert_eq!(next_company_code(Some("COMP9999")).expect("code"), "COMP10000");
    }

    #[test]
    fn test_malformed_code_is_an_error() {
        assert!(next_company_code(Some("ACME-7")).is_err());
        assert!(next_company_code(Some("COMP")).is_err());
        assert!(next_company_code(Some("COMPx12")).is_err());
    }

    #[tokio::test]
    async fn test_successive_companies_get_increasing_codes() {
        let test_db = TestDb::new().await;
        let db = test_db.connection();

        let mut codes = Vec::new();
        for name in ["Zoho", "Freshworks", "Infosys", "TCS"] {
            let company = create_company(db, input(name), None)
                .await
                .expect("Failed to create company");
            codes.push(company.company_code);
        }

        assert_eq!(codes, vec!["COMP0001", "COMP0002", "COMP0003", "COMP0004"]);
    }

    #[tokio::test]
    async fn test_code_follows_last_row_after_delete() {
        let test_db = TestDb::new().await;
        let db = test_db.connection();

        let a = create_company(db, input("A"), None)
            .await
            .expect("Failed to create company");
        let b = create_company(db, input("B"), None)
            .await
            .expect("Failed to create company");
        delete_company(db, a.id).await.expect("Failed to delete");

        let c = create_company(db, input("C"), None)
            .await
            .expect("Failed to create company");
        assert_eq!(b.company_code, "COMP0002");
        assert_eq!(c.company_code, "COMP0003");
    }

    #[tokio::test]
    async fn test_update_keeps_code_and_creator() {
        let test_db = TestDb::new().await;
        let db = test_db.connection();
        let admin = ensure_user(db, "admin").await.expect("Failed to ensure user");

        let created = create_company(db, input("Zoho"), Some(admin.id))
            .await
            .expect("Failed to create company");

        let mut changed = input("Zoho Corp");
        changed.progress = Progress::InterviewScheduling;
        let updated = update_company(db, created.id, changed)
            .await
            .expect("Failed to update company");

        assert_eq!(updated.company_code, created.company_code);
        assert_eq!(updated.created_by, Some(admin.id));
        assert_eq!(updated.company_name, "Zoho Corp");
        assert_eq!(updated.progress, Progress::InterviewScheduling);
        assert_eq!(updated.to_string(), "Zoho Corp (COMP0001)");
    }

    #[tokio::test]
    async fn test_filter_companies() {
        let test_db = TestDb::new().await;
        let db = test_db.connection();

        create_company(db, input("Zoho"), None).await.expect("create");
        let mut f = input("Freshworks");
        f.location = Location::Bangalore;
        f.progress = Progress::InterviewCompleted;
        create_company(db, f, None).await.expect("create");
        let mut g = input("Glassdoor Lead");
        g.portal = Portal::Glassdoor;
        g.location = Location::Bangalore;
        create_company(db, g, None).await.expect("create");

        let filter = CompanyFilter {
            location: Some("bangalore".into()),
            ..Default::default()
        };
        let page = list_companies(db, &filter, None).await.expect("list");
        assert_eq!(page.total, 2);

        let filter = CompanyFilter {
            location: Some("bangalore".into()),
            progress: Some("interview_completed".into()),
            ..Default::default()
        };
        let page = list_companies(db, &filter, None).await.expect("list");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].company_name, "Freshworks");

        let filter = CompanyFilter {
            q: Some("comp0001".into()),
            ..Default::default()
        };
        let page = list_companies(db, &filter, None).await.expect("list");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].company_name, "Zoho");
    }

    #[tokio::test]
    async fn test_deleting_creator_keeps_company() {
        use crate::entities::user;

        let test_db = TestDb::new().await;
        let db = test_db.connection();
        let admin = ensure_user(db, "temp-admin").await.expect("ensure user");
        let company = create_company(db, input("Zoho"), Some(admin.id))
            .await
            .expect("create");

        user::Entity::delete_by_id(admin.id)
            .exec(db)
            .await
            .expect("Failed to delete user");

        let reloaded = get_company(db, company.id)
            .await
            .expect("Query failed")
            .expect("Company should survive");
        assert_eq!(reloaded.created_by, None);
    }

    #[tokio::test]
    async fn test_delete_missing_company() {
        let test_db = TestDb::new().await;
        let db = test_db.connection();

        assert!(matches!(
            delete_company(db, 7).await,
            Err(PlacementError::NotFound { entity: "Company", id: 7 })
        ));
    }
}
