use super::{non_blank, query_value};
use crate::entities::choices::{Location, RoundType, Venue};
use crate::entities::{company, course, interview, interview_course};
use crate::errors::PlacementError;
use crate::pagination::{self, Page};
use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, LoaderTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

#[derive(Debug, Clone, Default)]
pub struct InterviewFilter {
    pub company: Option<String>,
    pub round: Option<String>,
    pub venue: Option<String>,
    pub date: Option<String>,
}

impl InterviewFilter {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            company: query_value(pairs, "company"),
            round: query_value(pairs, "round"),
            venue: query_value(pairs, "venue"),
            date: query_value(pairs, "date"),
        }
    }

    /// Unparseable company ids and dates are ignored like blank values.
    pub fn condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(company) = non_blank(&self.company).and_then(|c| c.trim().parse::<i32>().ok())
        {
            cond = cond.add(interview::Column::CompanyId.eq(company));
        }
        if let Some(round) = non_blank(&self.round) {
            cond = cond.add(interview::Column::InterviewRound.eq(round));
        }
        if let Some(venue) = non_blank(&self.venue) {
            cond = cond.add(interview::Column::Venue.eq(venue));
        }
        if let Some(date) = non_blank(&self.date)
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
        {
            cond = cond.add(interview::Column::InterviewDate.eq(date));
        }
        cond
    }
}

/// Validated interview fields, as produced by the interview form.
#[derive(Debug, Clone)]
pub struct InterviewInput {
    pub venue: Venue,
    pub company_id: i32,
    pub applying_role: String,
    pub courses: Vec<i32>,
    pub interview_round: RoundType,
    pub round_number: i32,
    pub parent_interview_id: Option<i32>,
    pub location: Location,
    pub other_location: Option<String>,
    pub interview_date: NaiveDate,
    pub interview_time: NaiveTime,
}

/// An interview with the company and courses its pages show.
#[derive(Debug, Clone)]
pub struct InterviewRow {
    pub interview: interview::Model,
    pub company: company::Model,
    pub courses: Vec<course::Model>,
}

impl std::fmt::Display for InterviewRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Interview for {} at {} on {}",
            self.interview.applying_role, self.company.company_name, self.interview.interview_date
        )
    }
}

/// Company and parent consistency that the form cannot see on its own.
async fn check_links<C: ConnectionTrait>(
    conn: &C,
    id: Option<i32>,
    input: &InterviewInput,
) -> Result<(), PlacementError> {
    if company::Entity::find_by_id(input.company_id)
        .one(conn)
        .await?
        .is_none()
    {
        return Err(PlacementError::Validation {
            field: "company",
            message: "Select a valid company.".to_string(),
        });
    }

    // Sub-rounds share their parent's company, so a parent with sub-rounds keeps its company.
    if let Some(id) = id {
        let moved = interview::Entity::find_by_id(id)
            .one(conn)
            .await?
            .is_some_and(|current| current.company_id != input.company_id);
        let has_sub_rounds = interview::Entity::find()
            .filter(interview::Column::ParentInterviewId.eq(id))
            .one(conn)
            .await?
            .is_some();
        if moved && has_sub_rounds {
            return Err(PlacementError::Validation {
                field: "company",
                message: "Move or delete this interview's sub-rounds before changing its company."
                    .to_string(),
            });
        }
    }

    let Some(parent_id) = input.parent_interview_id else {
        return Ok(());
    };
    if Some(parent_id) == id {
        return Err(PlacementError::Validation {
            field: "parent_interview",
            message: "An interview cannot be its own parent round.".to_string(),
        });
    }

    let parent = interview::Entity::find_by_id(parent_id)
        .one(conn)
        .await?
        .ok_or_else(|| PlacementError::Validation {
            field: "parent_interview",
            message: "Select a valid parent interview.".to_string(),
        })?;
    if parent.company_id != input.company_id {
        return Err(PlacementError::Validation {
            field: "parent_interview",
            message: "The parent interview belongs to a different company.".to_string(),
        });
    }

    // Walk up from the new parent; meeting `id` means the edit would close a loop.
    if let Some(id) = id {
        let mut cursor = parent.parent_interview_id;
        while let Some(ancestor_id) = cursor {
            if ancestor_id == id {
                return Err(PlacementError::Validation {
                    field: "parent_interview",
                    message: "A sub-round cannot become the parent of its own parent round."
                        .to_string(),
                });
            }
            cursor = interview::Entity::find_by_id(ancestor_id)
                .one(conn)
                .await?
                .and_then(|i| i.parent_interview_id);
        }
    }

    Ok(())
}

async fn replace_courses<C: ConnectionTrait>(
    conn: &C,
    interview_id: i32,
    course_ids: &[i32],
) -> Result<(), PlacementError> {
    interview_course::Entity::delete_many()
        .filter(interview_course::Column::InterviewId.eq(interview_id))
        .exec(conn)
        .await?;

    let mut ids = course_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(());
    }

    interview_course::Entity::insert_many(ids.into_iter().map(|course_id| {
        interview_course::ActiveModel {
            interview_id: Set(interview_id),
            course_id: Set(course_id),
        }
    }))
    .exec(conn)
    .await?;
    Ok(())
}

pub async fn create_interview(
    db: &DatabaseConnection,
    input: InterviewInput,
    created_by: Option<i32>,
) -> Result<interview::Model, PlacementError> {
    let txn = db.begin().await?;
    check_links(&txn, None, &input).await?;

    let model = interview::ActiveModel {
        venue: Set(input.venue),
        company_id: Set(input.company_id),
        applying_role: Set(input.applying_role),
        interview_round: Set(input.interview_round),
        round_number: Set(input.round_number),
        parent_interview_id: Set(input.parent_interview_id),
        location: Set(input.location),
        other_location: Set(input.other_location),
        interview_date: Set(input.interview_date),
        interview_time: Set(input.interview_time),
        created_by: Set(created_by),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    replace_courses(&txn, model.id, &input.courses).await?;
    txn.commit().await?;

    tracing::info!(
        interview_id = model.id,
        company_id = model.company_id,
        round = ?model.interview_round,
        "interview scheduled"
    );
    Ok(model)
}

pub async fn update_interview(
    db: &DatabaseConnection,
    id: i32,
    input: InterviewInput,
) -> Result<interview::Model, PlacementError> {
    let existing = interview::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| PlacementError::not_found("Interview", id))?;

    let txn = db.begin().await?;
    check_links(&txn, Some(id), &input).await?;

    let mut active = existing.into_active_model();
    active.venue = Set(input.venue);
    active.company_id = Set(input.company_id);
    active.applying_role = Set(input.applying_role);
    active.interview_round = Set(input.interview_round);
    active.round_number = Set(input.round_number);
    active.parent_interview_id = Set(input.parent_interview_id);
    active.location = Set(input.location);
    active.other_location = Set(input.other_location);
    active.interview_date = Set(input.interview_date);
    active.interview_time = Set(input.interview_time);
    let model = active.update(&txn).await?;

    replace_courses(&txn, id, &input.courses).await?;
    txn.commit().await?;

    Ok(model)
}

/// Attach companies and courses to a batch of interviews, keeping order.
async fn with_links(
    db: &DatabaseConnection,
    interviews: Vec<interview::Model>,
) -> Result<Vec<InterviewRow>, PlacementError> {
    let companies = interviews.load_one(company::Entity, db).await?;
    let courses = interviews
        .load_many_to_many(course::Entity, interview_course::Entity, db)
        .await?;

    interviews
        .into_iter()
        .zip(companies)
        .zip(courses)
        .map(|((interview, company), mut courses)| {
            let company = company.ok_or_else(|| {
                PlacementError::Other(format!("interview {} has no company", interview.id))
            })?;
            courses.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(InterviewRow {
                interview,
                company,
                courses,
            })
        })
        .collect()
}

pub async fn get_interview(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<InterviewRow>, PlacementError> {
    let Some(interview) = interview::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    Ok(with_links(db, vec![interview]).await?.pop())
}

/// Newest interview date first, then latest time.
pub async fn list_interviews(
    db: &DatabaseConnection,
    filter: &InterviewFilter,
    raw_page: Option<&str>,
) -> Result<Page<InterviewRow>, PlacementError> {
    let select = interview::Entity::find()
        .filter(filter.condition())
        .order_by_desc(interview::Column::InterviewDate)
        .order_by_desc(interview::Column::InterviewTime)
        .order_by_desc(interview::Column::Id);
    let page = pagination::fetch_page(db, select, raw_page).await?;

    let rows = with_links(db, page.items).await?;
    Ok(Page {
        items: rows,
        number: page.number,
        num_pages: page.num_pages,
        total: page.total,
    })
}

/// Direct sub-rounds of an interview, in round order.
pub async fn sub_rounds(
    db: &DatabaseConnection,
    parent_id: i32,
) -> Result<Vec<interview::Model>, PlacementError> {
    Ok(interview::Entity::find()
        .filter(interview::Column::ParentInterviewId.eq(parent_id))
        .order_by_asc(interview::Column::RoundNumber)
        .order_by_asc(interview::Column::InterviewDate)
        .all(db)
        .await?)
}

/// Interviews that may serve as parent round, each with its company name.
/// Narrowed to one company when it is known.
pub async fn parent_candidates(
    db: &DatabaseConnection,
    company_id: Option<i32>,
    exclude: Option<i32>,
) -> Result<Vec<(interview::Model, String)>, PlacementError> {
    let mut select = interview::Entity::find()
        .order_by_asc(interview::Column::InterviewDate)
        .order_by_asc(interview::Column::InterviewTime);
    if let Some(company_id) = company_id {
        select = select.filter(interview::Column::CompanyId.eq(company_id));
    }
    if let Some(id) = exclude {
        select = select.filter(interview::Column::Id.ne(id));
    }

    let rows = select.find_also_related(company::Entity).all(db).await?;
    Ok(rows
        .into_iter()
        .map(|(interview, company)| {
            let name = company.map(|c| c.company_name).unwrap_or_default();
            (interview, name)
        })
        .collect())
}

/// Delete an interview. Sub-rounds, course links and student outcomes go with it.
pub async fn delete_interview(db: &DatabaseConnection, id: i32) -> Result<(), PlacementError> {
    let result = interview::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(PlacementError::not_found("Interview", id));
    }
    tracing::info!(interview_id = id, "interview deleted");
    Ok(())
}
