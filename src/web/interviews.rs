use super::render::{
    self, error_summary, field, html_escape, multi_select, owned, select, text_input,
};
use super::{invalid_page, ok_page, redirect_with, AppState};
use crate::entities::choices::{Choice, Location, RoundType, Venue};
use crate::entities::{company, course, interview};
use crate::errors::PlacementError;
use crate::flash::Flash;
use crate::forms::{FieldErrors, FormData, InterviewForm};
use crate::pagination::query_without_page;
use crate::storage::{self, companies, interviews as store, outcomes, InterviewFilter};
use axum::extract::{Form, Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;

/// Everything the interview form offers as choices.
struct FormChoices {
    companies: Vec<company::Model>,
    courses: Vec<course::Model>,
    parents: Vec<(interview::Model, String)>,
}

impl FormChoices {
    async fn load(
        state: &AppState,
        company_id: Option<i32>,
        editing: Option<i32>,
    ) -> Result<Self, PlacementError> {
        Ok(Self {
            companies: companies::all_companies(&state.db).await?,
            courses: storage::reference::list_courses(&state.db).await?,
            parents: store::parent_candidates(&state.db, company_id, editing).await?,
        })
    }
}

fn company_options(companies: &[company::Model]) -> Vec<(String, String)> {
    companies
        .iter()
        .map(|c| (c.id.to_string(), c.to_string()))
        .collect()
}

fn form_body(
    form: &InterviewForm,
    errors: &FieldErrors,
    choices: &FormChoices,
    action: &str,
    cancel: &str,
) -> String {
    let course_options: Vec<(String, String)> = choices
        .courses
        .iter()
        .map(|c| (c.id.to_string(), c.name.clone()))
        .collect();
    let parent_options: Vec<(String, String)> = choices
        .parents
        .iter()
        .map(|(i, company_name)| {
            (
                i.id.to_string(),
                format!(
                    "{} - {} #{} at {} ({})",
                    i.applying_role,
                    i.interview_round.label(),
                    i.round_number,
                    company_name,
                    i.interview_date
                ),
            )
        })
        .collect();

    let rows = [
        field(
            "Company",
            "company",
            &select(
                "company",
                &company_options(&choices.companies),
                &form.company,
                Some("---------"),
            ),
            errors,
        ),
        field(
            "Applying role",
            "applying_role",
            &text_input("applying_role", &form.applying_role, "text"),
            errors,
        ),
        field(
            "Courses",
            "courses",
            &multi_select("courses", &course_options, &form.courses),
            errors,
        ),
        field(
            "Venue",
            "venue",
            &select("venue", &owned(Venue::options()), &form.venue, None),
            errors,
        ),
        field(
            "Interview round",
            "interview_round",
            &select(
                "interview_round",
                &owned(RoundType::options()),
                &form.interview_round,
                Some("---------"),
            ),
            errors,
        ),
        field(
            "Round number",
            "round_number",
            &text_input("round_number", &form.round_number, "number"),
            errors,
        ),
        field(
            "Parent interview",
            "parent_interview",
            &select(
                "parent_interview",
                &parent_options,
                &form.parent_interview,
                Some("None (first round)"),
            ),
            errors,
        ),
        field(
            "Location",
            "location",
            &select(
                "location",
                &owned(Location::options()),
                &form.location,
                Some("---------"),
            ),
            errors,
        ),
        field(
            "Other location",
            "other_location",
            &text_input("other_location", &form.other_location, "text"),
            errors,
        ),
        field(
            "Interview date",
            "interview_date",
            &text_input("interview_date", &form.interview_date, "date"),
            errors,
        ),
        field(
            "Interview time",
            "interview_time",
            &text_input("interview_time", &form.interview_time, "time"),
            errors,
        ),
    ]
    .join("\n");

    format!(
        r#"{summary}<form method="POST" action="{action}">
{rows}
<p><button type="submit">Save</button> <a href="{cancel}">Cancel</a></p>
</form>"#,
        summary = error_summary(errors),
        action = html_escape(action),
        cancel = html_escape(cancel),
    )
}

pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, PlacementError> {
    let filter = InterviewFilter::from_pairs(&pairs);
    let page_param = storage::query_value(&pairs, "page");
    let page = store::list_interviews(&state.db, &filter, page_param.as_deref()).await?;
    let all_companies = companies::all_companies(&state.db).await?;

    let value = |v: &Option<String>| v.clone().unwrap_or_default();
    let filters = format!(
        r#"<form method="GET" action="/interviews" class="filters">
    <label>Company {company}</label>
    <label>Round {round}</label>
    <label>Venue {venue}</label>
    <label>Date {date}</label>
    <button type="submit">Filter</button>
    <a href="/interviews">Reset</a>
</form>"#,
        company = select(
            "company",
            &company_options(&all_companies),
            &value(&filter.company),
            Some("Any")
        ),
        round = select(
            "round",
            &owned(RoundType::options()),
            &value(&filter.round),
            Some("Any")
        ),
        venue = select(
            "venue",
            &owned(Venue::options()),
            &value(&filter.venue),
            Some("Any")
        ),
        date = text_input("date", &value(&filter.date), "date"),
    );

    let rows: String = page
        .items
        .iter()
        .map(|row| {
            let i = &row.interview;
            let courses = row
                .courses
                .iter()
                .map(|c| html_escape(&c.name))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                r#"<tr><td>{date} {time}</td><td><a href="/companies/{company_id}">{company}</a></td>
<td><a href="/interviews/{id}">{role}</a></td><td>{round} #{number}</td><td>{venue}</td><td>{courses}</td></tr>"#,
                id = i.id,
                date = i.interview_date,
                time = i.interview_time.format("%H:%M"),
                company_id = row.company.id,
                company = html_escape(&row.company.company_name),
                role = html_escape(&i.applying_role),
                round = i.interview_round.label(),
                number = i.round_number,
                venue = i.venue.label(),
            )
        })
        .collect();

    let table = if page.items.is_empty() {
        r#"<p class="muted">No interviews match these filters.</p>"#.to_string()
    } else {
        format!(
            r#"<table>
<tr><th>When</th><th>Company</th><th>Role</th><th>Round</th><th>Venue</th><th>Courses</th></tr>
{rows}
</table>"#
        )
    };

    let body = format!(
        r#"<p><a href="/interviews/new">Schedule interview</a></p>
{filters}
{table}
{nav}"#,
        nav = render::pagination_nav(&page, &query_without_page(&pairs)),
    );
    Ok(ok_page(&headers, "Interviews", &body))
}

fn outcome_row(row: &outcomes::OutcomeRow) -> String {
    let o = &row.outcome;
    let letter = o
        .offer_letter
        .as_deref()
        .map(|path| {
            format!(
                r#"<a href="/media/{}">Offer letter</a>"#,
                html_escape(path)
            )
        })
        .unwrap_or_default();
    format!(
        r#"<tr><td>{student}</td><td>{status}</td><td>{reason}</td><td>{letter}</td>
<td><a href="/interview-students/{id}/edit">Update</a>
<form method="POST" action="/interview-students/{id}/delete" style="display:inline"><button type="submit" class="danger">Remove</button></form></td></tr>"#,
        id = o.id,
        student = html_escape(&row.student.name),
        status = o.status.label(),
        reason = html_escape(o.reason.as_deref().unwrap_or_default()),
    )
}

pub async fn detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Response, PlacementError> {
    let row = store::get_interview(&state.db, id)
        .await?
        .ok_or_else(|| PlacementError::not_found("Interview", id))?;
    let rounds = store::sub_rounds(&state.db, id).await?;
    let results = outcomes::outcomes_for_interview(&state.db, id).await?;
    let students = storage::reference::list_students(&state.db).await?;

    let i = &row.interview;
    let parent = match i.parent_interview_id {
        Some(parent_id) => format!(r#"<a href="/interviews/{parent_id}">Previous round</a>"#),
        None => "First round".to_string(),
    };
    let courses = row
        .courses
        .iter()
        .map(|c| html_escape(&c.name))
        .collect::<Vec<_>>()
        .join(", ");
    let location = match (&i.location, &i.other_location) {
        (Location::Others, Some(other)) if !other.is_empty() => html_escape(other),
        (location, _) => location.label().to_string(),
    };

    let round_items: String = rounds
        .iter()
        .map(|r| {
            format!(
                r#"<li><a href="/interviews/{}">{} #{} on {}</a></li>"#,
                r.id,
                r.interview_round.label(),
                r.round_number,
                r.interview_date
            )
        })
        .collect();
    let rounds_html = if rounds.is_empty() {
        r#"<p class="muted">No further rounds.</p>"#.to_string()
    } else {
        format!("<ul>{round_items}</ul>")
    };

    let outcome_rows: String = results.iter().map(outcome_row).collect();
    let outcomes_html = if results.is_empty() {
        r#"<p class="muted">No students added yet.</p>"#.to_string()
    } else {
        format!(
            "<table><tr><th>Student</th><th>Status</th><th>Reason</th><th>Offer letter</th><th></th></tr>{outcome_rows}</table>"
        )
    };

    let attached: Vec<i32> = results.iter().map(|r| r.student.id).collect();
    let student_options: Vec<(String, String)> = students
        .iter()
        .filter(|s| !attached.contains(&s.id))
        .map(|s| (s.id.to_string(), s.name.clone()))
        .collect();
    let add_form = if student_options.is_empty() {
        r#"<p class="muted">Every student is already part of this interview. <a href="/students">Add students</a></p>"#.to_string()
    } else {
        format!(
            r#"<form method="POST" action="/interviews/{id}/students">
    {select} <button type="submit">Add student</button>
</form>"#,
            select = select("student", &student_options, "", Some("---------")),
        )
    };

    let body = format!(
        r#"<table>
<tr><th>Company</th><td><a href="/companies/{company_id}">{company}</a></td></tr>
<tr><th>Round</th><td>{round} #{number}</td></tr>
<tr><th>Parent</th><td>{parent}</td></tr>
<tr><th>Venue</th><td>{venue}</td></tr>
<tr><th>Location</th><td>{location}</td></tr>
<tr><th>When</th><td>{date} {time}</td></tr>
<tr><th>Courses</th><td>{courses}</td></tr>
</table>
<p><a href="/interviews/{id}/edit">Edit</a> <a href="/interviews/{id}/delete">Delete</a></p>
<h2>Sub-rounds</h2>
<p><a href="/interviews/new?parent={id}">Add sub-round</a></p>
{rounds_html}
<h2>Students</h2>
{outcomes_html}
{add_form}"#,
        company_id = row.company.id,
        company = html_escape(&row.company.to_string()),
        round = i.interview_round.label(),
        number = i.round_number,
        venue = i.venue.label(),
        date = i.interview_date,
        time = i.interview_time.format("%H:%M"),
    );

    Ok(ok_page(&headers, &row.to_string(), &body))
}

pub async fn new_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, PlacementError> {
    let company_id = storage::query_value(&pairs, "company").and_then(|c| c.parse().ok());
    let parent = match storage::query_value(&pairs, "parent").and_then(|p| p.parse().ok()) {
        Some(parent_id) => store::get_interview(&state.db, parent_id)
            .await?
            .map(|row| row.interview),
        None => None,
    };

    let form = InterviewForm::initial(company_id, parent.as_ref());
    let choices = FormChoices::load(&state, form.company_id(), None).await?;
    let body = form_body(
        &form,
        &FieldErrors::default(),
        &choices,
        "/interviews/new",
        "/interviews",
    );
    Ok(ok_page(&headers, "Schedule interview", &body))
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PlacementError> {
    let form = InterviewForm::from_data(&FormData::new(pairs));
    let choices = FormChoices::load(&state, form.company_id(), None).await?;

    let errors = match form.validate(&choices.courses) {
        Ok(input) => match store::create_interview(&state.db, input, state.operator).await {
            Ok(interview) => {
                return Ok(redirect_with(
                    &format!("/interviews/{}", interview.id),
                    Flash::success("Interview scheduled successfully!"),
                ));
            }
            Err(e) => FieldErrors::from_storage(e)?,
        },
        Err(errors) => errors,
    };

    let body = form_body(&form, &errors, &choices, "/interviews/new", "/interviews");
    Ok(invalid_page(&headers, "Schedule interview", &body))
}

pub async fn edit_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Response, PlacementError> {
    let row = store::get_interview(&state.db, id)
        .await?
        .ok_or_else(|| PlacementError::not_found("Interview", id))?;
    let form = InterviewForm::from_model(&row.interview, &row.courses);
    let choices = FormChoices::load(&state, Some(row.interview.company_id), Some(id)).await?;

    let body = form_body(
        &form,
        &FieldErrors::default(),
        &choices,
        &format!("/interviews/{id}/edit"),
        &format!("/interviews/{id}"),
    );
    Ok(ok_page(&headers, "Edit interview", &body))
}

pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PlacementError> {
    if store::get_interview(&state.db, id).await?.is_none() {
        return Err(PlacementError::not_found("Interview", id));
    }
    let form = InterviewForm::from_data(&FormData::new(pairs));
    let choices = FormChoices::load(&state, form.company_id(), Some(id)).await?;

    let errors = match form.validate(&choices.courses) {
        Ok(input) => match store::update_interview(&state.db, id, input).await {
            Ok(_) => {
                return Ok(redirect_with(
                    &format!("/interviews/{id}"),
                    Flash::success("Interview updated successfully!"),
                ));
            }
            Err(e) => FieldErrors::from_storage(e)?,
        },
        Err(errors) => errors,
    };

    let body = form_body(
        &form,
        &errors,
        &choices,
        &format!("/interviews/{id}/edit"),
        &format!("/interviews/{id}"),
    );
    Ok(invalid_page(&headers, "Edit interview", &body))
}

pub async fn delete_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Response, PlacementError> {
    let row = store::get_interview(&state.db, id)
        .await?
        .ok_or_else(|| PlacementError::not_found("Interview", id))?;
    let body = render::confirm_delete(
        &format!("the {row} with its sub-rounds and student results"),
        &format!("/interviews/{id}/delete"),
        &format!("/interviews/{id}"),
    );
    Ok(ok_page(&headers, "Delete interview", &body))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PlacementError> {
    let row = store::get_interview(&state.db, id)
        .await?
        .ok_or_else(|| PlacementError::not_found("Interview", id))?;
    store::delete_interview(&state.db, id).await?;
    Ok(redirect_with(
        &format!("/companies/{}", row.company.id),
        Flash::success("Interview deleted successfully!"),
    ))
}

