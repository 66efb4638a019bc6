use super::render::{
    self, error_summary, field, html_escape, multi_select, owned, select, text_input, textarea,
};
use super::{invalid_page, ok_page, redirect_with, AppState};
use crate::entities::choices::{Availability, Choice, EmploymentType, Mode, TrainerLocation};
use crate::entities::course;
use crate::errors::PlacementError;
use crate::flash::Flash;
use crate::forms::{FieldErrors, FormData, TrainerForm};
use crate::pagination::query_without_page;
use crate::storage::{self, trainers as store, TrainerFilter};
use axum::extract::{Form, Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};

fn course_options(courses: &[course::Model]) -> Vec<(String, String)> {
    courses
        .iter()
        .map(|c| (c.id.to_string(), c.name.clone()))
        .collect()
}

fn filter_form(filter: &TrainerFilter, courses: &[course::Model]) -> String {
    let value = |v: &Option<String>| v.clone().unwrap_or_default();
    format!(
        r#"<form method="GET" action="/trainers" class="filters">
    <label>Search {q}</label>
    <label>Stack {stack}</label>
    <label>Location {location}</label>
    <label>Min. experience {experience}</label>
    <label>Availability {availability}</label>
    <label>Mode {mode}</label>
    <label>Employment {employment}</label>
    <button type="submit">Filter</button>
    <a href="/trainers">Reset</a>
</form>"#,
        q = text_input("q", &value(&filter.q), "text"),
        stack = select("stack", &course_options(courses), &value(&filter.stack), Some("Any")),
        location = select(
            "location",
            &owned(TrainerLocation::options()),
            &value(&filter.location),
            Some("Any")
        ),
        experience = text_input("experience", &value(&filter.experience), "number"),
        availability = select(
            "availability",
            &owned(Availability::options()),
            &value(&filter.availability),
            Some("Any")
        ),
        mode = select("mode", &owned(Mode::options()), &value(&filter.mode), Some("Any")),
        employment = select(
            "employment",
            &owned(EmploymentType::options()),
            &value(&filter.employment),
            Some("Any")
        ),
    )
}

pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, PlacementError> {
    let filter = TrainerFilter::from_pairs(&pairs);
    let page_param = storage::query_value(&pairs, "page");
    let page = store::list_trainers(&state.db, &filter, page_param.as_deref()).await?;
    let courses = storage::reference::list_courses(&state.db).await?;

    let rows: String = page
        .items
        .iter()
        .map(|row| {
            let t = &row.trainer;
            let stack = row
                .stack
                .iter()
                .map(|c| html_escape(&c.name))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                r#"<tr>
    <td>{name}</td><td>{email}</td><td>{phone}</td><td>{stack}</td><td>{location}</td>
    <td>{years}</td><td>{availability}</td><td>{mode}</td><td>{employment}</td><td>{slots}</td>
    <td><a href="/trainers/{id}/edit">Edit</a> <a href="/trainers/{id}/delete">Delete</a></td>
</tr>"#,
                id = t.id,
                name = html_escape(&t.name),
                email = html_escape(&t.email),
                phone = html_escape(&t.phone_number),
                location = t.location.label(),
                years = t.years_of_experience,
                availability = t.availability.label(),
                mode = t.mode.label(),
                employment = t.employment_type.label(),
                slots = html_escape(&t.slots().join(", ")),
            )
        })
        .collect();

    let table = if page.items.is_empty() {
        r#"<p class="muted">No trainers match these filters.</p>"#.to_string()
    } else {
        format!(
            r#"<table>
<tr><th>Name</th><th>Email</th><th>Phone</th><th>Stack</th><th>Location</th><th>Experience</th>
<th>Availability</th><th>Mode</th><th>Employment</th><th>Timing slots</th><th></th></tr>
{rows}
</table>"#
        )
    };

    let body = format!(
        r#"<p><a href="/trainers/new">Add trainer</a></p>
{filters}
{table}
{nav}
<form method="POST" action="/trainers/delete-all">
    <p><button type="submit" class="danger">Delete all trainers</button></p>
</form>"#,
        filters = filter_form(&filter, &courses),
        nav = render::pagination_nav(&page, &query_without_page(&pairs)),
    );

    Ok(ok_page(&headers, "Trainers", &body))
}

fn form_body(
    form: &TrainerForm,
    errors: &FieldErrors,
    courses: &[course::Model],
    action: &str,
) -> String {
    let rows = [
        field("Name", "name", &text_input("name", &form.name, "text"), errors),
        field("Email", "email", &text_input("email", &form.email, "email"), errors),
        field(
            "Phone number",
            "phone_number",
            &text_input("phone_number", &form.phone_number, "text"),
            errors,
        ),
        field(
            "Stack",
            "stack",
            &multi_select("stack", &course_options(courses), &form.stack),
            errors,
        ),
        field(
            "Location",
            "location",
            &select(
                "location",
                &owned(TrainerLocation::options()),
                &form.location,
                Some("---------"),
            ),
            errors,
        ),
        field(
            "Years of experience",
            "years_of_experience",
            &text_input("years_of_experience", &form.years_of_experience, "number"),
            errors,
        ),
        field(
            "Availability",
            "availability",
            &select(
                "availability",
                &owned(Availability::options()),
                &form.availability,
                Some("---------"),
            ),
            errors,
        ),
        field(
            "Mode",
            "mode",
            &select("mode", &owned(Mode::options()), &form.mode, Some("---------")),
            errors,
        ),
        field(
            "Employment type",
            "employment_type",
            &select(
                "employment_type",
                &owned(EmploymentType::options()),
                &form.employment_type,
                Some("---------"),
            ),
            errors,
        ),
        field(
            "Timing slots (JSON list)",
            "timing_slots",
            &textarea("timing_slots", &form.timing_slots),
            errors,
        ),
    ]
    .join("\n");

    format!(
        r#"{summary}<form method="POST" action="{action}">
{rows}
<p><button type="submit">Save</button> <a href="/trainers">Cancel</a></p>
</form>"#,
        summary = error_summary(errors),
        action = html_escape(action),
    )
}

pub async fn new_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, PlacementError> {
    let courses = storage::reference::list_courses(&state.db).await?;
    let form = TrainerForm {
        years_of_experience: "0".to_string(),
        timing_slots: "[]".to_string(),
        ..Default::default()
    };
    let body = form_body(&form, &FieldErrors::default(), &courses, "/trainers/new");
    Ok(ok_page(&headers, "Add trainer", &body))
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PlacementError> {
    let form = TrainerForm::from_data(&FormData::new(pairs));
    let courses = storage::reference::list_courses(&state.db).await?;

    match form.validate(&courses) {
        Ok(input) => {
            let trainer = store::create_trainer(&state.db, input).await?;
            Ok(redirect_with(
                "/trainers",
                Flash::success(format!("Trainer {} added.", trainer.name)),
            ))
        }
        Err(errors) => {
            let body = form_body(&form, &errors, &courses, "/trainers/new");
            Ok(invalid_page(&headers, "Add trainer", &body))
        }
    }
}

pub async fn edit_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Response, PlacementError> {
    let row = store::get_trainer(&state.db, id)
        .await?
        .ok_or_else(|| PlacementError::not_found("Trainer", id))?;
    let courses = storage::reference::list_courses(&state.db).await?;

    let body = form_body(
        &TrainerForm::from_row(&row),
        &FieldErrors::default(),
        &courses,
        &format!("/trainers/{id}/edit"),
    );
    Ok(ok_page(&headers, &format!("Edit {}", row.trainer.name), &body))
}

pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PlacementError> {
    let row = store::get_trainer(&state.db, id)
        .await?
        .ok_or_else(|| PlacementError::not_found("Trainer", id))?;
    let form = TrainerForm::from_data(&FormData::new(pairs));
    let courses = storage::reference::list_courses(&state.db).await?;

    match form.validate(&courses) {
        Ok(input) => {
            store::update_trainer(&state.db, id, input).await?;
            Ok(redirect_with(
                "/trainers",
                Flash::success("Trainer updated successfully!"),
            ))
        }
        Err(errors) => {
            let body = form_body(&form, &errors, &courses, &format!("/trainers/{id}/edit"));
            Ok(invalid_page(
                &headers,
                &format!("Edit {}", row.trainer.name),
                &body,
            ))
        }
    }
}

pub async fn delete_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Response, PlacementError> {
    let row = store::get_trainer(&state.db, id)
        .await?
        .ok_or_else(|| PlacementError::not_found("Trainer", id))?;
    let body = render::confirm_delete(
        &format!("trainer {}", row.trainer.name),
        &format!("/trainers/{id}/delete"),
        "/trainers",
    );
    Ok(ok_page(&headers, "Delete trainer", &body))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PlacementError> {
    store::delete_trainer(&state.db, id).await?;
    Ok(redirect_with(
        "/trainers",
        Flash::success("Trainer deleted successfully!"),
    ))
}

pub async fn delete_all(State(state): State<AppState>) -> Response {
    let flash = match store::delete_all_trainers(&state.db).await {
        Ok(_) => Flash::success("All trainers have been successfully deleted."),
        Err(e) => {
            tracing::error!(error = %e, "bulk trainer delete failed");
            Flash::error(format!("An error occurred while deleting trainers: {e}"))
        }
    };
    redirect_with("/trainers", flash)
}

/// Bulk delete only happens on POST.
pub async fn delete_all_get() -> impl IntoResponse {
    Redirect::to("/trainers")
}
