use super::render::{self, error_summary, field, html_escape, owned, select, text_input};
use super::{invalid_page, ok_page, redirect_with, AppState};
use crate::entities::choices::{Choice, Location, Portal, Progress};
use crate::entities::company;
use crate::errors::PlacementError;
use crate::flash::Flash;
use crate::forms::{CompanyForm, FieldErrors, FormData};
use crate::pagination::query_without_page;
use crate::storage::{self, companies as store, CompanyFilter};
use axum::extract::{Form, Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use chrono::Local;

async fn load(state: &AppState, id: i32) -> Result<company::Model, PlacementError> {
    store::get_company(&state.db, id)
        .await?
        .ok_or_else(|| PlacementError::not_found("Company", id))
}

pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, PlacementError> {
    let filter = CompanyFilter::from_pairs(&pairs);
    let page_param = storage::query_value(&pairs, "page");
    let page = store::list_companies(&state.db, &filter, page_param.as_deref()).await?;

    let value = |v: &Option<String>| v.clone().unwrap_or_default();
    let filters = format!(
        r#"<form method="GET" action="/companies" class="filters">
    <label>Search {q}</label>
    <label>Progress {progress}</label>
    <label>Location {location}</label>
    <label>Portal {portal}</label>
    <button type="submit">Filter</button>
    <a href="/companies">Reset</a>
</form>"#,
        q = text_input("q", &value(&filter.q), "text"),
        progress = select(
            "progress",
            &owned(Progress::options()),
            &value(&filter.progress),
            Some("Any")
        ),
        location = select(
            "location",
            &owned(Location::options()),
            &value(&filter.location),
            Some("Any")
        ),
        portal = select(
            "portal",
            &owned(Portal::options()),
            &value(&filter.portal),
            Some("Any")
        ),
    );

    let rows: String = page
        .items
        .iter()
        .map(|c| {
            format!(
                r#"<tr><td><a href="/companies/{id}">{code}</a></td><td>{name}</td><td>{date}</td>
<td>{portal}</td><td>{spoc}</td><td>{mobile}</td><td>{email}</td><td>{location}</td><td>{progress}</td></tr>"#,
                id = c.id,
                code = html_escape(&c.company_code),
                name = html_escape(&c.company_name),
                date = c.date,
                portal = html_escape(&c.portal_display()),
                spoc = html_escape(&c.spoc),
                mobile = html_escape(&c.mobile),
                email = html_escape(&c.email),
                location = html_escape(&c.location_display()),
                progress = c.progress.label(),
            )
        })
        .collect();

    let table = if page.items.is_empty() {
        r#"<p class="muted">No companies match these filters.</p>"#.to_string()
    } else {
        format!(
            r#"<table>
<tr><th>Code</th><th>Company</th><th>Date</th><th>Portal</th><th>SPOC</th><th>Mobile</th>
<th>Email</th><th>Location</th><th>Progress</th></tr>
{rows}
</table>"#
        )
    };

    let body = format!(
        r#"<p><a href="/companies/new">Add company</a></p>
{filters}
{table}
{nav}"#,
        nav = render::pagination_nav(&page, &query_without_page(&pairs)),
    );
    Ok(ok_page(&headers, "Companies", &body))
}

pub async fn detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Response, PlacementError> {
    let company = load(&state, id).await?;
    let interviews = store::scheduled_interviews(&state.db, &company).await?;

    let interview_rows: String = interviews
        .iter()
        .map(|i| {
            format!(
                r#"<tr><td><a href="/interviews/{id}">{role}</a></td><td>{round} #{number}</td>
<td>{date} {time}</td><td>{venue}</td></tr>"#,
                id = i.id,
                role = html_escape(&i.applying_role),
                round = i.interview_round.label(),
                number = i.round_number,
                date = i.interview_date,
                time = i.interview_time.format("%H:%M"),
                venue = i.venue.label(),
            )
        })
        .collect();
    let interviews_html = if interviews.is_empty() {
        r#"<p class="muted">No interviews scheduled yet.</p>"#.to_string()
    } else {
        format!(
            "<table><tr><th>Role</th><th>Round</th><th>When</th><th>Venue</th></tr>{interview_rows}</table>"
        )
    };

    let body = format!(
        r#"<table>
<tr><th>Code</th><td>{code}</td></tr>
<tr><th>Date</th><td>{date}</td></tr>
<tr><th>Portal</th><td>{portal}</td></tr>
<tr><th>SPOC</th><td>{spoc}</td></tr>
<tr><th>Mobile</th><td>{mobile}</td></tr>
<tr><th>Email</th><td>{email}</td></tr>
<tr><th>Location</th><td>{location}</td></tr>
<tr><th>Progress</th><td>{progress}</td></tr>
</table>
<p><a href="/companies/{id}/edit">Edit</a> <a href="/companies/{id}/delete">Delete</a></p>
<h2>Scheduled interviews</h2>
<p><a href="/interviews/new?company={id}">Schedule interview</a></p>
{interviews_html}"#,
        code = html_escape(&company.company_code),
        date = company.date,
        portal = html_escape(&company.portal_display()),
        spoc = html_escape(&company.spoc),
        mobile = html_escape(&company.mobile),
        email = html_escape(&company.email),
        location = html_escape(&company.location_display()),
        progress = company.progress.label(),
    );

    Ok(ok_page(&headers, &company.company_name, &body))
}

fn form_body(form: &CompanyForm, errors: &FieldErrors, action: &str, cancel: &str) -> String {
    let rows = [
        field("Date", "date", &text_input("date", &form.date, "date"), errors),
        field(
            "Portal",
            "portal",
            &select("portal", &owned(Portal::options()), &form.portal, Some("---------")),
            errors,
        ),
        field(
            "Other portal",
            "other_portal",
            &text_input("other_portal", &form.other_portal, "text"),
            errors,
        ),
        field(
            "Company name",
            "company_name",
            &text_input("company_name", &form.company_name, "text"),
            errors,
        ),
        field("SPOC", "spoc", &text_input("spoc", &form.spoc, "text"), errors),
        field("Mobile", "mobile", &text_input("mobile", &form.mobile, "text"), errors),
        field("Email", "email", &text_input("email", &form.email, "email"), errors),
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
            "Progress",
            "progress",
            &select("progress", &owned(Progress::options()), &form.progress, None),
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

pub async fn new_page(headers: HeaderMap) -> Response {
    let form = CompanyForm::initial(Local::now().date_naive());
    let body = form_body(&form, &FieldErrors::default(), "/companies/new", "/companies");
    ok_page(&headers, "Add company", &body)
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PlacementError> {
    let form = CompanyForm::from_data(&FormData::new(pairs));

    match form.validate(Local::now().date_naive()) {
        Ok(input) => {
            let company = store::create_company(&state.db, input, state.operator).await?;
            Ok(redirect_with(
                &format!("/companies/{}", company.id),
                Flash::success(format!("Company {company} added.")),
            ))
        }
        Err(errors) => {
            let body = form_body(&form, &errors, "/companies/new", "/companies");
            Ok(invalid_page(&headers, "Add company", &body))
        }
    }
}

pub async fn edit_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Response, PlacementError> {
    let company = load(&state, id).await?;
    let body = form_body(
        &CompanyForm::from_model(&company),
        &FieldErrors::default(),
        &format!("/companies/{id}/edit"),
        &format!("/companies/{id}"),
    );
    Ok(ok_page(&headers, &format!("Edit {company}"), &body))
}

pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PlacementError> {
    let company = load(&state, id).await?;
    let form = CompanyForm::from_data(&FormData::new(pairs));

    match form.validate(Local::now().date_naive()) {
        Ok(input) => {
            store::update_company(&state.db, id, input).await?;
            Ok(redirect_with(
                &format!("/companies/{id}"),
                Flash::success("Company updated successfully!"),
            ))
        }
        Err(errors) => {
            let body = form_body(
                &form,
                &errors,
                &format!("/companies/{id}/edit"),
                &format!("/companies/{id}"),
            );
            Ok(invalid_page(&headers, &format!("Edit {company}"), &body))
        }
    }
}

pub async fn delete_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Response, PlacementError> {
    let company = load(&state, id).await?;
    let body = render::confirm_delete(
        &format!("{company} and all of its interviews"),
        &format!("/companies/{id}/delete"),
        &format!("/companies/{id}"),
    );
    Ok(ok_page(&headers, "Delete company", &body))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PlacementError> {
    store::delete_company(&state.db, id).await?;
    Ok(redirect_with(
        "/companies",
        Flash::success("Company deleted successfully!"),
    ))
}
