use super::render::{error_summary, field, html_escape, owned, select, textarea};
use super::{invalid_page, ok_page, redirect_with, AppState};
use crate::entities::choices::{Choice, OutcomeStatus};
use crate::errors::PlacementError;
use crate::flash::Flash;
use crate::forms::{FieldErrors, FormData, OutcomeForm};
use crate::storage::outcomes::{self as store, OfferLetterChange, OutcomeRow};
use crate::uploads::{self, ALLOWED_EXTENSIONS};
use axum::extract::{Form, Multipart, Path, State};
use axum::http::HeaderMap;
use axum::response::Response;

pub async fn add(
    State(state): State<AppState>,
    Path(interview_id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PlacementError> {
    let back = format!("/interviews/{interview_id}");
    let Ok(student_id) = FormData::new(pairs).get("student").parse::<i32>() else {
        return Ok(redirect_with(&back, Flash::error("Select a student to add.")));
    };

    let flash = match store::add_student(&state.db, interview_id, student_id).await {
        Ok(_) => Flash::success("Student added to the interview."),
        Err(PlacementError::Validation { message, .. }) => Flash::error(message),
        Err(PlacementError::NotFound {
            entity: "Student", ..
        }) => Flash::error("Select a valid student."),
        Err(e) => return Err(e),
    };
    Ok(redirect_with(&back, flash))
}

async fn load(state: &AppState, id: i32) -> Result<OutcomeRow, PlacementError> {
    store::get_outcome(&state.db, id)
        .await?
        .ok_or_else(|| PlacementError::not_found("Interview student", id))
}

fn form_body(row: &OutcomeRow, form: &OutcomeForm, errors: &FieldErrors) -> String {
    let o = &row.outcome;
    let current = match &o.offer_letter {
        Some(path) => format!(
            r#"<p>Current: <a href="/media/{path}">{path}</a>
<label><input type="checkbox" name="clear_offer_letter" value="on"{checked}> Remove current file</label></p>"#,
            path = html_escape(path),
            checked = if form.clear_offer_letter { " checked" } else { "" },
        ),
        None => String::new(),
    };
    let accept = ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",");

    let rows = [
        field(
            "Status",
            "status",
            &select("status", &owned(OutcomeStatus::options()), &form.status, None),
            errors,
        ),
        field(
            "Reason (required when rejected or not attended)",
            "reason",
            &textarea("reason", &form.reason),
            errors,
        ),
        field(
            "Offer letter",
            "offer_letter",
            &format!(
                r#"{current}<input type="file" id="offer_letter" name="offer_letter" accept="{accept}">"#
            ),
            errors,
        ),
    ]
    .join("\n");

    format!(
        r#"{summary}<form method="POST" action="/interview-students/{id}/edit" enctype="multipart/form-data">
{rows}
<p><button type="submit">Save</button> <a href="/interviews/{interview_id}">Cancel</a></p>
</form>"#,
        summary = error_summary(errors),
        id = o.id,
        interview_id = o.interview_id,
    )
}

pub async fn edit_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Response, PlacementError> {
    let row = load(&state, id).await?;
    let form = OutcomeForm::from_model(row.outcome.status, row.outcome.reason.as_deref());
    let body = form_body(&row, &form, &FieldErrors::default());
    Ok(ok_page(&headers, &format!("Update {}", row.student.name), &body))
}

/// Uploaded file as received: client file name and contents.
struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

async fn read_multipart(
    mut multipart: Multipart,
) -> Result<(OutcomeForm, Option<Upload>), PlacementError> {
    let bad = |e: axum::extract::multipart::MultipartError| PlacementError::BadRequest(e.to_string());
    let mut form = OutcomeForm::default();
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(bad)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "status" => form.status = field.text().await.map_err(bad)?.trim().to_string(),
            "reason" => form.reason = field.text().await.map_err(bad)?.trim().to_string(),
            "clear_offer_letter" => form.clear_offer_letter = true,
            "offer_letter" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(bad)?;
                // Browsers send an empty part when no file was chosen.
                if !file_name.is_empty() && !bytes.is_empty() {
                    upload = Some(Upload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok((form, upload))
}

pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Response, PlacementError> {
    let row = load(&state, id).await?;
    let title = format!("Update {}", row.student.name);
    let (form, upload) = read_multipart(multipart).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => return Ok(invalid_page(&headers, &title, &form_body(&row, &form, &errors))),
    };

    let media_root = &state.settings.media.root;
    let change = match upload {
        Some(upload) => {
            match uploads::store_offer_letter(media_root, &upload.file_name, &upload.bytes).await {
                Ok(path) => OfferLetterChange::Replace(path),
                Err(PlacementError::Upload(message)) => {
                    let mut errors = FieldErrors::default();
                    errors.add("offer_letter", message);
                    return Ok(invalid_page(&headers, &title, &form_body(&row, &form, &errors)));
                }
                Err(e) => return Err(e),
            }
        }
        None if input.clear_offer_letter => OfferLetterChange::Clear,
        None => OfferLetterChange::Keep,
    };

    let stored = match &change {
        OfferLetterChange::Replace(path) => Some(path.clone()),
        _ => None,
    };
    let (outcome, stale) =
        match store::update_outcome(&state.db, id, input.status, input.reason, change).await {
            Ok(result) => result,
            Err(e) => {
                if let Some(path) = stored {
                    uploads::remove_offer_letter(media_root, &path).await;
                }
                return Err(e);
            }
        };
    if let Some(path) = stale {
        uploads::remove_offer_letter(media_root, &path).await;
    }

    Ok(redirect_with(
        &format!("/interviews/{}", outcome.interview_id),
        Flash::success(format!(
            "Status of {} updated to {}.",
            row.student.name,
            outcome.status.label()
        )),
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PlacementError> {
    let removed = store::delete_outcome(&state.db, id).await?;
    if let Some(path) = &removed.offer_letter {
        uploads::remove_offer_letter(&state.settings.media.root, path).await;
    }
    Ok(redirect_with(
        &format!("/interviews/{}", removed.interview_id),
        Flash::success("Student removed from the interview."),
    ))
}
