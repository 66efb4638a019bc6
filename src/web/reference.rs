//! Minimal course and student pages that feed the multi-selects.

use super::render::{error_summary, field, html_escape, text_input};
use super::{invalid_page, ok_page, redirect_with, AppState};
use crate::entities::{course, student};
use crate::errors::PlacementError;
use crate::flash::Flash;
use crate::forms::{CourseForm, FieldErrors, FormData, StudentForm};
use crate::storage::reference as store;
use axum::extract::{Form, State};
use axum::http::HeaderMap;
use axum::response::Response;

fn courses_body(courses: &[course::Model], form: &CourseForm, errors: &FieldErrors) -> String {
    let items: String = courses
        .iter()
        .map(|c| format!("<li>{}</li>", html_escape(&c.name)))
        .collect();
    format!(
        r#"{summary}<form method="POST" action="/courses">
{name}
<p><button type="submit">Add course</button></p>
</form>
<ul>{items}</ul>"#,
        summary = error_summary(errors),
        name = field("Name", "name", &text_input("name", &form.name, "text"), errors),
    )
}

pub async fn courses(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, PlacementError> {
    let courses = store::list_courses(&state.db).await?;
    let body = courses_body(&courses, &CourseForm::default(), &FieldErrors::default());
    Ok(ok_page(&headers, "Courses", &body))
}

pub async fn create_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PlacementError> {
    let form = CourseForm::from_data(&FormData::new(pairs));
    let taken = !form.name.is_empty() && store::course_name_taken(&state.db, &form.name).await?;

    match form.validate(taken) {
        Ok(name) => {
            let course = store::create_course(&state.db, &name).await?;
            Ok(redirect_with(
                "/courses",
                Flash::success(format!("Course {} added.", course.name)),
            ))
        }
        Err(errors) => {
            let courses = store::list_courses(&state.db).await?;
            Ok(invalid_page(
                &headers,
                "Courses",
                &courses_body(&courses, &form, &errors),
            ))
        }
    }
}

fn students_body(students: &[student::Model], form: &StudentForm, errors: &FieldErrors) -> String {
    let rows: String = students
        .iter()
        .map(|s| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape(&s.name),
                html_escape(s.email.as_deref().unwrap_or_default()),
                html_escape(s.phone.as_deref().unwrap_or_default()),
            )
        })
        .collect();
    format!(
        r#"{summary}<form method="POST" action="/students">
{name}
{email}
{phone}
<p><button type="submit">Add student</button></p>
</form>
<table><tr><th>Name</th><th>Email</th><th>Phone</th></tr>{rows}</table>"#,
        summary = error_summary(errors),
        name = field("Name", "name", &text_input("name", &form.name, "text"), errors),
        email = field("Email", "email", &text_input("email", &form.email, "email"), errors),
        phone = field("Phone", "phone", &text_input("phone", &form.phone, "text"), errors),
    )
}

pub async fn students(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, PlacementError> {
    let students = store::list_students(&state.db).await?;
    let body = students_body(&students, &StudentForm::default(), &FieldErrors::default());
    Ok(ok_page(&headers, "Students", &body))
}

pub async fn create_student(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PlacementError> {
    let form = StudentForm::from_data(&FormData::new(pairs));

    match form.validate() {
        Ok((name, email, phone)) => {
            let student = store::create_student(&state.db, &name, email, phone).await?;
            Ok(redirect_with(
                "/students",
                Flash::success(format!("Student {} added.", student.name)),
            ))
        }
        Err(errors) => {
            let students = store::list_students(&state.db).await?;
            Ok(invalid_page(
                &headers,
                "Students",
                &students_body(&students, &form, &errors),
            ))
        }
    }
}
