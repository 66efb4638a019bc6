// End-to-end tests through the router
//
// Requests go through `tower::ServiceExt::oneshot` against a router backed by
// a temporary SQLite database and media directory.

mod helpers;

use axum::http::StatusCode;
use helpers::db::{seed_course, seed_student};
use helpers::{CompanyBuilder, InterviewBuilder, TestApp, TrainerBuilder};
use placement_desk::entities::choices::OutcomeStatus;
use placement_desk::storage::{outcomes, trainers};
use sea_orm::ConnectionTrait;

fn trainer_form(name: &str, course_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", name.to_string()),
        ("email", "trainer@example.com".to_string()),
        ("phone_number", "+91 98765-43210".to_string()),
        ("stack", course_id.to_string()),
        ("location", "chennai".to_string()),
        ("years_of_experience", "4".to_string()),
        ("availability", "full_day".to_string()),
        ("mode", "hybrid".to_string()),
        ("employment_type", "full_time".to_string()),
        ("timing_slots", r#"["10:00-12:00"]"#.to_string()),
    ]
}

fn as_pairs<'a>(owned: &'a [(&'static str, String)]) -> Vec<(&'static str, &'a str)> {
    owned.iter().map(|(k, v)| (*k, v.as_str())).collect()
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = TestApp::new().await;
    let response = app.get("/healthz").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers["x-frame-options"], "DENY");
    assert_eq!(response.headers["x-content-type-options"], "nosniff");
    assert!(response.headers.contains_key("content-security-policy"));
}

#[tokio::test]
async fn test_root_redirects_to_trainers() {
    let app = TestApp::new().await;
    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/trainers"));
}

#[tokio::test]
async fn test_create_trainer_redirects_with_flash() {
    let app = TestApp::new().await;
    let course = seed_course(app.db(), "Rust").await;
    let form = trainer_form("Hema", &course.id.to_string());

    let response = app.post_form("/trainers/new", &as_pairs(&form)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/trainers"));
    let cookie = response.cookie().expect("flash cookie set");
    assert!(cookie.starts_with("placement_flash="));

    // The next page shows the message once and clears the cookie
    let list = app.get_with_cookie("/trainers", Some(&cookie)).await;
    assert_eq!(list.status, StatusCode::OK);
    assert!(list.body.contains("Trainer Hema added."));
    assert!(list.body.contains("Rust"));
    assert_eq!(list.cookie().as_deref(), Some("placement_flash="));
}

#[tokio::test]
async fn test_invalid_trainer_rerenders_with_errors() {
    let app = TestApp::new().await;
    let course = seed_course(app.db(), "Rust").await;
    let mut form = trainer_form("Irfan", &course.id.to_string());
    form.retain(|(k, _)| *k != "stack");
    form.push(("email", "not-an-email".to_string()));

    let response = app.post_form("/trainers/new", &as_pairs(&form)).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Irfan"));
    assert!(response.body.contains("This field is required."));

    let count = trainers::count_trainers(app.db())
        .await
        .expect("Failed to count trainers");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_missing_records_are_not_found() {
    let app = TestApp::new().await;

    for uri in [
        "/trainers/42/edit",
        "/companies/42",
        "/interviews/42",
        "/interview-students/42/edit",
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{uri}");
    }

    let response = app.post_form("/trainers/42/delete", &[]).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_all_trainers() {
    let app = TestApp::new().await;
    TrainerBuilder::new("Jaya").create(app.db()).await;
    TrainerBuilder::new("Karthik").create(app.db()).await;

    // GET never deletes
    let response = app.get("/trainers/delete-all").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/trainers"));
    assert_eq!(trainers::count_trainers(app.db()).await.expect("count"), 2);

    let response = app.post_form("/trainers/delete-all", &[]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let cookie = response.cookie().expect("flash cookie set");
    assert_eq!(trainers::count_trainers(app.db()).await.expect("count"), 0);

    let list = app.get_with_cookie("/trainers", Some(&cookie)).await;
    assert!(list
        .body
        .contains("All trainers have been successfully deleted."));
}

#[tokio::test]
async fn test_failed_delete_all_keeps_trainers() {
    let app = TestApp::new().await;
    TrainerBuilder::new("Jaya").create(app.db()).await;
    TrainerBuilder::new("Karthik").create(app.db()).await;

    app.db()
        .execute_unprepared(
            "CREATE TRIGGER trainers_locked BEFORE DELETE ON trainers \
             BEGIN SELECT RAISE(ABORT, 'trainers are locked'); END;",
        )
        .await
        .expect("Failed to create trigger");

    let response = app.post_form("/trainers/delete-all", &[]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/trainers"));
    let cookie = response.cookie().expect("flash cookie set");
    assert_eq!(trainers::count_trainers(app.db()).await.expect("count"), 2);

    let list = app.get_with_cookie("/trainers", Some(&cookie)).await;
    assert!(list.body.contains("flash error"));
    assert!(list
        .body
        .contains("An error occurred while deleting trainers: "));
    assert!(list.body.contains("Jaya"));
    assert!(list.body.contains("Karthik"));
}

#[tokio::test]
async fn test_delete_single_trainer() {
    let app = TestApp::new().await;
    let keep = TrainerBuilder::new("Latha").create(app.db()).await;
    let gone = TrainerBuilder::new("Manoj").create(app.db()).await;
    let uri = format!("/trainers/{}/delete", gone.id);

    // GET only asks for confirmation
    let page = app.get(&uri).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Are you sure you want to delete trainer Manoj?"));
    assert!(page.body.contains(&format!(r#"action="{uri}""#)));
    assert_eq!(trainers::count_trainers(app.db()).await.expect("count"), 2);

    let response = app.post_form(&uri, &[]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/trainers"));
    let cookie = response.cookie().expect("flash cookie set");

    let remaining = trainers::get_trainer(app.db(), gone.id)
        .await
        .expect("Failed to load trainer");
    assert!(remaining.is_none());
    assert!(trainers::get_trainer(app.db(), keep.id)
        .await
        .expect("Failed to load trainer")
        .is_some());

    let list = app.get_with_cookie("/trainers", Some(&cookie)).await;
    assert!(list.body.contains("Trainer deleted successfully!"));
    assert!(!list.body.contains("Manoj"));
}

#[tokio::test]
async fn test_edit_trainer() {
    let app = TestApp::new().await;
    let rust = seed_course(app.db(), "Rust").await;
    let go = seed_course(app.db(), "Go").await;
    let trainer = TrainerBuilder::new("Nila")
        .with_stack(&[rust.id])
        .with_slots(&["09:00-11:00", "15:00-17:00"])
        .create(app.db())
        .await;
    let uri = format!("/trainers/{}/edit", trainer.id);

    // Slots come back as JSON text in the textarea
    let page = app.get(&uri).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page
        .body
        .contains("[&quot;09:00-11:00&quot;,&quot;15:00-17:00&quot;]"));

    let mut form = trainer_form("Nila S", &go.id.to_string());
    form.push(("timing_slots", r#"["18:00-20:00"]"#.to_string()));
    let response = app.post_form(&uri, &as_pairs(&form)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/trainers"));
    let cookie = response.cookie().expect("flash cookie set");

    let row = trainers::get_trainer(app.db(), trainer.id)
        .await
        .expect("Failed to load trainer")
        .expect("trainer exists");
    assert_eq!(row.trainer.name, "Nila S");
    assert_eq!(row.trainer.slots(), vec!["18:00-20:00"]);
    let stack: Vec<i32> = row.stack.iter().map(|c| c.id).collect();
    assert_eq!(stack, vec![go.id]);

    let list = app.get_with_cookie("/trainers", Some(&cookie)).await;
    assert!(list.body.contains("Trainer updated successfully!"));

    // Invalid edits re-render and leave the record alone
    let mut bad = trainer_form("", &go.id.to_string());
    bad.push(("years_of_experience", "-1".to_string()));
    let response = app.post_form(&uri, &as_pairs(&bad)).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let row = trainers::get_trainer(app.db(), trainer.id)
        .await
        .expect("Failed to load trainer")
        .expect("trainer exists");
    assert_eq!(row.trainer.name, "Nila S");
}

#[tokio::test]
async fn test_company_create_and_detail() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/companies/new",
            &[
                ("date", "2025-03-10"),
                ("portal", "linkedin"),
                ("company_name", "Zoho"),
                ("spoc", "Meena"),
                ("mobile", "9123456789"),
                ("email", "hr@zoho.example"),
                ("location", "chennai"),
                ("progress", "resume_shared"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let location = response.location().expect("redirect").to_string();
    assert!(location.starts_with("/companies/"));
    let cookie = response.cookie().expect("flash cookie set");

    let detail = app.get_with_cookie(&location, Some(&cookie)).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Company Zoho (COMP0001) added."));
    assert!(detail.body.contains("COMP0001"));
}

#[tokio::test]
async fn test_company_other_portal_requires_text() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/companies/new",
            &[
                ("portal", "others"),
                ("company_name", "Wayne"),
                ("spoc", "Lucius"),
                ("mobile", "9123456789"),
                ("email", "hr@wayne.example"),
                ("location", "chennai"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let list = app.get("/companies").await;
    assert!(!list.body.contains("Wayne"));
}

#[tokio::test]
async fn test_company_filters_on_list_page() {
    let app = TestApp::new().await;
    CompanyBuilder::new("Acme").create(app.db()).await;
    CompanyBuilder::new("Globex").create(app.db()).await;

    let response = app.get("/companies?q=glob").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Globex"));
    assert!(!response.body.contains("Acme"));
}

#[tokio::test]
async fn test_interview_schedule_and_students() {
    let app = TestApp::new().await;
    let db = app.db();
    let course = seed_course(db, "Java").await;
    let student = seed_student(db, "Lakshmi").await;
    let company = CompanyBuilder::new("Acme").create(db).await;

    let company_id = company.id.to_string();
    let course_id = course.id.to_string();
    let response = app
        .post_form(
            "/interviews/new",
            &[
                ("venue", "online"),
                ("company", company_id.as_str()),
                ("applying_role", "Backend Developer"),
                ("courses", course_id.as_str()),
                ("interview_round", "technical"),
                ("round_number", "1"),
                ("location", "chennai"),
                ("interview_date", "2025-05-02"),
                ("interview_time", "11:30"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let detail_uri = response.location().expect("redirect").to_string();

    let detail = app.get(&detail_uri).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Backend Developer"));
    assert!(detail.body.contains("Java"));

    let student_id = student.id.to_string();
    let students_uri = format!("{detail_uri}/students");
    let response = app
        .post_form(&students_uri, &[("student", student_id.as_str())])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    // Adding the same student again is refused with a flash error
    let response = app
        .post_form(&students_uri, &[("student", student_id.as_str())])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let cookie = response.cookie().expect("flash cookie set");
    let detail = app.get_with_cookie(&detail_uri, Some(&cookie)).await;
    assert!(detail.body.contains("flash error"));
    assert!(detail.body.contains("Lakshmi"));
}

#[tokio::test]
async fn test_sub_round_must_share_company() {
    let app = TestApp::new().await;
    let db = app.db();
    let course = seed_course(db, "Python").await;
    let acme = CompanyBuilder::new("Acme").create(db).await;
    let globex = CompanyBuilder::new("Globex").create(db).await;
    let first_round = InterviewBuilder::new(acme.id)
        .with_courses(&[course.id])
        .create(db)
        .await;

    let company_id = globex.id.to_string();
    let course_id = course.id.to_string();
    let parent_id = first_round.id.to_string();
    let response = app
        .post_form(
            "/interviews/new",
            &[
                ("venue", "offline"),
                ("company", company_id.as_str()),
                ("applying_role", "Analyst"),
                ("courses", course_id.as_str()),
                ("interview_round", "hr"),
                ("round_number", "2"),
                ("parent_interview", parent_id.as_str()),
                ("location", "chennai"),
                ("interview_date", "2025-05-03"),
                ("interview_time", "09:00"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_outcome_update_with_offer_letter() {
    let app = TestApp::new().await;
    let db = app.db();
    let course = seed_course(db, "Rust").await;
    let student = seed_student(db, "Mohan").await;
    let company = CompanyBuilder::new("Acme").create(db).await;
    let interview = InterviewBuilder::new(company.id)
        .with_courses(&[course.id])
        .create(db)
        .await;
    let outcome = outcomes::add_student(db, interview.id, student.id)
        .await
        .expect("Failed to add student");
    let edit_uri = format!("/interview-students/{}/edit", outcome.id);

    // Rejection without a reason is refused
    let response = app
        .post_multipart(&edit_uri, &[("status", "rejected")], None)
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    // Disallowed file type is refused before anything is written
    let response = app
        .post_multipart(
            &edit_uri,
            &[("status", "selected")],
            Some(("offer_letter", "offer.exe", &b"MZ"[..])),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .post_multipart(
            &edit_uri,
            &[("status", "placed")],
            Some(("offer_letter", "Offer Letter.pdf", &b"%PDF-1.4"[..])),
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let row = outcomes::get_outcome(db, outcome.id)
        .await
        .expect("Failed to load outcome")
        .expect("outcome exists");
    assert_eq!(row.outcome.status, OutcomeStatus::Placed);
    let stored = row.outcome.offer_letter.expect("offer letter stored");
    assert!(stored.starts_with("offer_letters/"));
    assert!(stored.ends_with(".pdf"));
    assert!(app.media_root().join(&stored).exists());

    // Clearing removes both the reference and the file
    let response = app
        .post_multipart(
            &edit_uri,
            &[("status", "placed"), ("clear_offer_letter", "on")],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let row = outcomes::get_outcome(db, outcome.id)
        .await
        .expect("Failed to load outcome")
        .expect("outcome exists");
    assert!(row.outcome.offer_letter.is_none());
    assert!(!app.media_root().join(&stored).exists());
}
