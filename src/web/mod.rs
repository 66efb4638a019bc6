//! HTTP layer: router, shared state, error pages and page helpers.
//!
//! Pages are rendered server-side as plain HTML strings. Successful form
//! posts redirect with a flash cookie; the next rendered page shows the
//! message and clears the cookie.

mod companies;
mod interviews;
mod outcomes;
mod reference;
pub mod render;
mod trainers;

use crate::errors::PlacementError;
use crate::flash::Flash;
use crate::settings::Settings;
use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use miette::IntoDiagnostic;
use sea_orm::DatabaseConnection;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub db: DatabaseConnection,
    /// User recorded as `created_by` on new companies and interviews.
    pub operator: Option<i32>,
}

// Security headers middleware
async fn security_headers(request: Request<Body>, next: Next) -> impl IntoResponse {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        HeaderName::from_static("content-security-policy"),
        HeaderValue::from_static(
            "default-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; form-action 'self'",
        ),
    );
    headers.insert(
        HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}

pub fn router(state: AppState) -> Router {
    let media_root = state.settings.media.root.clone();

    Router::new()
        .route("/", get(|| async { Redirect::to("/trainers") }))
        .route("/healthz", get(|| async { "ok" }))
        // Trainers
        .route("/trainers", get(trainers::list))
        .route("/trainers/new", get(trainers::new_page).post(trainers::create))
        .route(
            "/trainers/delete-all",
            get(trainers::delete_all_get).post(trainers::delete_all),
        )
        .route("/trainers/{id}/edit", get(trainers::edit_page).post(trainers::update))
        .route(
            "/trainers/{id}/delete",
            get(trainers::delete_page).post(trainers::delete),
        )
        // Companies
        .route("/companies", get(companies::list))
        .route("/companies/new", get(companies::new_page).post(companies::create))
        .route("/companies/{id}", get(companies::detail))
        .route(
            "/companies/{id}/edit",
            get(companies::edit_page).post(companies::update),
        )
        .route(
            "/companies/{id}/delete",
            get(companies::delete_page).post(companies::delete),
        )
        // Interviews
        .route("/interviews", get(interviews::list))
        .route(
            "/interviews/new",
            get(interviews::new_page).post(interviews::create),
        )
        .route("/interviews/{id}", get(interviews::detail))
        .route(
            "/interviews/{id}/edit",
            get(interviews::edit_page).post(interviews::update),
        )
        .route(
            "/interviews/{id}/delete",
            get(interviews::delete_page).post(interviews::delete),
        )
        .route("/interviews/{id}/students", post(outcomes::add))
        // Interview students
        .route(
            "/interview-students/{id}/edit",
            get(outcomes::edit_page).post(outcomes::update),
        )
        .route("/interview-students/{id}/delete", post(outcomes::delete))
        // Reference data
        .route("/courses", get(reference::courses).post(reference::create_course))
        .route("/students", get(reference::students).post(reference::create_student))
        .nest_service("/media", ServeDir::new(media_root))
        .layer(axum::extract::DefaultBodyLimit::max(
            crate::uploads::MAX_UPLOAD_BYTES + 64 * 1024,
        ))
        .layer(middleware::from_fn(security_headers))
        .with_state(state)
}

pub async fn serve(
    settings: Settings,
    db: DatabaseConnection,
    operator: Option<i32>,
) -> miette::Result<()> {
    let addr: SocketAddr = settings
        .listen_addr()
        .parse()
        .map_err(|e| miette::miette!("bad listen addr: {e}"))?;

    tokio::fs::create_dir_all(&settings.media.root)
        .await
        .into_diagnostic()?;

    let state = AppState {
        settings: Arc::new(settings),
        db,
        operator,
    };
    let app = router(state);

    tracing::info!(%addr, "Placement desk listening");
    let listener = tokio::net::TcpListener::bind(addr).await.into_diagnostic()?;
    axum::serve(listener, app).await.into_diagnostic()?;
    Ok(())
}

/// 303 redirect that carries a flash message.
pub(crate) fn redirect_with(to: &str, flash: Flash) -> Response {
    (
        [(header::SET_COOKIE, flash.to_cookie_header())],
        Redirect::to(to),
    )
        .into_response()
}

/// Render a full page, consuming any pending flash message.
pub(crate) fn page(headers: &HeaderMap, status: StatusCode, title: &str, body: &str) -> Response {
    let flash = Flash::from_headers(headers);
    let html = render::layout(title, flash.as_ref(), body);
    let mut response = (status, Html(html)).into_response();
    if flash.is_some() {
        if let Ok(value) = HeaderValue::from_str(&Flash::delete_cookie_header()) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}

pub(crate) fn ok_page(headers: &HeaderMap, title: &str, body: &str) -> Response {
    page(headers, StatusCode::OK, title, body)
}

/// Form re-rendered after validation failed.
pub(crate) fn invalid_page(headers: &HeaderMap, title: &str, body: &str) -> Response {
    page(headers, StatusCode::UNPROCESSABLE_ENTITY, title, body)
}

fn error_page(status: StatusCode, title: &str, message: &str) -> Response {
    let body = format!(
        r#"<p>{}</p><p><a href="/">Back to the desk</a></p>"#,
        render::html_escape(message)
    );
    (status, Html(render::layout(title, None, &body))).into_response()
}

impl IntoResponse for PlacementError {
    fn into_response(self) -> Response {
        match &self {
            PlacementError::NotFound { .. } => {
                error_page(StatusCode::NOT_FOUND, "Not found", &self.to_string())
            }
            PlacementError::Validation { .. }
            | PlacementError::Upload(_)
            | PlacementError::BadRequest(_) => {
                error_page(StatusCode::BAD_REQUEST, "Bad request", &self.to_string())
            }
            _ => {
                tracing::error!(error = %self, "request failed");
                error_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error",
                    "Something went wrong while handling this request.",
                )
            }
        }
    }
}

