use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PlacementError {
    #[error("I/O error: {0}")]
    #[diagnostic(code(placement::io))]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    #[diagnostic(code(placement::config))]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(placement::serde))]
    Serde(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    #[diagnostic(code(placement::db))]
    Db(#[from] sea_orm::DbErr),

    #[error("{entity} {id} not found")]
    #[diagnostic(code(placement::not_found))]
    NotFound { entity: &'static str, id: i32 },

    #[error("Invalid {field}: {message}")]
    #[diagnostic(code(placement::validation))]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Upload rejected: {0}")]
    #[diagnostic(
        code(placement::upload),
        help("Offer letters must be PDF, Word documents or images")
    )]
    Upload(String),

    #[error("Bad request: {0}")]
    #[diagnostic(code(placement::bad_request))]
    BadRequest(String),

    #[error("{0}")]
    #[diagnostic(code(placement::other))]
    Other(String),
}

impl PlacementError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        PlacementError::NotFound { entity, id }
    }
}
