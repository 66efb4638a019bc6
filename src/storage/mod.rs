//! Database access for every record type.
//!
//! Functions take a `DatabaseConnection` and return plain entity models or
//! small row structs joining a record with what its pages display.

pub mod companies;
pub mod interviews;
pub mod outcomes;
pub mod reference;
pub mod trainers;

use crate::errors::PlacementError;
use crate::settings::Database as DbCfg;
use migration::MigratorTrait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Database, DatabaseConnection};

pub use companies::{CompanyFilter, CompanyInput};
pub use interviews::{InterviewFilter, InterviewInput, InterviewRow};
pub use outcomes::{OfferLetterChange, OutcomeRow};
pub use trainers::{TrainerFilter, TrainerInput, TrainerRow};

/// Connect and bring the schema up to date.
pub async fn init(cfg: &DbCfg) -> Result<DatabaseConnection, PlacementError> {
    let db = Database::connect(&cfg.url).await?;
    migrate(&db).await?;
    Ok(db)
}

pub async fn migrate(db: &DatabaseConnection) -> Result<(), PlacementError> {
    migration::Migrator::up(db, None).await?;
    tracing::debug!("schema migrations applied");
    Ok(())
}

const LIKE_ESCAPE: char = '!';

/// Case-insensitive substring match, with LIKE wildcards in `needle` escaped.
pub(crate) fn icontains<C: ColumnTrait>(col: C, needle: &str) -> SimpleExpr {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.to_lowercase().chars() {
        if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    Expr::expr(Func::lower(Expr::col(col)))
        .like(LikeExpr::new(format!("%{escaped}%")).escape(LIKE_ESCAPE))
}

/// Last value submitted for `key`, matching how repeated query keys resolve.
pub(crate) fn query_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

/// Treat empty query values as absent. Other values are used as given,
/// surrounding whitespace included.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::{Database, DatabaseConnection};
    use sea_orm_migration::MigratorTrait;
    use tempfile::NamedTempFile;

    /// Test database helper that keeps temp file alive
    pub struct TestDb {
        connection: DatabaseConnection,
        _temp_file: NamedTempFile,
    }

    impl TestDb {
        pub async fn new() -> Self {
            let temp_file = NamedTempFile::new().expect("Failed to create temp file");
            let db_path = temp_file.path().to_str().expect("Invalid temp file path");
            let db_url = format!("sqlite://{}?mode=rwc", db_path);

            let connection = Database::connect(&db_url)
                .await
                .expect("Failed to connect to test database");

            migration::Migrator::up(&connection, None)
                .await
                .expect("Failed to run migrations");

            Self {
                connection,
                _temp_file: temp_file,
            }
        }

        pub fn connection(&self) -> &DatabaseConnection {
            &self.connection
        }
    }
}
