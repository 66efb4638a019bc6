use placement_desk::entities::{course, student};
use placement_desk::storage;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tempfile::NamedTempFile;

/// Test database with automatic cleanup
pub struct TestDb {
    connection: DatabaseConnection,
    _temp_file: NamedTempFile,
}

impl TestDb {
    /// Create a new test database with migrations applied
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

    /// Get database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }
}

pub async fn seed_course(db: &DatabaseConnection, name: &str) -> course::Model {
    storage::reference::create_course(db, name)
        .await
        .expect("Failed to create test course")
}

pub async fn seed_student(db: &DatabaseConnection, name: &str) -> student::Model {
    storage::reference::create_student(db, name, None, None)
        .await
        .expect("Failed to create test student")
}
