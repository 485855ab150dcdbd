//! Database configuration module for the console.
//!
//! This module resolves the store's connection URL and opens a `SeaORM`
//! connection to it. `create_tables` builds every table the console reads from
//! the entity definitions; production stores manage their own schema, so it is
//! only used for local `SQLite` stores and tests.

use crate::entities::{
    Parent, Payment, PlatformIntegration, School, SchoolUser, Staff, Student, StudentTeacher,
    Teacher, UserAction,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::debug;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/school_admin.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling
/// back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the store named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to store at {database_url}");

    if let Some(dir) = sqlite_parent_dir(&database_url) {
        std::fs::create_dir_all(dir)?;
    }

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Directory a file-backed `SQLite` URL points into, if it names one.
fn sqlite_parent_dir(url: &str) -> Option<&Path> {
    let path = url.strip_prefix("sqlite://")?.split('?').next()?;
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}

/// Creates every table the console reads, using `SeaORM`'s schema generation
/// from entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let tables = [
        schema.create_table_from_entity(School),
        schema.create_table_from_entity(SchoolUser),
        schema.create_table_from_entity(Student),
        schema.create_table_from_entity(Teacher),
        schema.create_table_from_entity(Staff),
        schema.create_table_from_entity(Parent),
        schema.create_table_from_entity(StudentTeacher),
        schema.create_table_from_entity(UserAction),
        schema.create_table_from_entity(Payment),
        schema.create_table_from_entity(PlatformIntegration),
    ];

    for table in &tables {
        db.execute(builder.build(table)).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        payment::Model as PaymentModel, platform_integration::Model as PlatformModel,
        school::Model as SchoolModel, student_teacher::Model as StudentTeacherModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Every table answers a query once created
        let _: Vec<SchoolModel> = School::find().limit(1).all(&db).await?;
        let _: Vec<PaymentModel> = Payment::find().limit(1).all(&db).await?;
        let _: Vec<PlatformModel> = PlatformIntegration::find().limit(1).all(&db).await?;
        let _: Vec<StudentTeacherModel> = StudentTeacher::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[test]
    fn test_sqlite_parent_dir() {
        assert_eq!(
            sqlite_parent_dir("sqlite://data/school_admin.sqlite?mode=rwc"),
            Some(Path::new("data"))
        );
        assert_eq!(sqlite_parent_dir("sqlite://console.sqlite"), None);
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_parent_dir("postgres://localhost/school"), None);
    }

    #[tokio::test]
    async fn test_create_tables_twice_fails() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        assert!(create_tables(&db).await.is_err());
        Ok(())
    }
}
