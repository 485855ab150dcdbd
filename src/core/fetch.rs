//! Data-fetch layer - reads every table the console needs in one round.
//!
//! All queries are issued concurrently and joined before anything is
//! normalized, so a render never sees a partial snapshot. A query that fails
//! is logged and contributes an empty table instead of failing the fetch.

use super::normalize::{StoreSnapshot, normalize};
use crate::entities::{
    Parent, Payment, PlatformIntegration, School, SchoolUser, Staff, Student, StudentTeacher,
    Teacher, UserAction, parent, payment, platform_integration, school, school_user, staff,
    student, student_teacher, teacher, user_action,
};
use crate::records::RecordSets;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder};
use std::future::Future;
use tracing::{debug, error, info};

/// Awaits one table query, degrading a failure to an empty table.
async fn or_empty<T>(
    table: &str,
    query: impl Future<Output = std::result::Result<Vec<T>, DbErr>>,
) -> Vec<T> {
    match query.await {
        Ok(rows) => {
            debug!("Fetched {} rows from {table}", rows.len());
            rows
        }
        Err(e) => {
            error!("Failed to fetch {table}, treating it as empty: {e}");
            Vec::new()
        }
    }
}

/// Reads all ten tables concurrently.
///
/// Schools, payments and platform integrations come newest first; every other
/// table is ordered by id.
pub async fn fetch_snapshot(db: &DatabaseConnection) -> StoreSnapshot {
    let (
        schools,
        users,
        students,
        teachers,
        staff,
        parents,
        student_teachers,
        actions,
        payments,
        platforms,
    ) = tokio::join!(
        or_empty(
            "schools",
            School::find()
                .order_by_desc(school::Column::CreatedAt)
                .all(db),
        ),
        or_empty(
            "school_users",
            SchoolUser::find()
                .order_by_asc(school_user::Column::Id)
                .all(db),
        ),
        or_empty(
            "students",
            Student::find().order_by_asc(student::Column::Id).all(db),
        ),
        or_empty(
            "teachers",
            Teacher::find().order_by_asc(teacher::Column::Id).all(db),
        ),
        or_empty(
            "staff",
            Staff::find().order_by_asc(staff::Column::Id).all(db)
        ),
        or_empty(
            "parents",
            Parent::find().order_by_asc(parent::Column::Id).all(db)
        ),
        or_empty(
            "student_teachers",
            StudentTeacher::find()
                .order_by_asc(student_teacher::Column::StudentId)
                .order_by_asc(student_teacher::Column::TeacherId)
                .all(db),
        ),
        or_empty(
            "user_actions",
            UserAction::find()
                .order_by_asc(user_action::Column::Id)
                .all(db),
        ),
        or_empty(
            "payments",
            Payment::find()
                .order_by_desc(payment::Column::CreatedAt)
                .all(db),
        ),
        or_empty(
            "platform_integrations",
            PlatformIntegration::find()
                .order_by_desc(platform_integration::Column::CreatedAt)
                .all(db),
        ),
    );

    StoreSnapshot {
        schools,
        users,
        students,
        teachers,
        staff,
        parents,
        student_teachers,
        actions,
        payments,
        platforms,
    }
}

/// Fetches and normalizes everything one render cycle needs.
pub async fn fetch_record_sets(db: &DatabaseConnection) -> RecordSets {
    let snapshot = fetch_snapshot(db).await;
    let records = normalize(&snapshot);
    info!(
        "Loaded {} schools, {} students, {} parents, {} teachers, {} payments, {} platforms",
        records.schools.len(),
        records.students.len(),
        records.parents.len(),
        records.teachers.len(),
        records.payments.len(),
        records.platforms.len()
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::aggregate;
    use crate::errors::Result;
    use crate::records::{PaymentStatus, PlatformStatus, PlatformType};
    use crate::test_utils::*;
    use rust_decimal_macros::dec;
    use sea_orm::ConnectionTrait;

    #[tokio::test]
    async fn test_fetch_empty_store() -> Result<()> {
        let db = setup_test_db().await?;
        let records = fetch_record_sets(&db).await;
        assert_eq!(records, RecordSets::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_joins_names() -> Result<()> {
        let db = setup_test_db().await?;
        seed_household(&db).await?;

        let records = fetch_record_sets(&db).await;
        assert_eq!(records.schools.len(), 1);
        assert_eq!(records.students.len(), 1);
        assert_eq!(records.parents.len(), 1);
        assert_eq!(records.teachers.len(), 1);

        let student = &records.students[0];
        assert_eq!(student.name, "João Silva");
        assert_eq!(student.school_name, "Escola Exemplo");
        assert_eq!(student.parent_name, "Maria Silva");
        assert_eq!(student.teachers, vec!["Prof. António".to_string()]);

        let parent = &records.parents[0];
        assert_eq!(parent.name, "João Silva");
        assert!(parent.platform_active);
        assert_eq!(parent.actions.len(), 1);

        let payment = &records.payments[0];
        assert_eq!(payment.parent_name.as_deref(), Some("Maria Silva"));
        assert_eq!(payment.status, PaymentStatus::Completed);
        assert_eq!(payment.amount, dec!(100));
        Ok(())
    }

    #[tokio::test]
    async fn test_newest_payments_first() -> Result<()> {
        let db = setup_test_db().await?;
        insert_school(&db, "s1", "Escola Exemplo", "active").await?;
        insert_payment(&db, "old", "s1", dec!(10), "completed", "2025-01-01T00:00:00Z").await?;
        insert_payment(&db, "new", "s1", dec!(20), "pending", "2025-06-01T00:00:00Z").await?;

        let records = fetch_record_sets(&db).await;
        let ids: Vec<&str> = records.payments.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_table_is_empty() -> Result<()> {
        let db = setup_test_db().await?;
        seed_household(&db).await?;
        db.execute_unprepared("DROP TABLE payments").await?;

        let records = fetch_record_sets(&db).await;
        assert!(records.payments.is_empty());
        assert_eq!(records.schools.len(), 1);
        assert_eq!(records.students.len(), 1);

        let stats = aggregate(&records);
        assert_eq!(stats.total_payments, 0);
        assert_eq!(stats.total_schools, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_platforms() -> Result<()> {
        let db = setup_test_db().await?;
        insert_school(&db, "s1", "Escola Exemplo", "active").await?;
        insert_platform(&db, "pl1", "s1", "mobile", "active", 120).await?;
        insert_platform(&db, "pl2", "s1", "kiosk", "retired", 7).await?;

        let records = fetch_record_sets(&db).await;
        assert_eq!(records.platforms.len(), 2);

        let mobile = records.platforms.iter().find(|p| p.id == "pl1");
        assert_eq!(mobile.map(|p| p.platform_type), Some(PlatformType::Mobile));
        assert_eq!(mobile.map(|p| p.active_users_count), Some(120));
        assert_eq!(
            mobile.and_then(|p| p.school_name.as_deref()),
            Some("Escola Exemplo")
        );

        // Unknown type and status fall back to web and inactive
        let unknown = records.platforms.iter().find(|p| p.id == "pl2");
        assert_eq!(unknown.map(|p| p.platform_type), Some(PlatformType::Web));
        assert_eq!(unknown.map(|p| p.status), Some(PlatformStatus::Inactive));

        assert_eq!(aggregate(&records).active_platforms, 1);
        Ok(())
    }
}
