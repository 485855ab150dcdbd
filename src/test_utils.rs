//! Shared test utilities for the school admin console.
//!
//! Two kinds of helpers live here: store helpers that insert rows into an
//! in-memory database, and record builders that produce normalized snapshots
//! with sensible defaults for the pure aggregation and filter tests.

use crate::{
    entities::{
        parent, payment, platform_integration, school, school_user, staff, student,
        student_teacher, teacher, user_action,
    },
    errors::Result,
    records::{
        Action, ActionKind, PaymentRecord, PaymentStatus, PersonRecord, PlatformRecord,
        PlatformStatus, PlatformType, SchoolRecord, SchoolStatus, TeacherRecord,
    },
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all store tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Parses an RFC 3339 timestamp, falling back to the epoch.
pub fn timestamp(text: &str) -> DateTime<Utc> {
    text.parse().unwrap_or_default()
}

/// Inserts a school.
///
/// # Defaults
/// * `code`: the id upper-cased
/// * capacity limits: 1000 students, 100 teachers, 50 staff
/// * `created_at`: 2024-01-01
pub async fn insert_school(
    db: &DatabaseConnection,
    id: &str,
    name: &str,
    status: &str,
) -> Result<school::Model> {
    let created = timestamp("2024-01-01T00:00:00Z");
    Ok(school::ActiveModel {
        id: Set(id.to_string()),
        name: Set(name.to_string()),
        code: Set(id.to_uppercase()),
        director: Set(None),
        status: Set(Some(status.to_string())),
        email: Set(None),
        phone: Set(None),
        address: Set(None),
        max_students: Set(Some(1000)),
        max_teachers: Set(Some(100)),
        max_staff: Set(Some(50)),
        subscription_plan: Set(Some("basic".to_string())),
        subscription_expires_at: Set(None),
        created_at: Set(created),
        updated_at: Set(created),
    }
    .insert(db)
    .await?)
}

/// Inserts the identity row of a person.
pub async fn insert_user(
    db: &DatabaseConnection,
    id: &str,
    school_id: &str,
    user_type: &str,
    full_name: &str,
) -> Result<school_user::Model> {
    let created = timestamp("2022-03-15T00:00:00Z");
    Ok(school_user::ActiveModel {
        id: Set(id.to_string()),
        school_id: Set(school_id.to_string()),
        user_type: Set(user_type.to_string()),
        full_name: Set(full_name.to_string()),
        email: Set(Some(format!("{id}@escola.ao"))),
        phone: Set(None),
        status: Set(Some("active".to_string())),
        created_at: Set(created),
        updated_at: Set(created),
    }
    .insert(db)
    .await?)
}

/// Inserts a student in grade "10º Ano" with no payment figures recorded.
pub async fn insert_student(
    db: &DatabaseConnection,
    id: &str,
    school_id: &str,
    user_id: &str,
    class_name: &str,
    parent_id: Option<&str>,
) -> Result<student::Model> {
    Ok(student::ActiveModel {
        id: Set(id.to_string()),
        school_id: Set(school_id.to_string()),
        user_id: Set(user_id.to_string()),
        class_name: Set(Some(class_name.to_string())),
        grade: Set(Some("10º Ano".to_string())),
        parent_id: Set(parent_id.map(str::to_string)),
        paid_payments: Set(None),
        total_payments: Set(None),
        overdue_payments: Set(None),
        enrollment_date: Set(None),
        last_login: Set(None),
    }
    .insert(db)
    .await?)
}

/// Inserts a parent linked to one ward.
pub async fn insert_parent(
    db: &DatabaseConnection,
    id: &str,
    school_id: &str,
    user_id: &str,
    student_id: Option<&str>,
    platform_active: bool,
) -> Result<parent::Model> {
    Ok(parent::ActiveModel {
        id: Set(id.to_string()),
        school_id: Set(school_id.to_string()),
        user_id: Set(user_id.to_string()),
        student_id: Set(student_id.map(str::to_string)),
        platform_active: Set(Some(platform_active)),
    }
    .insert(db)
    .await?)
}

/// Inserts an active teacher.
pub async fn insert_teacher(
    db: &DatabaseConnection,
    id: &str,
    school_id: &str,
    user_id: &str,
    total_parents: i32,
) -> Result<teacher::Model> {
    Ok(teacher::ActiveModel {
        id: Set(id.to_string()),
        school_id: Set(school_id.to_string()),
        user_id: Set(user_id.to_string()),
        total_parents: Set(Some(total_parents)),
        total_students: Set(None),
        is_active: Set(Some(true)),
        enrollment_date: Set(None),
        last_login: Set(None),
    }
    .insert(db)
    .await?)
}

/// Inserts a staff member.
pub async fn insert_staff(
    db: &DatabaseConnection,
    id: &str,
    school_id: &str,
    user_id: &str,
) -> Result<staff::Model> {
    Ok(staff::ActiveModel {
        id: Set(id.to_string()),
        school_id: Set(school_id.to_string()),
        user_id: Set(user_id.to_string()),
    }
    .insert(db)
    .await?)
}

/// Records that a teacher teaches a student.
pub async fn link_teacher(
    db: &DatabaseConnection,
    student_id: &str,
    teacher_id: &str,
) -> Result<student_teacher::Model> {
    Ok(student_teacher::ActiveModel {
        student_id: Set(student_id.to_string()),
        teacher_id: Set(teacher_id.to_string()),
    }
    .insert(db)
    .await?)
}

/// Appends an audit event to a user's trail.
pub async fn insert_action(
    db: &DatabaseConnection,
    id: &str,
    user_id: &str,
    action_type: &str,
    occurred_at: &str,
) -> Result<user_action::Model> {
    Ok(user_action::ActiveModel {
        id: Set(id.to_string()),
        user_id: Set(user_id.to_string()),
        action_type: Set(Some(action_type.to_string())),
        occurred_at: Set(timestamp(occurred_at)),
        description: Set(Some(format!("{action_type} event"))),
    }
    .insert(db)
    .await?)
}

/// Inserts a tuition payment with no payer attached.
pub async fn insert_payment(
    db: &DatabaseConnection,
    id: &str,
    school_id: &str,
    amount: Decimal,
    status: &str,
    created_at: &str,
) -> Result<payment::Model> {
    Ok(payment::ActiveModel {
        id: Set(id.to_string()),
        school_id: Set(school_id.to_string()),
        parent_id: Set(None),
        student_id: Set(None),
        amount: Set(Some(amount)),
        currency: Set(Some("AOA".to_string())),
        payment_type: Set(Some("tuition".to_string())),
        payment_method: Set(None),
        status: Set(Some(status.to_string())),
        description: Set(None),
        transaction_id: Set(None),
        paid_at: Set(None),
        created_at: Set(timestamp(created_at)),
    }
    .insert(db)
    .await?)
}

/// Inserts a platform integration.
pub async fn insert_platform(
    db: &DatabaseConnection,
    id: &str,
    school_id: &str,
    platform_type: &str,
    status: &str,
    active_users: i64,
) -> Result<platform_integration::Model> {
    Ok(platform_integration::ActiveModel {
        id: Set(id.to_string()),
        school_id: Set(school_id.to_string()),
        platform_name: Set(format!("Portal {platform_type}")),
        platform_type: Set(Some(platform_type.to_string())),
        status: Set(Some(status.to_string())),
        active_users_count: Set(Some(active_users)),
        last_sync: Set(None),
        created_at: Set(timestamp("2025-01-01T00:00:00Z")),
    }
    .insert(db)
    .await?)
}

/// Seeds one school with a student, the student's parent and teacher, a
/// login by the parent and one completed payment of 100 made by the parent.
pub async fn seed_household(db: &DatabaseConnection) -> Result<()> {
    insert_school(db, "s1", "Escola Exemplo", "active").await?;
    insert_user(db, "u-student", "s1", "student", "João Silva").await?;
    insert_user(db, "u-parent", "s1", "parent", "Maria Silva").await?;
    insert_user(db, "u-teacher", "s1", "teacher", "Prof. António").await?;
    insert_student(db, "st1", "s1", "u-student", "A", Some("par1")).await?;
    insert_parent(db, "par1", "s1", "u-parent", Some("st1"), true).await?;
    insert_teacher(db, "t1", "s1", "u-teacher", 20).await?;
    link_teacher(db, "st1", "t1").await?;
    insert_action(db, "a1", "u-parent", "login", "2025-11-20T08:30:00Z").await?;

    payment::ActiveModel {
        id: Set("pay1".to_string()),
        school_id: Set("s1".to_string()),
        parent_id: Set(Some("par1".to_string())),
        student_id: Set(Some("st1".to_string())),
        amount: Set(Some(Decimal::ONE_HUNDRED)),
        currency: Set(Some("AOA".to_string())),
        payment_type: Set(Some("tuition".to_string())),
        payment_method: Set(Some("bank_transfer".to_string())),
        status: Set(Some("completed".to_string())),
        description: Set(None),
        transaction_id: Set(Some("TX-001".to_string())),
        paid_at: Set(None),
        created_at: Set(timestamp("2025-02-01T00:00:00Z")),
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Builds a school snapshot.
pub fn school_record(id: &str, name: &str, status: SchoolStatus) -> SchoolRecord {
    SchoolRecord {
        id: id.to_string(),
        name: name.to_string(),
        code: id.to_uppercase(),
        status,
        subscription_plan: "basic".to_string(),
        ..SchoolRecord::default()
    }
}

/// Builds a student snapshot with no payments or teachers.
pub fn student_record(
    id: &str,
    name: &str,
    school_name: &str,
    class_name: &str,
    parent_name: &str,
) -> PersonRecord {
    PersonRecord {
        id: id.to_string(),
        name: name.to_string(),
        school_name: school_name.to_string(),
        class_name: class_name.to_string(),
        grade: "10º Ano".to_string(),
        parent_name: parent_name.to_string(),
        ..PersonRecord::default()
    }
}

/// Builds an active teacher snapshot.
pub fn teacher_record(id: &str, name: &str, school_name: &str, total_parents: u32) -> TeacherRecord {
    TeacherRecord {
        id: id.to_string(),
        name: name.to_string(),
        school_name: school_name.to_string(),
        total_parents,
        is_active: true,
        ..TeacherRecord::default()
    }
}

/// Builds a payment snapshot.
///
/// # Defaults
/// * `school_name`: "Escola Exemplo"
/// * no parent, student or transaction id
pub fn payment_record(id: &str, amount: Decimal, status: PaymentStatus) -> PaymentRecord {
    PaymentRecord {
        id: id.to_string(),
        school_id: "s1".to_string(),
        school_name: "Escola Exemplo".to_string(),
        amount,
        currency: "AOA".to_string(),
        status,
        payment_type: "tuition".to_string(),
        ..PaymentRecord::default()
    }
}

/// Builds a platform integration snapshot.
pub fn platform_record(
    id: &str,
    school_id: &str,
    platform_type: PlatformType,
    status: PlatformStatus,
    active_users_count: u64,
) -> PlatformRecord {
    PlatformRecord {
        id: id.to_string(),
        school_id: school_id.to_string(),
        platform_name: format!("Portal {platform_type}"),
        platform_type,
        status,
        active_users_count,
        ..PlatformRecord::default()
    }
}

/// Builds an audit event at an RFC 3339 timestamp.
pub fn action(id: &str, kind: ActionKind, at: &str) -> Action {
    Action {
        id: id.to_string(),
        kind,
        timestamp: timestamp(at),
        description: format!("{kind} event"),
    }
}
