//! Normalization of raw store rows into render-cycle snapshots.
//!
//! This is the only place defaults are applied. Missing numbers become zero,
//! missing flags become false, and unrecognised status text falls back to a
//! state that never inflates a headline figure. Names are resolved through
//! lookup maps built once from whole-table reads, so nothing here touches the
//! store.

use crate::entities::{
    parent, payment, platform_integration, school, school_user, staff, student, student_teacher,
    teacher, user_action,
};
use crate::records::{
    Action, ActionKind, CapacityLimits, PaymentFigures, PaymentRecord, PaymentStatus,
    PersonRecord, PlatformRecord, PlatformStatus, PlatformType, RecordSets, SchoolRecord,
    SchoolStatus, StaffRecord, TeacherRecord,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{debug, warn};

/// Raw rows of every table the console reads, exactly as fetched.
///
/// A table that failed to load is an empty vector.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    /// `schools`
    pub schools: Vec<school::Model>,
    /// `school_users`
    pub users: Vec<school_user::Model>,
    /// `students`
    pub students: Vec<student::Model>,
    /// `teachers`
    pub teachers: Vec<teacher::Model>,
    /// `staff`
    pub staff: Vec<staff::Model>,
    /// `parents`
    pub parents: Vec<parent::Model>,
    /// `student_teachers`
    pub student_teachers: Vec<student_teacher::Model>,
    /// `user_actions`
    pub actions: Vec<user_action::Model>,
    /// `payments`
    pub payments: Vec<payment::Model>,
    /// `platform_integrations`
    pub platforms: Vec<platform_integration::Model>,
}

/// Parses loosely-typed status text, falling back when it is missing or unknown.
fn parse_or<T: FromStr + Copy>(raw: Option<&str>, fallback: T, kind: &str, id: &str) -> T {
    match raw {
        None => {
            debug!("{kind} missing on {id}; defaulting");
            fallback
        }
        Some(text) => text.parse().unwrap_or_else(|_| {
            warn!("Unrecognised {kind} {text:?} on {id}; defaulting");
            fallback
        }),
    }
}

fn amount(raw: Option<Decimal>, field: &str, id: &str) -> Decimal {
    match raw {
        Some(value) if value.is_sign_negative() && !value.is_zero() => {
            warn!("Negative {field} {value} on {id}; clamping to zero");
            Decimal::ZERO
        }
        Some(value) => value,
        None => Decimal::ZERO,
    }
}

fn count(raw: Option<i32>) -> u32 {
    raw.and_then(|value| u32::try_from(value).ok()).unwrap_or(0)
}

fn payment_figures(row: &student::Model) -> PaymentFigures {
    let paid = amount(row.paid_payments, "paid_payments", &row.id);
    let mut total = amount(row.total_payments, "total_payments", &row.id);
    if paid > total {
        warn!("Student {} paid {paid} of {total}; raising total", row.id);
        total = paid;
    }
    PaymentFigures {
        paid,
        total,
        overdue: amount(row.overdue_payments, "overdue_payments", &row.id),
    }
}

fn action(row: &user_action::Model) -> Option<Action> {
    let Some(kind) = row.action_type.as_deref().and_then(|t| t.parse().ok()) else {
        warn!("Skipping action {} with type {:?}", row.id, row.action_type);
        return None;
    };
    Some(Action {
        id: row.id.clone(),
        kind,
        timestamp: row.occurred_at,
        description: row.description.clone().unwrap_or_default(),
    })
}

/// Lookup maps shared by every record builder.
struct Lookups<'a> {
    school_names: HashMap<&'a str, &'a str>,
    users: HashMap<&'a str, &'a school_user::Model>,
    students: HashMap<&'a str, &'a student::Model>,
    parents: HashMap<&'a str, &'a parent::Model>,
    teachers: HashMap<&'a str, &'a teacher::Model>,
    teacher_ids_by_student: HashMap<&'a str, Vec<&'a str>>,
    actions_by_user: HashMap<&'a str, Vec<Action>>,
}

impl<'a> Lookups<'a> {
    fn build(snapshot: &'a StoreSnapshot) -> Self {
        let mut teacher_ids_by_student: HashMap<&str, Vec<&str>> = HashMap::new();
        for link in &snapshot.student_teachers {
            teacher_ids_by_student
                .entry(link.student_id.as_str())
                .or_default()
                .push(link.teacher_id.as_str());
        }

        let mut actions_by_user: HashMap<&str, Vec<Action>> = HashMap::new();
        for row in &snapshot.actions {
            if let Some(action) = action(row) {
                actions_by_user
                    .entry(row.user_id.as_str())
                    .or_default()
                    .push(action);
            }
        }

        Self {
            school_names: snapshot
                .schools
                .iter()
                .map(|s| (s.id.as_str(), s.name.as_str()))
                .collect(),
            users: snapshot.users.iter().map(|u| (u.id.as_str(), u)).collect(),
            students: snapshot
                .students
                .iter()
                .map(|s| (s.id.as_str(), s))
                .collect(),
            parents: snapshot.parents.iter().map(|p| (p.id.as_str(), p)).collect(),
            teachers: snapshot
                .teachers
                .iter()
                .map(|t| (t.id.as_str(), t))
                .collect(),
            teacher_ids_by_student,
            actions_by_user,
        }
    }

    fn school_name(&self, school_id: &str) -> Option<String> {
        self.school_names.get(school_id).map(|name| (*name).to_string())
    }

    fn user_name(&self, user_id: &str) -> Option<String> {
        self.users.get(user_id).map(|user| user.full_name.clone())
    }

    fn parent_name(&self, parent_id: &str) -> Option<String> {
        self.parents
            .get(parent_id)
            .and_then(|parent| self.user_name(&parent.user_id))
    }

    fn student_name(&self, student_id: &str) -> Option<String> {
        self.students
            .get(student_id)
            .and_then(|student| self.user_name(&student.user_id))
    }

    fn teacher_names(&self, student_id: &str) -> Vec<String> {
        self.teacher_ids_by_student
            .get(student_id)
            .into_iter()
            .flatten()
            .filter_map(|teacher_id| self.teachers.get(teacher_id))
            .filter_map(|teacher| self.user_name(&teacher.user_id))
            .collect()
    }

    fn actions(&self, user_id: &str) -> Vec<Action> {
        self.actions_by_user.get(user_id).cloned().unwrap_or_default()
    }

    /// Falls back to the account creation date when no enrollment date is stored.
    fn enrollment_date(&self, stored: Option<NaiveDate>, user_id: &str) -> NaiveDate {
        stored
            .or_else(|| {
                self.users
                    .get(user_id)
                    .map(|user| user.created_at.date_naive())
            })
            .unwrap_or_default()
    }
}

fn school_record(row: &school::Model) -> SchoolRecord {
    SchoolRecord {
        id: row.id.clone(),
        name: row.name.clone(),
        code: row.code.clone(),
        director: row.director.clone(),
        status: parse_or(
            row.status.as_deref(),
            SchoolStatus::Inactive,
            "school status",
            &row.id,
        ),
        limits: CapacityLimits {
            max_students: count(row.max_students),
            max_teachers: count(row.max_teachers),
            max_staff: count(row.max_staff),
        },
        subscription_plan: row
            .subscription_plan
            .clone()
            .unwrap_or_else(|| "basic".to_string()),
        subscription_expires_at: row.subscription_expires_at,
        email: row.email.clone(),
        phone: row.phone.clone(),
        address: row.address.clone(),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn student_record(row: &student::Model, lookups: &Lookups<'_>) -> PersonRecord {
    PersonRecord {
        id: row.id.clone(),
        name: lookups.user_name(&row.user_id).unwrap_or_default(),
        school_id: row.school_id.clone(),
        school_name: lookups.school_name(&row.school_id).unwrap_or_default(),
        class_name: row.class_name.clone().unwrap_or_default(),
        grade: row.grade.clone().unwrap_or_default(),
        parent_name: row
            .parent_id
            .as_deref()
            .and_then(|id| lookups.parent_name(id))
            .unwrap_or_default(),
        teachers: lookups.teacher_names(&row.id),
        payments: payment_figures(row),
        enrollment_date: lookups.enrollment_date(row.enrollment_date, &row.user_id),
        last_login: row.last_login,
        platform_active: false,
        actions: lookups.actions(&row.user_id),
    }
}

fn latest_login(actions: &[Action]) -> Option<DateTime<Utc>> {
    actions
        .iter()
        .filter(|action| action.kind == ActionKind::Login)
        .map(|action| action.timestamp)
        .max()
}

/// A parent row carries its ward's details and the parent's own activity.
fn parent_record(row: &parent::Model, lookups: &Lookups<'_>) -> PersonRecord {
    let ward = row
        .student_id
        .as_deref()
        .and_then(|id| lookups.students.get(id).copied());
    if ward.is_none() {
        debug!("Parent {} has no linked student", row.id);
    }

    let actions = lookups.actions(&row.user_id);
    PersonRecord {
        id: row.id.clone(),
        name: ward
            .and_then(|student| lookups.user_name(&student.user_id))
            .unwrap_or_default(),
        school_id: row.school_id.clone(),
        school_name: lookups.school_name(&row.school_id).unwrap_or_default(),
        class_name: ward
            .and_then(|student| student.class_name.clone())
            .unwrap_or_default(),
        grade: ward
            .and_then(|student| student.grade.clone())
            .unwrap_or_default(),
        parent_name: lookups.user_name(&row.user_id).unwrap_or_default(),
        teachers: ward
            .map(|student| lookups.teacher_names(&student.id))
            .unwrap_or_default(),
        payments: ward.map(payment_figures).unwrap_or_default(),
        enrollment_date: lookups.enrollment_date(
            ward.and_then(|student| student.enrollment_date),
            &row.user_id,
        ),
        last_login: latest_login(&actions),
        platform_active: row.platform_active.unwrap_or(false),
        actions,
    }
}

fn teacher_record(row: &teacher::Model, lookups: &Lookups<'_>) -> TeacherRecord {
    let user = lookups.users.get(row.user_id.as_str());
    TeacherRecord {
        id: row.id.clone(),
        name: user.map(|u| u.full_name.clone()).unwrap_or_default(),
        email: user.and_then(|u| u.email.clone()).unwrap_or_default(),
        school_id: row.school_id.clone(),
        school_name: lookups.school_name(&row.school_id).unwrap_or_default(),
        total_parents: count(row.total_parents),
        total_students: count(row.total_students),
        enrollment_date: lookups.enrollment_date(row.enrollment_date, &row.user_id),
        is_active: row.is_active.unwrap_or(false),
        last_login: row.last_login,
        actions: lookups.actions(&row.user_id),
    }
}

fn staff_record(row: &staff::Model, lookups: &Lookups<'_>) -> StaffRecord {
    StaffRecord {
        id: row.id.clone(),
        school_id: row.school_id.clone(),
        name: lookups.user_name(&row.user_id).unwrap_or_default(),
    }
}

fn payment_record(row: &payment::Model, lookups: &Lookups<'_>) -> PaymentRecord {
    PaymentRecord {
        id: row.id.clone(),
        school_id: row.school_id.clone(),
        school_name: lookups.school_name(&row.school_id).unwrap_or_default(),
        parent_id: row.parent_id.clone(),
        parent_name: row.parent_id.as_deref().and_then(|id| lookups.parent_name(id)),
        student_id: row.student_id.clone(),
        student_name: row
            .student_id
            .as_deref()
            .and_then(|id| lookups.student_name(id)),
        amount: amount(row.amount, "amount", &row.id),
        currency: row.currency.clone().unwrap_or_default(),
        // Unknown statuses must never count as revenue
        status: parse_or(
            row.status.as_deref(),
            PaymentStatus::Failed,
            "payment status",
            &row.id,
        ),
        payment_type: row.payment_type.clone().unwrap_or_default(),
        payment_method: row.payment_method.clone(),
        description: row.description.clone(),
        transaction_id: row.transaction_id.clone(),
        paid_at: row.paid_at,
        created_at: row.created_at,
    }
}

fn platform_record(row: &platform_integration::Model, lookups: &Lookups<'_>) -> PlatformRecord {
    PlatformRecord {
        id: row.id.clone(),
        school_id: row.school_id.clone(),
        school_name: lookups.school_name(&row.school_id),
        platform_name: row.platform_name.clone(),
        platform_type: parse_or(
            row.platform_type.as_deref(),
            PlatformType::Web,
            "platform type",
            &row.id,
        ),
        status: parse_or(
            row.status.as_deref(),
            PlatformStatus::Inactive,
            "platform status",
            &row.id,
        ),
        active_users_count: row
            .active_users_count
            .and_then(|value| u64::try_from(value).ok())
            .unwrap_or(0),
        last_sync: row.last_sync,
        created_at: row.created_at,
    }
}

/// Converts a store snapshot into fully-populated record sets.
///
/// Row order within each table is preserved.
#[must_use]
pub fn normalize(snapshot: &StoreSnapshot) -> RecordSets {
    let lookups = Lookups::build(snapshot);

    RecordSets {
        schools: snapshot.schools.iter().map(school_record).collect(),
        students: snapshot
            .students
            .iter()
            .map(|row| student_record(row, &lookups))
            .collect(),
        teachers: snapshot
            .teachers
            .iter()
            .map(|row| teacher_record(row, &lookups))
            .collect(),
        staff: snapshot
            .staff
            .iter()
            .map(|row| staff_record(row, &lookups))
            .collect(),
        parents: snapshot
            .parents
            .iter()
            .map(|row| parent_record(row, &lookups))
            .collect(),
        payments: snapshot
            .payments
            .iter()
            .map(|row| payment_record(row, &lookups))
            .collect(),
        platforms: snapshot
            .platforms
            .iter()
            .map(|row| platform_record(row, &lookups))
            .collect(),
    }
}
