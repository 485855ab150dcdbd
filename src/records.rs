//! Render-cycle snapshots of store data.
//!
//! These are the fully-populated, well-typed records the aggregator and the
//! filter engine work on. They are produced once per fetch by
//! [`crate::core::normalize`] and never mutated afterwards.

use crate::errors::Error;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Anything listed on a screen can be picked out by its id.
pub trait Identified {
    /// Store identifier of the record
    fn id(&self) -> &str;
}

macro_rules! textual_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The store's textual form
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(Error::InvalidValue {
                        kind: $kind,
                        value: value.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Lifecycle state of a school.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchoolStatus {
    /// Operating normally
    Active,
    /// Suspended by a super-admin
    Blocked,
    /// Not operating
    #[default]
    Inactive,
}

textual_enum!(SchoolStatus, "school status", {
    Active => "active",
    Blocked => "blocked",
    Inactive => "inactive",
});

/// Where a payment currently stands in the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaymentStatus {
    /// Raised, money not yet received
    #[default]
    Pending,
    /// Money received
    Completed,
    /// Provider rejected the payment
    Failed,
    /// Money returned to the payer
    Refunded,
}

textual_enum!(PaymentStatus, "payment status", {
    Pending => "pending",
    Completed => "completed",
    Failed => "failed",
    Refunded => "refunded",
});

/// Kind of client an integration serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlatformType {
    /// Phone and tablet apps
    Mobile,
    /// Browser app
    #[default]
    Web,
    /// Installed desktop app
    Desktop,
    /// Programmatic access
    Api,
}

textual_enum!(PlatformType, "platform type", {
    Mobile => "mobile",
    Web => "web",
    Desktop => "desktop",
    Api => "api",
});

/// Operational state of an integration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlatformStatus {
    /// Serving users
    Active,
    /// Switched off
    #[default]
    Inactive,
    /// Temporarily down for maintenance
    Maintenance,
}

textual_enum!(PlatformStatus, "platform status", {
    Active => "active",
    Inactive => "inactive",
    Maintenance => "maintenance",
});

/// Kind of audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Signed in
    Login,
    /// Signed out
    Logout,
    /// Changed password
    PasswordChange,
    /// Edited profile details
    ProfileUpdate,
}

textual_enum!(ActionKind, "action type", {
    Login => "login",
    Logout => "logout",
    PasswordChange => "password_change",
    ProfileUpdate => "profile_update",
});

/// One audit event owned by a person record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Store identifier
    pub id: String,
    /// What happened
    pub kind: ActionKind,
    /// When it happened
    pub timestamp: DateTime<Utc>,
    /// Human-readable description
    pub description: String,
}

/// Capacity limits agreed in a school's subscription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapacityLimits {
    /// Maximum enrolled students
    pub max_students: u32,
    /// Maximum teachers
    pub max_teachers: u32,
    /// Maximum staff members
    pub max_staff: u32,
}

/// A school snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolRecord {
    /// Store identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Tenant code
    pub code: String,
    /// Director's name, if recorded
    pub director: Option<String>,
    /// Lifecycle state
    pub status: SchoolStatus,
    /// Subscription capacity
    pub limits: CapacityLimits,
    /// Subscription plan name
    pub subscription_plan: String,
    /// When the subscription lapses
    pub subscription_expires_at: Option<DateTime<Utc>>,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Registration time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// Running payment figures of a student (or a parent's ward).
///
/// All amounts are non-negative and `paid <= total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentFigures {
    /// Amount paid so far
    pub paid: Decimal,
    /// Amount billed so far
    pub total: Decimal,
    /// Amount past due
    pub overdue: Decimal,
}

/// A student or parent row as the list screens show it.
///
/// Parent rows describe a guardian/ward pairing: `name`, `class_name`,
/// `grade`, `teachers` and `payments` are the ward's, `parent_name` is the
/// guardian's own name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonRecord {
    /// Store identifier (student id or parent id)
    pub id: String,
    /// Student name
    pub name: String,
    /// School the record belongs to
    pub school_id: String,
    /// Name of that school
    pub school_name: String,
    /// Class or group
    pub class_name: String,
    /// Grade level
    pub grade: String,
    /// Guardian name
    pub parent_name: String,
    /// Names of the teachers teaching the student
    pub teachers: Vec<String>,
    /// Payment figures
    pub payments: PaymentFigures,
    /// First day of enrollment
    pub enrollment_date: NaiveDate,
    /// Most recent sign-in of the record's owner
    pub last_login: Option<DateTime<Utc>>,
    /// Whether the owner uses the platform apps (parents only)
    pub platform_active: bool,
    /// Audit trail of the record's owner, in store order
    pub actions: Vec<Action>,
}

/// A teacher snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherRecord {
    /// Store identifier
    pub id: String,
    /// Teacher name
    pub name: String,
    /// Contact email
    pub email: String,
    /// School the teacher works at
    pub school_id: String,
    /// Name of that school
    pub school_name: String,
    /// Parents reachable through the teacher's classes
    pub total_parents: u32,
    /// Students taught
    pub total_students: u32,
    /// First day at the school
    pub enrollment_date: NaiveDate,
    /// Whether the teacher is currently teaching
    pub is_active: bool,
    /// Most recent sign-in
    pub last_login: Option<DateTime<Utc>>,
    /// Audit trail, in store order
    pub actions: Vec<Action>,
}

/// A staff member; only counted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffRecord {
    /// Store identifier
    pub id: String,
    /// School the staff member works at
    pub school_id: String,
    /// Staff member name
    pub name: String,
}

/// A payment snapshot with its display names resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentRecord {
    /// Store identifier
    pub id: String,
    /// School receiving the payment
    pub school_id: String,
    /// Name of that school
    pub school_name: String,
    /// Paying parent, if known
    pub parent_id: Option<String>,
    /// Paying parent's name, if known
    pub parent_name: Option<String>,
    /// Student the payment is for, if known
    pub student_id: Option<String>,
    /// Student's name, if known
    pub student_name: Option<String>,
    /// Non-negative amount
    pub amount: Decimal,
    /// ISO currency code
    pub currency: String,
    /// Current provider status
    pub status: PaymentStatus,
    /// What the payment is for
    pub payment_type: String,
    /// How it was paid
    pub payment_method: Option<String>,
    /// Free-form note
    pub description: Option<String>,
    /// Provider-side reference
    pub transaction_id: Option<String>,
    /// When the money arrived
    pub paid_at: Option<DateTime<Utc>>,
    /// When the payment was raised
    pub created_at: DateTime<Utc>,
}

/// A platform integration snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformRecord {
    /// Store identifier
    pub id: String,
    /// Owning school
    pub school_id: String,
    /// Name of that school, if it could be resolved
    pub school_name: Option<String>,
    /// Display name of the integration
    pub platform_name: String,
    /// Kind of client
    pub platform_type: PlatformType,
    /// Operational state
    pub status: PlatformStatus,
    /// Users active on the integration
    pub active_users_count: u64,
    /// Last synchronisation
    pub last_sync: Option<DateTime<Utc>>,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

/// The seven collections one dashboard render works from.
///
/// A collection that could not be fetched is simply empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSets {
    /// All schools
    pub schools: Vec<SchoolRecord>,
    /// All students
    pub students: Vec<PersonRecord>,
    /// All teachers
    pub teachers: Vec<TeacherRecord>,
    /// All staff members
    pub staff: Vec<StaffRecord>,
    /// All parents
    pub parents: Vec<PersonRecord>,
    /// All payments
    pub payments: Vec<PaymentRecord>,
    /// All platform integrations
    pub platforms: Vec<PlatformRecord>,
}

macro_rules! identified {
    ($($record:ty),+ $(,)?) => {
        $(impl Identified for $record {
            fn id(&self) -> &str {
                &self.id
            }
        })+
    };
}

identified!(
    SchoolRecord,
    PersonRecord,
    TeacherRecord,
    StaffRecord,
    PaymentRecord,
    PlatformRecord,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert!(matches!("Active".parse::<SchoolStatus>(), Ok(SchoolStatus::Active)));
        assert!(matches!(" COMPLETED ".parse::<PaymentStatus>(), Ok(PaymentStatus::Completed)));
        assert!(matches!("password_change".parse::<ActionKind>(), Ok(ActionKind::PasswordChange)));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result = "archived".parse::<SchoolStatus>();
        assert!(matches!(
            result,
            Err(Error::InvalidValue { kind: "school status", .. })
        ));
    }

    #[test]
    fn test_display_matches_store_text() {
        assert_eq!(PlatformType::Api.to_string(), "api");
        assert_eq!(PlatformStatus::Maintenance.to_string(), "maintenance");
        assert_eq!(PaymentStatus::Refunded.as_str(), "refunded");
    }

    #[test]
    fn test_all_lists_every_variant() {
        assert_eq!(PlatformType::ALL.len(), 4);
        assert_eq!(PaymentStatus::ALL.len(), 4);
        assert_eq!(SchoolStatus::ALL.len(), 3);
    }
}
