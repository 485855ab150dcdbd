//! Dashboard statistics.
//!
//! [`aggregate`] turns the seven fetched collections into the figures the
//! dashboard shows. It is a pure function of its input: a collection that
//! failed to load arrives empty and simply contributes zeros.

use super::payments::payment_breakdown;
use super::schools::school_status_counts;
use crate::records::{PlatformStatus, RecordSets};
use rust_decimal::Decimal;

/// Summary figures for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of schools
    pub total_schools: usize,
    /// Schools with status `active`
    pub active_schools: usize,
    /// Schools with status `blocked`
    pub blocked_schools: usize,
    /// Number of students
    pub total_students: usize,
    /// Number of teachers
    pub total_teachers: usize,
    /// Number of staff members
    pub total_staff: usize,
    /// Number of parent rows
    pub total_parents: usize,
    /// Parents using the platform apps
    pub active_parents: usize,
    /// Number of payments
    pub total_payments: usize,
    /// Payments with status `completed`
    pub completed_payments: usize,
    /// Sum of completed payment amounts
    pub total_revenue: Decimal,
    /// Sum of pending payment amounts
    pub pending_revenue: Decimal,
    /// Integrations with status `active`
    pub active_platforms: usize,
}

impl Stats {
    /// Payments that have not completed (pending, failed or refunded).
    #[must_use]
    pub const fn outstanding_payments(&self) -> usize {
        self.total_payments.saturating_sub(self.completed_payments)
    }
}

/// Derives dashboard statistics from a full set of record collections.
#[must_use]
pub fn aggregate(records: &RecordSets) -> Stats {
    let schools = school_status_counts(&records.schools);
    let payments = payment_breakdown(&records.payments);

    Stats {
        total_schools: schools.total,
        active_schools: schools.active,
        blocked_schools: schools.blocked,
        total_students: records.students.len(),
        total_teachers: records.teachers.len(),
        total_staff: records.staff.len(),
        total_parents: records.parents.len(),
        active_parents: records
            .parents
            .iter()
            .filter(|parent| parent.platform_active)
            .count(),
        total_payments: payments.total,
        completed_payments: payments.completed,
        total_revenue: payments.total_revenue,
        pending_revenue: payments.pending_revenue,
        active_platforms: records
            .platforms
            .iter()
            .filter(|platform| platform.status == PlatformStatus::Active)
            .count(),
    }
}
