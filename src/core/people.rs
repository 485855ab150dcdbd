//! Per-person derived values shown in list rows and detail modals.

use crate::records::{Action, PaymentFigures};

/// Payment badge shown next to a student or parent row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStanding {
    /// Something is past due
    Overdue,
    /// Everything billed has been paid
    UpToDate,
    /// Partly paid, nothing past due
    Partial,
}

impl PaymentStanding {
    /// Badge text
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overdue => "Overdue",
            Self::UpToDate => "Up to date",
            Self::Partial => "Partial",
        }
    }
}

/// Overdue wins over everything; otherwise fully paid is up to date.
#[must_use]
pub fn payment_standing(figures: &PaymentFigures) -> PaymentStanding {
    if figures.overdue > rust_decimal::Decimal::ZERO {
        PaymentStanding::Overdue
    } else if figures.paid == figures.total {
        PaymentStanding::UpToDate
    } else {
        PaymentStanding::Partial
    }
}

/// Actions newest first, optionally capped at `limit`.
///
/// Actions sharing a timestamp keep their stored order.
#[must_use]
pub fn recent_actions(actions: &[Action], limit: Option<usize>) -> Vec<&Action> {
    let mut ordered: Vec<&Action> = actions.iter().collect();
    ordered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    if let Some(limit) = limit {
        ordered.truncate(limit);
    }
    ordered
}
