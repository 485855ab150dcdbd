//! Payment screen summaries.
//!
//! Revenue figures are exact decimal sums; an empty selection sums to zero.

use super::filter::{Needle, Searchable};
use crate::records::{PaymentRecord, PaymentStatus};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Payment counts by status plus revenue sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentBreakdown {
    /// All payments
    pub total: usize,
    /// Payments with status `completed`
    pub completed: usize,
    /// Payments with status `pending`
    pub pending: usize,
    /// Payments with status `failed`
    pub failed: usize,
    /// Payments with status `refunded`
    pub refunded: usize,
    /// Sum of completed amounts
    pub total_revenue: Decimal,
    /// Sum of pending amounts
    pub pending_revenue: Decimal,
}

impl PaymentBreakdown {
    /// Percentage of payments that completed, to one decimal place.
    ///
    /// An empty set has a rate of zero.
    #[must_use]
    pub fn success_rate(&self) -> Decimal {
        if self.total == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(self.completed) * Decimal::ONE_HUNDRED / Decimal::from(self.total))
            .round_dp(1)
    }
}

/// Counts payments by status and sums completed and pending amounts.
///
/// Sums saturate at [`Decimal::MAX`] instead of overflowing.
#[must_use]
pub fn payment_breakdown(payments: &[PaymentRecord]) -> PaymentBreakdown {
    payments
        .iter()
        .fold(PaymentBreakdown::default(), |mut summary, payment| {
            summary.total += 1;
            match payment.status {
                PaymentStatus::Completed => {
                    summary.completed += 1;
                    summary.total_revenue = summary.total_revenue.saturating_add(payment.amount);
                }
                PaymentStatus::Pending => {
                    summary.pending += 1;
                    summary.pending_revenue =
                        summary.pending_revenue.saturating_add(payment.amount);
                }
                PaymentStatus::Failed => summary.failed += 1,
                PaymentStatus::Refunded => summary.refunded += 1,
            }
            summary
        })
}

/// Sum of completed payment amounts.
#[must_use]
pub fn total_revenue(payments: &[PaymentRecord]) -> Decimal {
    payment_breakdown(payments).total_revenue
}

/// The payments screen's status dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// No status restriction
    #[default]
    All,
    /// Only payments in this status
    Only(PaymentStatus),
}

impl StatusFilter {
    /// Whether `payment` passes the filter
    #[must_use]
    pub fn admits(self, payment: &PaymentRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => payment.status == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = crate::errors::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

/// Payments matching both the text search and the status filter, in input order.
#[must_use]
pub fn filter_payments_by(
    payments: &[PaymentRecord],
    query: &str,
    status: StatusFilter,
) -> Vec<PaymentRecord> {
    let needle = Needle::new(query);
    payments
        .iter()
        .filter(|payment| status.admits(payment))
        .filter(|payment| needle.matches(*payment, PaymentRecord::SEARCH_FIELDS))
        .cloned()
        .collect()
}
