//! Payment entity - Money owed to or collected by a school.
//!
//! Payments reference a school and optionally the parent who paid and the
//! student it was for. Status transitions happen in the payment provider; the
//! console only reads the current `status`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// School receiving the payment
    pub school_id: String,
    /// Parent who paid, if known
    pub parent_id: Option<String>,
    /// Student the payment was for, if known
    pub student_id: Option<String>,
    /// Amount in `currency`
    pub amount: Option<Decimal>,
    /// ISO currency code (e.g. `"AOA"`)
    pub currency: Option<String>,
    /// What the payment is for (e.g. `"tuition"`)
    pub payment_type: Option<String>,
    /// How it was paid (e.g. `"card"`)
    pub payment_method: Option<String>,
    /// `"pending"`, `"completed"`, `"failed"` or `"refunded"`
    pub status: Option<String>,
    /// Free-form note
    pub description: Option<String>,
    /// Provider-side reference
    pub transaction_id: Option<String>,
    /// When the money arrived
    pub paid_at: Option<DateTimeUtc>,
    /// When the payment was raised
    pub created_at: DateTimeUtc,
}

/// `Payment` has no declared relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
