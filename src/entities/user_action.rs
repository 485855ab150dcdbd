//! User action entity - Append-only audit trail of account events.
//!
//! Each row is owned by one school user (`user_id`); the console reads the
//! trail to show a person's recent activity and never writes to it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User action database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_actions")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owner of the event
    pub user_id: String,
    /// `"login"`, `"logout"`, `"password_change"` or `"profile_update"`
    pub action_type: Option<String>,
    /// When the event happened
    pub occurred_at: DateTimeUtc,
    /// Human-readable description
    pub description: Option<String>,
}

/// `UserAction` has no declared relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
