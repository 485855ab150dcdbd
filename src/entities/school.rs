//! School entity - One tenant of the platform.
//!
//! Status is stored as free text (`"active"`, `"blocked"`, `"inactive"`); the
//! store enforces uniqueness of `code`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// School database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schools")]
pub struct Model {
    /// Unique identifier (UUID text)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name of the school
    pub name: String,
    /// Short tenant code, unique across the platform
    #[sea_orm(unique)]
    pub code: String,
    /// Name of the school's director, if recorded
    pub director: Option<String>,
    /// Lifecycle status as text
    pub status: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Maximum number of enrolled students
    pub max_students: Option<i32>,
    /// Maximum number of teachers
    pub max_teachers: Option<i32>,
    /// Maximum number of staff members
    pub max_staff: Option<i32>,
    /// Subscription plan name (e.g. `"basic"`)
    pub subscription_plan: Option<String>,
    /// When the current subscription lapses
    pub subscription_expires_at: Option<DateTimeUtc>,
    /// When the school was registered
    pub created_at: DateTimeUtc,
    /// When the school was last modified
    pub updated_at: DateTimeUtc,
}

/// Schools are joined in memory, so no relations are declared
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
