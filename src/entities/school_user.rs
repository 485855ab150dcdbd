//! School user entity - The identity row behind every student, teacher,
//! staff member and parent. Names and emails live here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// School user database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "school_users")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// School this user belongs to
    pub school_id: String,
    /// `"student"`, `"teacher"`, `"staff"`, `"parent"` or `"admin"`
    pub user_type: String,
    /// Full display name
    pub full_name: String,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Account status as text
    pub status: Option<String>,
    /// When the account was created
    pub created_at: DateTimeUtc,
    /// When the account was last modified
    pub updated_at: DateTimeUtc,
}

/// `SchoolUser` has no declared relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
