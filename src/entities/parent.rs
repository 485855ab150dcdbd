//! Parent entity - A guardian account, optionally linked to the student
//! it is responsible for.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Parent database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parents")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// School the parent's ward attends
    pub school_id: String,
    /// Identity row holding the parent's name
    pub user_id: String,
    /// The ward, if linked
    pub student_id: Option<String>,
    /// Whether the parent uses the platform apps
    pub platform_active: Option<bool>,
}

/// `Parent` has no declared relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
