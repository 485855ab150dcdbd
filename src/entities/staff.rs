//! Staff entity - Administrative staff; only counted, never listed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Staff database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// School the staff member works at
    pub school_id: String,
    /// Identity row holding the staff member's name
    pub user_id: String,
}

/// `Staff` has no declared relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
