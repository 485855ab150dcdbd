//! Teacher entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Teacher database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// School the teacher works at
    pub school_id: String,
    /// Identity row holding the teacher's name and email
    pub user_id: String,
    /// Number of parents reachable through the teacher's classes
    pub total_parents: Option<i32>,
    /// Number of students taught
    pub total_students: Option<i32>,
    /// Whether the teacher is currently teaching
    pub is_active: Option<bool>,
    /// First day at the school
    pub enrollment_date: Option<Date>,
    /// Most recent successful sign-in
    pub last_login: Option<DateTimeUtc>,
}

/// `Teacher` has no declared relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
