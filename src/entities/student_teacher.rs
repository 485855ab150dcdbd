//! Link table between students and the teachers who teach them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Student/teacher link database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student_teachers")]
pub struct Model {
    /// The taught student
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: String,
    /// The teaching teacher
    #[sea_orm(primary_key, auto_increment = false)]
    pub teacher_id: String,
}

/// `StudentTeacher` has no declared relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
