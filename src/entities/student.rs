//! Student entity - Enrollment row linking a school user to a class,
//! a parent and the student's running payment figures.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Student database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// School the student is enrolled in
    pub school_id: String,
    /// Identity row holding the student's name
    pub user_id: String,
    /// Class or group (e.g. `"A"`)
    pub class_name: Option<String>,
    /// Grade level (e.g. `"10º Ano"`)
    pub grade: Option<String>,
    /// Parent responsible for the student, if linked
    pub parent_id: Option<String>,
    /// Amount paid so far
    pub paid_payments: Option<Decimal>,
    /// Amount billed so far
    pub total_payments: Option<Decimal>,
    /// Amount past due
    pub overdue_payments: Option<Decimal>,
    /// First day of enrollment
    pub enrollment_date: Option<Date>,
    /// Most recent successful sign-in
    pub last_login: Option<DateTimeUtc>,
}

/// Students are joined in memory, so no relations are declared
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
