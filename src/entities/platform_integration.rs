//! Platform integration entity - A client app (mobile, web, desktop or API)
//! a school has connected to the platform.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Platform integration database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "platform_integrations")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// School owning the integration
    pub school_id: String,
    /// Display name of the integration
    pub platform_name: String,
    /// `"mobile"`, `"web"`, `"desktop"` or `"api"`
    pub platform_type: Option<String>,
    /// `"active"`, `"inactive"` or `"maintenance"`
    pub status: Option<String>,
    /// Users active on this integration
    pub active_users_count: Option<i64>,
    /// When the integration last synchronised
    pub last_sync: Option<DateTimeUtc>,
    /// When the integration was registered
    pub created_at: DateTimeUtc,
}

/// `PlatformIntegration` has no declared relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
