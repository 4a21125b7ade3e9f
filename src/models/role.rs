//! Role model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Role database model
///
/// A role is just a unique name: an open tag, not a closed enum. Roles are
/// created lazily the first time they are assigned.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
}
