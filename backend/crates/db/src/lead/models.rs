use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored lead. Immutable once written; the only mutation is deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub contact: String,
    pub linkedin: Option<String>,
    pub naukri: Option<String>,
    pub created_at: DateTime<Utc>,
}
