use async_trait::async_trait;
use profileera_common::error::ProfileEraResult;
use profileera_common::validation::NewLead;
use uuid::Uuid;

use crate::lead::models::Lead;

#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Persist a validated lead, assigning its id and creation time.
    async fn create(&self, lead: NewLead) -> ProfileEraResult<Lead>;

    /// All leads, newest first.
    async fn list(&self) -> ProfileEraResult<Vec<Lead>>;

    async fn get_by_id(&self, id: Uuid) -> ProfileEraResult<Option<Lead>>;

    /// Returns `false` when no lead had this id.
    async fn delete(&self, id: Uuid) -> ProfileEraResult<bool>;
}
