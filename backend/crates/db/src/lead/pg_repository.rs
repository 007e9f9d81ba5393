use async_trait::async_trait;
use chrono::Utc;
use profileera_common::error::{ProfileEraError, ProfileEraResult};
use profileera_common::validation::NewLead;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::lead::models::Lead;
use crate::lead::repositories::LeadRepository;

const LEAD_COLUMNS: &str = "id, name, contact, linkedin, naukri, created_at";

#[derive(Clone)]
pub struct PgLeadRepository {
    pool: PgPool,
}

impl PgLeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: PgRow) -> Lead {
        Lead {
            id: row.get("id"),
            name: row.get("name"),
            contact: row.get("contact"),
            linkedin: row.get("linkedin"),
            naukri: row.get("naukri"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl LeadRepository for PgLeadRepository {
    async fn create(&self, lead: NewLead) -> ProfileEraResult<Lead> {
        let row = sqlx::query(&format!(
            "insert into leads (id, name, contact, linkedin, naukri, created_at)
             values ($1, $2, $3, $4, $5, $6)
             returning {LEAD_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(lead.name())
        .bind(lead.contact())
        .bind(lead.linkedin())
        .bind(lead.naukri())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ProfileEraError::Database(e.to_string()))?;

        Ok(Self::map_row(row))
    }

    async fn list(&self) -> ProfileEraResult<Vec<Lead>> {
        let rows = sqlx::query(&format!(
            "select {LEAD_COLUMNS} from leads order by created_at desc, id desc"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProfileEraError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::map_row).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> ProfileEraResult<Option<Lead>> {
        let row = sqlx::query(&format!("select {LEAD_COLUMNS} from leads where id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ProfileEraError::Database(e.to_string()))?;

        Ok(row.map(Self::map_row))
    }

    async fn delete(&self, id: Uuid) -> ProfileEraResult<bool> {
        let result = sqlx::query("delete from leads where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ProfileEraError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
