use std::time::Duration;

use profileera_common::types::{
    LeadCreatedResponse, LeadSubmission, LeadView, LoginRequest, LoginResponse, MessageResponse,
};
use profileera_common::validation::{validate, FieldErrors};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

const ADMIN_KEY_HEADER: &str = "x-admin-api-key";

#[derive(Debug, Clone)]
pub struct ConsoleClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Clone)]
pub struct ConsoleClient {
    client: Client,
    config: ConsoleClientConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("lead rejected: {0}")]
    InvalidLead(FieldErrors),

    #[error("HTTP {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("an admin API key is required; pass --api-key or set PROFILEERA_API_KEY")]
    MissingApiKey,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    fields: Option<FieldErrors>,
}

impl ConsoleClient {
    pub fn new(config: ConsoleClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn admin(&self, builder: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ClientError::MissingApiKey)?;
        Ok(builder.header(ADMIN_KEY_HEADER, key))
    }

    /// Submit the lead form. The same field rules as the server run first so
    /// an obviously bad form never leaves the machine.
    pub async fn submit_lead(
        &self,
        submission: &LeadSubmission,
    ) -> Result<LeadCreatedResponse, ClientError> {
        validate(submission).map_err(ClientError::InvalidLead)?;

        let resp = self
            .client
            .post(self.url("/api/leads"))
            .json(submission)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        };
        let resp = self
            .client
            .post(self.url("/api/admin/login"))
            .json(&body)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn verify(&self) -> Result<MessageResponse, ClientError> {
        let resp = self
            .admin(self.client.get(self.url("/api/admin/verify")))?
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn list_leads(&self) -> Result<Vec<LeadView>, ClientError> {
        let resp = self
            .admin(self.client.get(self.url("/api/admin/leads")))?
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn get_lead(&self, id: &str) -> Result<LeadView, ClientError> {
        let resp = self
            .admin(self.client.get(self.url(&format!("/api/admin/leads/{id}"))))?
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn delete_lead(&self, id: &str) -> Result<MessageResponse, ClientError> {
        let resp = self
            .admin(self.client.delete(self.url(&format!("/api/admin/leads/{id}"))))?
            .send()
            .await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<T>().await?);
    }

    let body: ErrorBody = resp.json().await.unwrap_or_default();
    if status == StatusCode::BAD_REQUEST {
        if let Some(fields) = body.fields.filter(|f| !f.is_empty()) {
            return Err(ClientError::InvalidLead(fields));
        }
    }

    Err(ClientError::Api {
        status,
        message: body.error.unwrap_or_else(|| status.to_string()),
    })
}
