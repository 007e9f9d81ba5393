use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use profileera_common::error::{ProfileEraError, ProfileEraResult};
use profileera_common::validation::NewLead;
use profileera_config::AppConfig;
use profileera_db::lead::models::Lead;
use profileera_db::lead::repositories::LeadRepository;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::auth::AdminSecrets;
use crate::notify::LeadNotifier;
use crate::AppState;

pub const TEST_EMAIL: &str = "admin@profileera.in";
pub const TEST_PASSWORD: &str = "s3cret";
pub const TEST_API_KEY: &str = "test-api-key";

pub fn test_state(leads: Arc<dyn LeadRepository>, notifier: Arc<dyn LeadNotifier>) -> AppState {
    AppState {
        leads,
        notifier,
        admin: Arc::new(AdminSecrets::new(TEST_EMAIL, TEST_PASSWORD, TEST_API_KEY)),
    }
}

pub fn test_config() -> AppConfig {
    let vars = HashMap::from([
        ("PORT", "5000"),
        ("DATABASE_URL", "postgres://localhost/profileera_test"),
        ("ADMIN_API_KEY", TEST_API_KEY),
        ("ADMIN_PASSWORD", TEST_PASSWORD),
        ("ADMIN_EMAIL", TEST_EMAIL),
        ("ALLOWED_ORIGINS", "https://profileera.in"),
        ("EMAIL_USER", "mailer@profileera.in"),
        ("EMAIL_PASS", "app-password"),
    ]);
    AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).expect("test config")
}

pub fn sample_lead(name: &str, contact: &str) -> Lead {
    Lead {
        id: Uuid::new_v4(),
        name: name.to_string(),
        contact: contact.to_string(),
        linkedin: None,
        naukri: None,
        created_at: Utc::now(),
    }
}

#[derive(Default)]
pub struct InMemoryLeadRepository {
    leads: Mutex<Vec<Lead>>,
    broken: bool,
}

impl InMemoryLeadRepository {
    /// Every call fails as if the database were unreachable.
    pub fn failing() -> Self {
        Self {
            leads: Mutex::default(),
            broken: true,
        }
    }

    pub fn len(&self) -> usize {
        self.leads.lock().unwrap().len()
    }

    /// Seed a lead created `minutes_ago` minutes in the past.
    pub fn insert_at(&self, name: &str, contact: &str, minutes_ago: i64) -> Lead {
        let mut lead = sample_lead(name, contact);
        lead.created_at = Utc::now() - Duration::minutes(minutes_ago);
        self.leads.lock().unwrap().push(lead.clone());
        lead
    }

    fn check(&self) -> ProfileEraResult<()> {
        if self.broken {
            return Err(ProfileEraError::Database("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl LeadRepository for InMemoryLeadRepository {
    async fn create(&self, lead: NewLead) -> ProfileEraResult<Lead> {
        self.check()?;
        let stored = Lead {
            id: Uuid::new_v4(),
            name: lead.name().to_string(),
            contact: lead.contact().to_string(),
            linkedin: lead.linkedin().map(str::to_string),
            naukri: lead.naukri().map(str::to_string),
            created_at: Utc::now(),
        };
        self.leads.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> ProfileEraResult<Vec<Lead>> {
        self.check()?;
        let mut leads = self.leads.lock().unwrap().clone();
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(leads)
    }

    async fn get_by_id(&self, id: Uuid) -> ProfileEraResult<Option<Lead>> {
        self.check()?;
        Ok(self
            .leads
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> ProfileEraResult<bool> {
        self.check()?;
        let mut leads = self.leads.lock().unwrap();
        let before = leads.len();
        leads.retain(|l| l.id != id);
        Ok(leads.len() < before)
    }
}

/// Forwards every notified lead to a channel.
pub struct RecordingNotifier {
    tx: mpsc::UnboundedSender<Lead>,
}

impl RecordingNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Lead>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl LeadNotifier for RecordingNotifier {
    async fn notify(&self, lead: &Lead) -> ProfileEraResult<()> {
        let _ = self.tx.send(lead.clone());
        Ok(())
    }
}

pub struct FailingNotifier;

#[async_trait]
impl LeadNotifier for FailingNotifier {
    async fn notify(&self, _lead: &Lead) -> ProfileEraResult<()> {
        Err(ProfileEraError::Mail("smtp relay unreachable".to_string()))
    }
}
