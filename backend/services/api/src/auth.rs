use std::fmt;

use profileera_config::AppConfig;
use subtle::ConstantTimeEq;

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const INVALID_API_KEY: &str = "Unauthorized: Invalid API Key";

/// Admin secrets, compared by value on every privileged request. There is no
/// session table: rotating `ADMIN_API_KEY` is the only way to revoke access.
#[derive(Clone)]
pub struct AdminSecrets {
    email: String,
    password: String,
    api_key: String,
}

impl AdminSecrets {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.admin_email.clone(),
            config.admin_password.clone(),
            config.admin_api_key.clone(),
        )
    }

    /// Both fields are always compared so a wrong email costs the same as a
    /// wrong password.
    pub fn credentials_match(&self, email: &str, password: &str) -> bool {
        let email_ok = constant_time_eq(email.as_bytes(), self.email.as_bytes());
        let password_ok = constant_time_eq(password.as_bytes(), self.password.as_bytes());
        email_ok & password_ok
    }

    pub fn key_matches(&self, presented: &[u8]) -> bool {
        constant_time_eq(presented, self.api_key.as_bytes())
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for AdminSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSecrets")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
