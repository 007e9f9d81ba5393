use thiserror::Error;

use crate::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum ProfileEraError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid lead: {0}")]
    InvalidLead(FieldErrors),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("mail error: {0}")]
    Mail(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ProfileEraResult<T> = Result<T, ProfileEraError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::LeadField;

    #[test]
    fn invalid_lead_display_lists_fields() {
        let mut fields = FieldErrors::default();
        fields.insert(LeadField::Contact, "Contact number is required");
        fields.insert(LeadField::Name, "Name is required");

        let err = ProfileEraError::InvalidLead(fields);
        assert_eq!(
            err.to_string(),
            "invalid lead: name: Name is required; contact: Contact number is required"
        );
    }

    #[test]
    fn config_error_display() {
        let err = ProfileEraError::Config("PORT is required but not set".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: PORT is required but not set"
        );
    }
}
