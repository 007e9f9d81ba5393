use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ProfileEraError;
use crate::types::LeadSubmission;

pub const NAME_REQUIRED: &str = "Name is required";
pub const NAME_INVALID: &str = "Name can only contain alphabets and spaces";
pub const CONTACT_REQUIRED: &str = "Contact number is required";
pub const CONTACT_INVALID: &str = "Contact number must be exactly 10 digits";
pub const URL_INVALID: &str = "Please enter a valid URL";

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("name pattern compiles"));

// ASCII digits only; `\d` would also accept other Unicode digits.
static CONTACT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("contact pattern compiles"));

static URL_WWW_WITH_SCHEME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://www\.[a-zA-Z0-9][a-zA-Z0-9-]+[a-zA-Z0-9]\.\S{2,}$")
        .expect("url pattern compiles")
});

static URL_HOST_WITH_SCHEME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://([a-zA-Z0-9][a-zA-Z0-9-]+[a-zA-Z0-9])\.\S{2,}$")
        .expect("url pattern compiles")
});

static URL_BARE_WWW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^www\.[a-zA-Z0-9][a-zA-Z0-9-]+[a-zA-Z0-9]\.\S{2,}$")
        .expect("url pattern compiles")
});

static URL_SHORT_HOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[a-zA-Z0-9]+\.\S{2,}$").expect("url pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadField {
    Name,
    Contact,
    Linkedin,
    Naukri,
}

impl LeadField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Contact => "contact",
            Self::Linkedin => "linkedin",
            Self::Naukri => "naukri",
        }
    }
}

/// Per-field validation messages, serialized as `{"name": "...", ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<LeadField, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: LeadField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: LeadField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LeadField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {message}", field.as_str())?;
            first = false;
        }
        Ok(())
    }
}

impl From<FieldErrors> for ProfileEraError {
    fn from(errors: FieldErrors) -> Self {
        ProfileEraError::InvalidLead(errors)
    }
}

/// A submission that passed every field rule. Only [`validate`] builds one,
/// so anything handed to the store has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    name: String,
    contact: String,
    linkedin: Option<String>,
    naukri: Option<String>,
}

impl NewLead {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn linkedin(&self) -> Option<&str> {
        self.linkedin.as_deref()
    }

    pub fn naukri(&self) -> Option<&str> {
        self.naukri.as_deref()
    }
}

pub fn check_name(value: Option<&str>) -> Result<&str, &'static str> {
    match value {
        None => Err(NAME_REQUIRED),
        Some("") => Err(NAME_REQUIRED),
        Some(v) if NAME_PATTERN.is_match(v) => Ok(v),
        Some(_) => Err(NAME_INVALID),
    }
}

pub fn check_contact(value: Option<&str>) -> Result<&str, &'static str> {
    match value {
        None => Err(CONTACT_REQUIRED),
        Some("") => Err(CONTACT_REQUIRED),
        Some(v) if CONTACT_PATTERN.is_match(v) => Ok(v),
        Some(_) => Err(CONTACT_INVALID),
    }
}

/// Blank means "not provided" and passes; anything else must look like a URL.
pub fn check_optional_url(value: Option<&str>) -> Result<Option<&str>, &'static str> {
    match value {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => Ok(None),
        Some(v) if is_url_like(v) => Ok(Some(v)),
        Some(_) => Err(URL_INVALID),
    }
}

pub fn is_url_like(value: &str) -> bool {
    if URL_WWW_WITH_SCHEME.is_match(value)
        || URL_BARE_WWW.is_match(value)
        || URL_SHORT_HOST.is_match(value)
    {
        return true;
    }

    // A scheme-prefixed host starting with "www" must go through the "www." rule.
    URL_HOST_WITH_SCHEME
        .captures(value)
        .and_then(|caps| caps.get(1))
        .is_some_and(|host| !host.as_str().starts_with("www"))
}

/// Runs every field rule and collects all failures at once.
pub fn validate(submission: &LeadSubmission) -> Result<NewLead, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = check_name(submission.name.as_deref())
        .map_err(|msg| errors.insert(LeadField::Name, msg))
        .ok();
    let contact = check_contact(submission.contact.as_deref())
        .map_err(|msg| errors.insert(LeadField::Contact, msg))
        .ok();
    let linkedin = check_optional_url(submission.linkedin.as_deref())
        .map_err(|msg| errors.insert(LeadField::Linkedin, msg))
        .ok();
    let naukri = check_optional_url(submission.naukri.as_deref())
        .map_err(|msg| errors.insert(LeadField::Naukri, msg))
        .ok();

    match (name, contact, linkedin, naukri) {
        (Some(name), Some(contact), Some(linkedin), Some(naukri)) => Ok(NewLead {
            name: name.to_owned(),
            contact: contact.to_owned(),
            linkedin: linkedin.map(str::to_owned),
            naukri: naukri.map(str::to_owned),
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, contact: &str) -> LeadSubmission {
        LeadSubmission {
            name: Some(name.to_owned()),
            contact: Some(contact.to_owned()),
            linkedin: None,
            naukri: None,
        }
    }

    #[test]
    fn accepts_minimal_valid_submission() {
        let lead = validate(&submission("Asha Rao", "9876543210")).expect("valid");
        assert_eq!(lead.name(), "Asha Rao");
        assert_eq!(lead.contact(), "9876543210");
        assert!(lead.linkedin().is_none());
        assert!(lead.naukri().is_none());
    }

    #[test]
    fn rejects_digit_in_name_and_short_contact() {
        let errors = validate(&submission("A1", "123")).expect_err("invalid");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(LeadField::Name), Some(NAME_INVALID));
        assert_eq!(errors.get(LeadField::Contact), Some(CONTACT_INVALID));
    }

    #[test]
    fn missing_fields_report_required() {
        let errors = validate(&LeadSubmission::default()).expect_err("invalid");
        assert_eq!(errors.get(LeadField::Name), Some(NAME_REQUIRED));
        assert_eq!(errors.get(LeadField::Contact), Some(CONTACT_REQUIRED));
        assert!(errors.get(LeadField::Linkedin).is_none());
    }

    #[test]
    fn whitespace_only_name_passes_pattern() {
        let lead =
            validate(&submission("   ", "9876543210")).expect("spaces match the name pattern");
        assert_eq!(lead.name(), "   ");
        assert_eq!(check_name(Some("")), Err(NAME_REQUIRED));
    }

    #[test]
    fn blank_contact_is_format_error() {
        assert_eq!(check_contact(Some("  ")), Err(CONTACT_INVALID));
        assert_eq!(check_contact(Some("")), Err(CONTACT_REQUIRED));
        assert_eq!(check_contact(None), Err(CONTACT_REQUIRED));
    }

    #[test]
    fn name_rejects_symbols() {
        assert_eq!(check_name(Some("Asha-Rao")), Err(NAME_INVALID));
        assert_eq!(check_name(Some("Asha_Rao")), Err(NAME_INVALID));
        assert_eq!(check_name(Some("Asha Rao")), Ok("Asha Rao"));
    }

    #[test]
    fn contact_requires_exactly_ten_ascii_digits() {
        assert!(check_contact(Some("0123456789")).is_ok());
        assert_eq!(check_contact(Some("987654321")), Err(CONTACT_INVALID));
        assert_eq!(check_contact(Some("98765432101")), Err(CONTACT_INVALID));
        assert_eq!(check_contact(Some("98765-43210")), Err(CONTACT_INVALID));
        // Arabic-Indic digits
        assert_eq!(
            check_contact(Some("\u{0660}\u{0661}\u{0662}\u{0663}\u{0664}\u{0665}\u{0666}\u{0667}\u{0668}\u{0669}")),
            Err(CONTACT_INVALID)
        );
    }

    #[test]
    fn url_forms_accepted() {
        for url in [
            "https://www.linkedin.com/in/asha-rao",
            "http://linkedin.com/in/asha",
            "www.naukri.com/profile/asha",
            "https://t.co/abc",
            "https://wwwx.io",
        ] {
            assert!(is_url_like(url), "expected {url} to be accepted");
        }
    }

    #[test]
    fn url_forms_rejected() {
        for url in [
            "linkedin.com/in/asha",
            "not a url",
            "https://",
            "ftp://files.example.com",
            "https://www.linkedin.com/in/asha rao",
            "https://wwwlinkedin-x.com",
        ] {
            assert!(!is_url_like(url), "expected {url} to be rejected");
        }
    }

    #[test]
    fn blank_url_means_not_provided() {
        let mut sub = submission("Asha Rao", "9876543210");
        sub.linkedin = Some(String::new());
        sub.naukri = Some("  ".to_owned());
        let lead = validate(&sub).expect("valid");
        assert!(lead.linkedin().is_none());
        assert!(lead.naukri().is_none());
    }

    #[test]
    fn bad_url_reports_only_that_field() {
        let mut sub = submission("Asha Rao", "9876543210");
        sub.naukri = Some("naukri profile".to_owned());
        let errors = validate(&sub).expect_err("invalid");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(LeadField::Naukri), Some(URL_INVALID));
    }

    #[test]
    fn field_errors_serialize_by_field_name() {
        let errors = validate(&submission("A1", "123")).expect_err("invalid");
        let json = serde_json::to_value(&errors).expect("serialize");
        assert_eq!(json["name"], NAME_INVALID);
        assert_eq!(json["contact"], CONTACT_INVALID);
    }
}
