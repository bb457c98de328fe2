use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use zeroize::Zeroize;

pub const PASSWORD_MIN_LEN: usize = 8;

/// Step 1 of the sign-up wizard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BioInfo {
    pub first_name: String,
    pub last_name: String,
    pub ghana_card: String,
    pub date_of_birth: Option<NaiveDate>,
    pub hometown: String,
    pub email: String,
}

/// Step 2 of the sign-up wizard. `fingerprint` and `image` are capture
/// placeholders: never editable, never validated.
#[derive(Debug, Clone, Default)]
pub struct SecurityInfo {
    pub username: String,
    pub password: String,
    pub fingerprint: String,
    pub image: String,
}

impl Drop for SecurityInfo {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Field name -> message for every field that failed, in form order. Rebuilt
/// from scratch on every validation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(name, _)| *name)
    }

    fn insert(&mut self, field: &'static str, message: &str) {
        self.0.push((field, message.to_string()));
    }

    fn require(&mut self, field: &'static str, value: &str, message: &str) {
        if value.is_empty() {
            self.insert(field, message);
        }
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

pub fn validate_bio(info: &BioInfo) -> FieldErrors {
    let mut errors = FieldErrors::default();
    errors.require("firstName", &info.first_name, "First name is required");
    errors.require("lastName", &info.last_name, "Last name is required");
    errors.require("ghanaCard", &info.ghana_card, "Ghana Card number is required");
    if info.date_of_birth.is_none() {
        errors.insert("dateOfBirth", "Date of birth is required");
    }
    errors.require("hometown", &info.hometown, "Hometown is required");
    if info.email.is_empty() {
        errors.insert("email", "Email is required");
    } else if !is_valid_email(&info.email) {
        errors.insert("email", "Please enter a valid email address");
    }
    errors
}

pub fn validate_security(info: &SecurityInfo) -> FieldErrors {
    let mut errors = FieldErrors::default();
    errors.require("username", &info.username, "Username is required");
    if info.password.is_empty() {
        errors.insert("password", "Password is required");
    } else if info.password.chars().count() < PASSWORD_MIN_LEN {
        errors.insert("password", "Password must be at least 8 characters long");
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_bio() -> BioInfo {
        BioInfo {
            first_name: "Kwame".into(),
            last_name: "Mensah".into(),
            ghana_card: "GHA-000111222-3".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1994, 7, 1),
            hometown: "Kumasi".into(),
            email: "kwame@example.com".into(),
        }
    }

    fn security(username: &str, password: &str) -> SecurityInfo {
        SecurityInfo {
            username: username.into(),
            password: password.into(),
            fingerprint: String::new(),
            image: String::new(),
        }
    }

    #[test]
    fn complete_bio_passes() {
        assert!(validate_bio(&complete_bio()).is_empty());
    }

    #[test]
    fn each_missing_field_yields_exactly_one_error() {
        let cases: Vec<(&str, fn(&mut BioInfo))> = vec![
            ("firstName", |b| b.first_name.clear()),
            ("lastName", |b| b.last_name.clear()),
            ("ghanaCard", |b| b.ghana_card.clear()),
            ("dateOfBirth", |b| b.date_of_birth = None),
            ("hometown", |b| b.hometown.clear()),
            ("email", |b| b.email.clear()),
        ];
        for (field, clear) in cases {
            let mut bio = complete_bio();
            clear(&mut bio);
            let errors = validate_bio(&bio);
            assert_eq!(errors.len(), 1, "clearing {field}");
            assert!(errors.get(field).is_some(), "clearing {field}");
        }
    }

    #[test]
    fn whitespace_only_counts_as_present() {
        let mut bio = complete_bio();
        bio.hometown = "  ".into();
        assert!(validate_bio(&bio).is_empty());
    }

    #[test]
    fn empty_bio_reports_every_field() {
        let errors = validate_bio(&BioInfo::default());
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(
            fields,
            vec!["firstName", "lastName", "ghanaCard", "dateOfBirth", "hometown", "email"]
        );
        assert_eq!(errors.get("email"), Some("Email is required"));
    }

    #[test]
    fn email_without_at_is_invalid() {
        let mut bio = complete_bio();
        bio.email = "kwame.example.com".into();
        let errors = validate_bio(&bio);
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
    }

    #[test]
    fn email_pattern_edge_cases() {
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a @b.c"));
        assert!(!is_valid_email("@b.c"));
    }

    #[test]
    fn password_minimum_length() {
        let errors = validate_security(&security("kmensah", "1234567"));
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 8 characters long")
        );
        assert!(validate_security(&security("kmensah", "12345678")).is_empty());
    }

    #[test]
    fn missing_username_and_password() {
        let errors = validate_security(&security("", ""));
        assert_eq!(errors.get("username"), Some("Username is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
        assert!(errors.get("fingerprint").is_none());
        assert!(errors.get("image").is_none());
    }
}
