use chrono::NaiveDate;
use tracing::{debug, info, warn};
use zeroize::Zeroize;

use super::{Dialog, Navigate};
use crate::validation::{validate_bio, validate_security, BioInfo, FieldErrors, SecurityInfo};

/// Whether a failed validation stops the wizard from moving on.
///
/// `Advisory` keeps the long-standing behaviour: errors are shown next to the
/// fields but the step advances anyway. `Enforce` holds the user on the step
/// until the error mapping is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    #[default]
    Advisory,
    Enforce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Bio,
    Security,
}

impl Step {
    pub fn number(self) -> usize {
        match self {
            Step::Bio => 1,
            Step::Security => 2,
        }
    }
}

pub const TOTAL_STEPS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    GhanaCard,
    DateOfBirth,
    Hometown,
    Email,
    Username,
    Password,
}

pub const BIO_FIELDS: &[Field] = &[
    Field::FirstName,
    Field::LastName,
    Field::GhanaCard,
    Field::DateOfBirth,
    Field::Hometown,
    Field::Email,
];

pub const SECURITY_FIELDS: &[Field] = &[Field::Username, Field::Password];

impl Field {
    /// Key used in the error mapping.
    pub fn key(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::GhanaCard => "ghanaCard",
            Field::DateOfBirth => "dateOfBirth",
            Field::Hometown => "hometown",
            Field::Email => "email",
            Field::Username => "username",
            Field::Password => "password",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::GhanaCard => "Ghana Card Number",
            Field::DateOfBirth => "Date of Birth",
            Field::Hometown => "Hometown",
            Field::Email => "Email",
            Field::Username => "Username",
            Field::Password => "Password",
        }
    }

    pub fn is_secret(self) -> bool {
        self == Field::Password
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignupEvent {
    Input(Field, String),
    Advance,
    Acknowledge,
    Skip,
}

pub struct SignupState {
    step: Step,
    policy: ValidationPolicy,
    bio: BioInfo,
    security: SecurityInfo,
    errors: FieldErrors,
    general_error: Option<String>,
    loading: bool,
    dialog: Option<Dialog>,
    completed: bool,
}

impl SignupState {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self {
            step: Step::Bio,
            policy,
            bio: BioInfo::default(),
            security: SecurityInfo::default(),
            errors: FieldErrors::default(),
            general_error: None,
            loading: false,
            dialog: None,
            completed: false,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    #[cfg(test)]
    pub fn bio(&self) -> &BioInfo {
        &self.bio
    }

    pub fn security(&self) -> &SecurityInfo {
        &self.security
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn fields(&self) -> &'static [Field] {
        match self.step {
            Step::Bio => BIO_FIELDS,
            Step::Security => SECURITY_FIELDS,
        }
    }

    pub fn apply(&mut self, event: SignupEvent) -> Navigate {
        if self.dialog.is_some() {
            // Only an acknowledgement gets past an open dialog.
            return match event {
                SignupEvent::Acknowledge => self.acknowledge(),
                _ => Navigate::Stay,
            };
        }
        match event {
            SignupEvent::Input(field, value) => {
                self.set_field(field, value);
                Navigate::Stay
            }
            SignupEvent::Advance => {
                self.advance_with(|_| Ok(()));
                Navigate::Stay
            }
            SignupEvent::Acknowledge => Navigate::Stay,
            SignupEvent::Skip => {
                info!(step = self.step.number(), "sign-up skipped");
                Navigate::Catalog
            }
        }
    }

    /// Run the validator for the current step, replacing the previous error set.
    pub fn validate(&mut self) -> bool {
        self.errors = match self.step {
            Step::Bio => validate_bio(&self.bio),
            Step::Security => validate_security(&self.security),
        };
        self.errors.is_empty()
    }

    /// Advance the wizard. `op` stands in for the round trip behind the step
    /// (navigation or registration); its failure lands in the general error
    /// slot. Loading is always cleared before returning.
    pub(crate) fn advance_with<F>(&mut self, op: F)
    where
        F: FnOnce(Step) -> Result<(), String>,
    {
        if self.loading {
            return;
        }
        self.loading = true;
        self.general_error = None;

        let passed = self.validate();
        if !passed {
            let failed: Vec<&str> = self.errors.fields().collect();
            debug!(step = self.step.number(), ?failed, "validation failed");
        }

        if passed || self.policy == ValidationPolicy::Advisory {
            match op(self.step) {
                Ok(()) => self.finish_step(),
                Err(reason) => {
                    warn!(step = self.step.number(), %reason, "sign-up step failed");
                    let (banner, alert) = match self.step {
                        Step::Bio => (
                            "An error occurred. Please try again.",
                            "Failed to proceed. Please try again.",
                        ),
                        Step::Security => (
                            "An error occurred during registration. Please try again.",
                            "Failed to complete registration. Please try again.",
                        ),
                    };
                    self.general_error = Some(banner.to_string());
                    self.dialog = Some(Dialog::new("Error", alert));
                }
            }
        }

        self.loading = false;
    }

    fn finish_step(&mut self) {
        match self.step {
            Step::Bio => {
                // Bio info is not carried to the next screen.
                self.bio = BioInfo::default();
                self.errors = FieldErrors::default();
                self.step = Step::Security;
            }
            Step::Security => {
                info!(username = %self.security.username, "registration complete");
                self.completed = true;
                self.dialog = Some(Dialog::new("Success", "Registration complete!"));
            }
        }
    }

    fn acknowledge(&mut self) -> Navigate {
        self.dialog = None;
        if self.completed {
            self.security = SecurityInfo::default();
            Navigate::Catalog
        } else {
            Navigate::Stay
        }
    }

    fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::FirstName => self.bio.first_name = value,
            Field::LastName => self.bio.last_name = value,
            Field::GhanaCard => self.bio.ghana_card = value,
            Field::DateOfBirth => {
                self.bio.date_of_birth = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
            }
            Field::Hometown => self.bio.hometown = value,
            Field::Email => self.bio.email = value,
            Field::Username => self.security.username = value,
            Field::Password => replace_secret(&mut self.security.password, value),
        }
    }
}

/// Overwrite a secret in place, wiping the old text and the incoming copy.
fn replace_secret(slot: &mut String, mut value: String) {
    slot.zeroize();
    slot.push_str(&value);
    value.zeroize();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_bio(s: &mut SignupState) {
        for (field, value) in [
            (Field::FirstName, "Abena"),
            (Field::LastName, "Owusu"),
            (Field::GhanaCard, "GHA-123456789-0"),
            (Field::DateOfBirth, "1998-02-14"),
            (Field::Hometown, "Cape Coast"),
            (Field::Email, "abena@example.com"),
        ] {
            s.apply(SignupEvent::Input(field, value.to_string()));
        }
    }

    #[test]
    fn advisory_policy_advances_despite_errors() {
        let mut s = SignupState::new(ValidationPolicy::Advisory);
        s.apply(SignupEvent::Advance);
        assert_eq!(s.step(), Step::Security);
        assert!(!s.is_loading());
    }

    #[test]
    fn enforce_policy_holds_step_and_shows_errors() {
        let mut s = SignupState::new(ValidationPolicy::Enforce);
        s.apply(SignupEvent::Input(Field::Email, "not-an-email".into()));
        s.apply(SignupEvent::Advance);
        assert_eq!(s.step(), Step::Bio);
        assert_eq!(s.errors().len(), 6);
        assert_eq!(s.errors().get("email"), Some("Please enter a valid email address"));
        assert!(!s.is_loading());
    }

    #[test]
    fn errors_are_replaced_wholesale() {
        let mut s = SignupState::new(ValidationPolicy::Enforce);
        s.apply(SignupEvent::Advance);
        assert_eq!(s.errors().len(), 6);
        fill_bio(&mut s);
        s.apply(SignupEvent::Input(Field::Hometown, String::new()));
        s.apply(SignupEvent::Advance);
        assert_eq!(s.errors().len(), 1);
        assert_eq!(s.errors().get("hometown"), Some("Hometown is required"));
    }

    #[test]
    fn bio_is_discarded_when_moving_to_security() {
        let mut s = SignupState::new(ValidationPolicy::Enforce);
        fill_bio(&mut s);
        s.apply(SignupEvent::Advance);
        assert_eq!(s.step(), Step::Security);
        assert_eq!(s.bio(), &BioInfo::default());
        assert!(s.errors().is_empty());
    }

    #[test]
    fn unparseable_date_counts_as_missing() {
        let mut s = SignupState::new(ValidationPolicy::Enforce);
        fill_bio(&mut s);
        s.apply(SignupEvent::Input(Field::DateOfBirth, "14/02/1998".into()));
        s.apply(SignupEvent::Advance);
        assert_eq!(s.errors().get("dateOfBirth"), Some("Date of birth is required"));
    }

    #[test]
    fn password_edits_replace_previous_value() {
        let mut s = SignupState::new(ValidationPolicy::Advisory);
        s.apply(SignupEvent::Advance);
        s.apply(SignupEvent::Input(Field::Password, "hunter22".into()));
        s.apply(SignupEvent::Input(Field::Password, "hunter2".into()));
        assert_eq!(s.security().password, "hunter2");
        s.apply(SignupEvent::Input(Field::Password, String::new()));
        assert!(s.security().password.is_empty());
    }

    #[test]
    fn replace_secret_overwrites_in_place() {
        let mut slot = String::from("old-secret");
        let capacity = slot.capacity();
        replace_secret(&mut slot, "new".to_string());
        assert_eq!(slot, "new");
        assert_eq!(slot.capacity(), capacity);
    }

    #[test]
    fn registration_completes_and_routes_to_catalog() {
        let mut s = SignupState::new(ValidationPolicy::Enforce);
        fill_bio(&mut s);
        s.apply(SignupEvent::Advance);
        s.apply(SignupEvent::Input(Field::Username, "abena".into()));
        s.apply(SignupEvent::Input(Field::Password, "12345678".into()));
        assert_eq!(s.apply(SignupEvent::Advance), Navigate::Stay);

        let dialog = s.dialog().unwrap();
        assert_eq!(dialog.message, "Registration complete!");
        // Typing is blocked while the dialog is up.
        s.apply(SignupEvent::Input(Field::Username, "other".into()));
        assert_eq!(s.security().username, "abena");

        assert_eq!(s.apply(SignupEvent::Acknowledge), Navigate::Catalog);
        assert!(s.security().password.is_empty());
    }

    #[test]
    fn short_password_blocks_when_enforced() {
        let mut s = SignupState::new(ValidationPolicy::Enforce);
        fill_bio(&mut s);
        s.apply(SignupEvent::Advance);
        s.apply(SignupEvent::Input(Field::Username, "abena".into()));
        s.apply(SignupEvent::Input(Field::Password, "1234567".into()));
        s.apply(SignupEvent::Advance);
        assert!(s.dialog().is_none());
        assert_eq!(
            s.errors().get("password"),
            Some("Password must be at least 8 characters long")
        );
    }

    #[test]
    fn failed_step_sets_general_error_and_clears_loading() {
        let mut s = SignupState::new(ValidationPolicy::Advisory);
        s.advance_with(|_| Err("router unavailable".into()));
        assert_eq!(s.step(), Step::Bio);
        assert_eq!(s.general_error(), Some("An error occurred. Please try again."));
        assert_eq!(s.dialog().unwrap().title, "Error");
        assert!(!s.is_loading());

        // Dismissing the error keeps the user on the step; retrying clears the banner.
        assert_eq!(s.apply(SignupEvent::Acknowledge), Navigate::Stay);
        s.apply(SignupEvent::Advance);
        assert_eq!(s.general_error(), None);
        assert_eq!(s.step(), Step::Security);
    }

    #[test]
    fn failed_registration_uses_registration_message() {
        let mut s = SignupState::new(ValidationPolicy::Advisory);
        s.apply(SignupEvent::Advance);
        s.advance_with(|_| Err("timeout".into()));
        assert_eq!(
            s.general_error(),
            Some("An error occurred during registration. Please try again.")
        );
    }

    #[test]
    fn skip_goes_to_catalog() {
        let mut s = SignupState::new(ValidationPolicy::Advisory);
        assert_eq!(s.apply(SignupEvent::Skip), Navigate::Catalog);
    }

    #[test]
    fn field_sets_per_step() {
        let mut s = SignupState::new(ValidationPolicy::Advisory);
        assert_eq!(s.fields().len(), 6);
        s.apply(SignupEvent::Advance);
        assert_eq!(s.fields(), SECURITY_FIELDS);
        assert!(Field::Password.is_secret());
    }
}
