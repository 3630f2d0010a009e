// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::ContactDetails;
use serde::Serialize;
use std::collections::BTreeMap;

const EMPTY_FIELD: &str = "This field cannot be empty.";
const INVALID_EMAIL: &str = "Please enter a valid email address.";

/// Minimum length of a guest's full name after trimming.
pub const MIN_FULL_NAME_LENGTH: usize = 2;

/// Field-level validation messages for a submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// The first message recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Checks that `value` is not blank.
    ///
    /// Returns whether the check passed.
    pub fn required(&mut self, field: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, EMPTY_FIELD);
            return false;
        }
        true
    }

    /// Checks that the trimmed `value` has at least `min` characters.
    pub fn min_length(&mut self, field: &str, value: &str, min: usize) -> bool {
        if value.trim().chars().count() < min {
            self.add(
                field,
                format!("This field must have at least {min} characters."),
            );
            return false;
        }
        true
    }

    /// Checks that `value` is a structurally valid e-mail address.
    pub fn email(&mut self, field: &str, value: &str) -> bool {
        if !is_valid_email(value.trim()) {
            self.add(field, INVALID_EMAIL);
            return false;
        }
        true
    }
}

/// Validates the contact step of a reservation.
///
/// The full name must have at least two characters and the e-mail address
/// must be well formed. The phone number is free text.
#[must_use]
pub fn validate_contact_details(contact: &ContactDetails) -> FormErrors {
    let mut errors: FormErrors = FormErrors::new();

    if errors.required("full_name", &contact.full_name) {
        errors.min_length("full_name", &contact.full_name, MIN_FULL_NAME_LENGTH);
    }
    if errors.required("email", &contact.email) {
        errors.email("email", &contact.email);
    }

    errors
}

/// Validates the admin login form.
#[must_use]
pub fn validate_login(email: &str, password: &str) -> FormErrors {
    let mut errors: FormErrors = FormErrors::new();

    if errors.required("email", email) {
        errors.email("email", email);
    }
    errors.required("password", password);

    errors
}

/// Structural e-mail check: a dot-atom local part, an `@`, and a domain of
/// at least two labels whose last label is alphabetic.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };

    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    const SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";

    !local.is_empty()
        && local.len() <= 64
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || SPECIALS.contains(c))
}

fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > 253 {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok: bool = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld_ok: bool = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    labels_ok && tld_ok
}
