// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use bungalow_bliss_domain::DomainError;
use bungalow_bliss_persistence::PersistenceError;

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The credentials did not match an account.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The account store could not be consulted.
    Backend {
        /// A description of the failure.
        message: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Backend { message } => write!(f, "Authentication backend error: {message}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The store failed or returned unusable data.
    StorageFailure {
        /// A description of the failure.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::StorageFailure { message } => write!(f, "Storage failure: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(message) => Self::ResourceNotFound {
                resource_type: String::from("Record"),
                message,
            },
            PersistenceError::BungalowUnavailable { bungalow_id } => Self::DomainRuleViolation {
                rule: String::from("bungalow_available"),
                message: format!(
                    "Bungalow {bungalow_id} is no longer available for the requested dates"
                ),
            },
            other => Self::StorageFailure {
                message: other.to_string(),
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::InvalidDateRange { start, end } => ApiError::InvalidInput {
            field: String::from("end_date"),
            message: format!("End date {end} is before start date {start}"),
        },
        DomainError::InvalidYearMonth { year, month } => ApiError::InvalidInput {
            field: String::from("month"),
            message: format!("{year}-{month} is not a calendar month"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
        DomainError::InvalidBungalowId(value) => ApiError::InvalidInput {
            field: String::from("bungalow_id"),
            message: format!("'{value}' is not a bungalow id"),
        },
        DomainError::DayOutsideCalendar { bungalow_id, date } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Bungalow {bungalow_id} on {date} is not part of the edited calendar"),
        },
        DomainError::DraftIncomplete { missing } => ApiError::DomainRuleViolation {
            rule: String::from("complete_draft"),
            message: format!("The reservation is missing {missing}"),
        },
        err @ (DomainError::InvalidRestrictionKind(_)
        | DomainError::InvalidReservationStatus(_)
        | DomainError::InconsistentRestriction { .. }) => ApiError::StorageFailure {
            message: err.to_string(),
        },
    }
}
