use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;

///
/// SerializerError
///
/// Structured normalization error with a stable classification.
/// `detail` carries the caller-facing descriptor where one exists.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct SerializerError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    pub detail: Option<ErrorDetail>,
}

impl SerializerError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct a 404-shaped not-found error for one resource.
    pub fn not_found(resource: impl Into<String>, message: impl Into<String>) -> Self {
        let resource = resource.into();
        let message = message.into();

        Self {
            class: ErrorClass::NotFound,
            origin: ErrorOrigin::Normalize,
            message: format!("{resource} not found: {message}"),
            detail: Some(ErrorDetail::NotFound(NotFoundDescriptor::new(resource))),
        }
    }

    /// Construct a fingerprint-origin caller contract violation.
    pub(crate) fn fingerprint_contract(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::ContractViolation,
            ErrorOrigin::Fingerprint,
            message,
        )
    }

    /// Construct a normalize-origin malformed response error.
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Malformed, ErrorOrigin::Normalize, message)
    }

    /// Construct a config-origin error.
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::ContractViolation, ErrorOrigin::Config, message)
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }

    /// Borrow the not-found descriptor when this error carries one.
    #[must_use]
    pub const fn not_found_descriptor(&self) -> Option<&NotFoundDescriptor> {
        match &self.detail {
            Some(ErrorDetail::NotFound(descriptor)) => Some(descriptor),
            None => None,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// The caller broke an input contract (missing datacenter, empty slug).
    ContractViolation,

    /// The transport body does not have the shape the resource expects.
    Malformed,

    /// The expected single record is absent from the response.
    NotFound,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ContractViolation => "contract_violation",
            Self::Malformed => "malformed",
            Self::NotFound => "not_found",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Config,
    Fingerprint,
    Normalize,
    Serializer,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Config => "config",
            Self::Fingerprint => "fingerprint",
            Self::Normalize => "normalize",
            Self::Serializer => "serializer",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorDetail
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorDetail {
    NotFound(NotFoundDescriptor),
}

///
/// NotFoundDescriptor
///
/// HTTP-404-shaped payload handed back to the caller so it can render a
/// "not found" state without inspecting the message text.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NotFoundDescriptor {
    pub status: String,
    pub title: String,
    pub resource: String,
}

impl NotFoundDescriptor {
    #[must_use]
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            status: "404".to_string(),
            title: "Not found".to_string(),
            resource: resource.into(),
        }
    }
}

///
/// TESTS
///
