use derive_more::Display;
use scopeprint_core::error::{
    ErrorClass, ErrorOrigin as CoreErrorOrigin, NotFoundDescriptor, SerializerError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound(_))
    }
}

impl From<SerializerError> for Error {
    fn from(err: SerializerError) -> Self {
        let kind = match (err.class, err.origin) {
            (_, CoreErrorOrigin::Config) => ErrorKind::Config,
            (ErrorClass::NotFound, _) => ErrorKind::NotFound(
                err.not_found_descriptor()
                    .cloned()
                    .unwrap_or_else(|| NotFoundDescriptor::new("")),
            ),
            (ErrorClass::Malformed, _) => ErrorKind::Malformed,
            (ErrorClass::ContractViolation, _) => ErrorKind::Contract,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// The caller left out a datacenter, a slug or a request parameter.
    Contract,

    /// The transport body has the wrong JSON shape.
    Malformed,

    /// The expected record is absent; carries the 404 descriptor.
    NotFound(NotFoundDescriptor),

    /// Serializer configuration could not be loaded.
    Config,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Config,
    Fingerprint,
    Normalize,
    Serializer,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Config => Self::Config,
            CoreErrorOrigin::Fingerprint => Self::Fingerprint,
            CoreErrorOrigin::Normalize => Self::Normalize,
            CoreErrorOrigin::Serializer => Self::Serializer,
        }
    }
}
