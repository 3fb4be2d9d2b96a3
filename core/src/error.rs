//! Error types for the Linode API client.
//!
//! # Design
//! Two families live here. `LinodeError` and `LinodeErrors` are the errors
//! the remote API reports inside a response envelope; they are terminal,
//! display-only values. `ApiError` is what every fallible client operation
//! returns, covering local precondition failures, transport failures, decode
//! failures and the remote errors above.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One error reported by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("error {code}: {message}")]
pub struct LinodeError {
    #[serde(rename = "ERRORCODE")]
    pub code: i64,
    #[serde(rename = "ERRORMESSAGE")]
    pub message: String,
}

impl LinodeError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Several errors reported together for one request, in the order the API
/// returned them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinodeErrors(Vec<LinodeError>);

impl LinodeErrors {
    pub fn new(errors: Vec<LinodeError>) -> Self {
        Self(errors)
    }

    pub fn as_slice(&self) -> &[LinodeError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LinodeError> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<LinodeError> {
        self.0
    }
}

impl fmt::Display for LinodeErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for LinodeErrors {}

impl From<Vec<LinodeError>> for LinodeErrors {
    fn from(errors: Vec<LinodeError>) -> Self {
        Self(errors)
    }
}

impl<'a> IntoIterator for &'a LinodeErrors {
    type Item = &'a LinodeError;
    type IntoIter = std::slice::Iter<'a, LinodeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Errors returned by `LinodeClient` and the envelope codec.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A precondition failed before any network I/O.
    #[error("{0}")]
    Validation(String),

    /// The HTTP exchange itself failed: connection refused, reset, or the
    /// body could not be read to the end.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-2xx status. The body is kept raw
    /// because it is not a response envelope.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body did not match the envelope shape.
    #[error("decode failed: {0}")]
    Decode(String),

    /// Request parameters could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The remote API reported exactly one error.
    #[error(transparent)]
    Linode(#[from] LinodeError),

    /// The remote API reported two or more errors.
    #[error(transparent)]
    LinodeMany(#[from] LinodeErrors),
}

impl ApiError {
    /// The remote errors carried by this value, if it came from the API.
    pub fn remote_errors(&self) -> &[LinodeError] {
        match self {
            ApiError::Linode(err) => std::slice::from_ref(err),
            ApiError::LinodeMany(errs) => errs.as_slice(),
            _ => &[],
        }
    }
}
