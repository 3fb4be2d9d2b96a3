//! Response envelope codec.
//!
//! # Design
//! Every reply, and every element of a batch reply, is an object with three
//! fields: `ERRORARRAY`, `ACTION` and `DATA`. All three are tolerated as
//! absent. Which part is authoritative is decided only by the number of
//! errors: none means `DATA`, one means that error, more means the whole
//! collection. `DATA` is never interpreted here.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, LinodeError, LinodeErrors};

/// One decoded reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    #[serde(rename = "ERRORARRAY", default, deserialize_with = "null_as_empty")]
    pub errors: Vec<LinodeError>,
    #[serde(rename = "ACTION", default)]
    pub action: String,
    #[serde(rename = "DATA", default)]
    pub data: Value,
}

impl Envelope {
    /// Apply the error-count rule.
    pub fn into_result(self) -> Result<Value, ApiError> {
        into_result(self.data, self.errors)
    }
}

/// Data when `errors` is empty, the single error when there is one, the
/// collection otherwise. Data is dropped whenever any error is present.
pub(crate) fn into_result(data: Value, mut errors: Vec<LinodeError>) -> Result<Value, ApiError> {
    match errors.len() {
        0 => Ok(data),
        1 => Err(ApiError::Linode(errors.remove(0))),
        _ => Err(ApiError::LinodeMany(LinodeErrors::new(errors))),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<LinodeError>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<LinodeError>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode the reply to a single request.
pub fn decode_single(body: &[u8]) -> Result<Envelope, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode the reply to a batch of `expected` requests.
///
/// A reply with a different number of envelopes is rejected outright rather
/// than truncated or padded, since positions would no longer line up with
/// the submitted requests.
pub fn decode_batch(body: &[u8], expected: usize) -> Result<Vec<Envelope>, ApiError> {
    let envelopes: Vec<Envelope> =
        serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if envelopes.len() != expected {
        return Err(ApiError::Decode(format!(
            "expected {expected} envelopes, got {}",
            envelopes.len()
        )));
    }
    Ok(envelopes)
}
