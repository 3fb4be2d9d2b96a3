//! Result types returned to callers.

use serde::Serialize;
use serde_json::Value;

use crate::envelope::{self, Envelope};
use crate::error::{ApiError, LinodeError};

/// Outcome of one request inside a batch.
///
/// Unlike a single call, a batch never turns these errors into a call-level
/// failure; each element has to be inspected on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResponse {
    pub data: Value,
    pub errors: Vec<LinodeError>,
}

impl BatchResponse {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Classify this element the way a single call would be classified.
    pub fn into_result(self) -> Result<Value, ApiError> {
        envelope::into_result(self.data, self.errors)
    }
}

impl From<Envelope> for BatchResponse {
    fn from(envelope: Envelope) -> Self {
        Self {
            data: envelope.data,
            errors: envelope.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_element_yields_data() {
        let resp = BatchResponse {
            data: json!({"foo": "bar"}),
            errors: Vec::new(),
        };
        assert!(resp.is_ok());
        assert_eq!(resp.into_result().unwrap(), json!({"foo": "bar"}));
    }

    #[test]
    fn failed_element_follows_error_count_rule() {
        let one = BatchResponse {
            data: json!({}),
            errors: vec![LinodeError::new(5, "Object not found")],
        };
        assert!(!one.is_ok());
        assert!(matches!(one.into_result(), Err(ApiError::Linode(_))));

        let two = BatchResponse {
            data: json!({}),
            errors: vec![LinodeError::new(6, "a"), LinodeError::new(7, "b")],
        };
        assert!(matches!(two.into_result(), Err(ApiError::LinodeMany(_))));
    }

    #[test]
    fn from_envelope_drops_action() {
        let envelope = Envelope {
            errors: vec![LinodeError::new(4, "Authentication failed")],
            action: "test.echo".to_string(),
            data: json!([]),
        };
        let resp = BatchResponse::from(envelope);
        assert_eq!(resp.data, json!([]));
        assert_eq!(resp.errors.len(), 1);
    }
}
