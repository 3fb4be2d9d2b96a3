//! HTTP exchange types shared by the client and its transports.
//!
//! # Design
//! The client describes what to send as plain data (`HttpRequest`) and
//! receives what came back as plain data (`HttpResponse`). Only a `Transport`
//! touches the network, so the dispatch logic can be exercised with an
//! in-memory transport in tests.
//!
//! The endpoint address is not part of `HttpRequest`: every call goes to the
//! single endpoint the transport was constructed with.

/// A form POST described as plain data.
///
/// Built by `LinodeClient` from a `Request` (or from the aggregate batch
/// parameters). Pairs are sent in order as an
/// `application/x-www-form-urlencoded` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub form: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            form: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Look up the first value sent under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// `body` holds the complete, fully drained response body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_keeps_order() {
        let req = HttpRequest::from_pairs([("b", "2"), ("a", "1")]);
        assert_eq!(
            req.form,
            vec![
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "1".to_string())
            ]
        );
        assert_eq!(req.get("a"), Some("1"));
        assert_eq!(req.get("missing"), None);
    }

    #[test]
    fn success_range() {
        assert!(HttpResponse::ok("{}").is_success());
        let resp = HttpResponse {
            status: 502,
            body: Vec::new(),
        };
        assert!(!resp.is_success());
    }
}
