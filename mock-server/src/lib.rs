use std::collections::BTreeMap;

use axum::{routing::post, Form, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

pub const AUTH_FAILED: i64 = 4;
pub const NO_ACTION: i64 = 2;
pub const UNKNOWN_CLASS: i64 = 3;
pub const MISSING_PROPERTY: i64 = 6;
pub const INVALID_PROPERTY: i64 = 7;
pub const BAD_REQUEST_ARRAY: i64 = 11;

pub type Params = BTreeMap<String, String>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    #[serde(rename = "ERRORCODE")]
    pub code: i64,
    #[serde(rename = "ERRORMESSAGE")]
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "ERRORARRAY")]
    pub errors: Vec<ErrorEntry>,
    #[serde(rename = "ACTION")]
    pub action: String,
    #[serde(rename = "DATA")]
    pub data: Value,
}

impl Envelope {
    fn ok(action: &str, data: Value) -> Self {
        Self {
            errors: Vec::new(),
            action: action.to_string(),
            data,
        }
    }

    fn fail(action: &str, errors: &[(i64, &str)]) -> Self {
        Self {
            errors: errors
                .iter()
                .map(|(code, message)| ErrorEntry {
                    code: *code,
                    message: message.to_string(),
                })
                .collect(),
            action: action.to_string(),
            data: json!({}),
        }
    }
}

pub fn app() -> Router {
    Router::new().route("/", post(dispatch))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn dispatch(Form(params): Form<Params>) -> Json<Value> {
    tracing::debug!(action = params.get("api_action").map(String::as_str), "request");
    if params.get("api_action").map(String::as_str) == Some("batch") {
        return Json(batch(&params));
    }
    let envelope = handle(&params, params.get("api_key").map(String::as_str));
    Json(json!(envelope))
}

fn batch(params: &Params) -> Value {
    let key = params.get("api_key").map(String::as_str);
    if key.is_none_or(str::is_empty) {
        return json!(Envelope::fail("batch", &[(AUTH_FAILED, "Authentication failed")]));
    }
    let requests: Vec<Params> = match params
        .get("api_requestArray")
        .map(|raw| serde_json::from_str::<Vec<Params>>(raw))
    {
        Some(Ok(requests)) => requests,
        _ => {
            return json!(Envelope::fail(
                "batch",
                &[(BAD_REQUEST_ARRAY, "RequestArray isn't valid JSON or WDDX")]
            ))
        }
    };
    let envelopes: Vec<Envelope> = requests.iter().map(|r| handle(r, key)).collect();
    json!(envelopes)
}

/// Answer one request. `expected_key` is the key the request must carry: its
/// own for a single call, the outer one for a batch element.
fn handle(params: &Params, expected_key: Option<&str>) -> Envelope {
    let action = params.get("api_action").map(String::as_str).unwrap_or_default();
    let key = params.get("api_key").map(String::as_str);
    if key.is_none_or(str::is_empty) || key != expected_key {
        return Envelope::fail(action, &[(AUTH_FAILED, "Authentication failed")]);
    }
    match action {
        "" => Envelope::fail(action, &[(NO_ACTION, "No action was requested")]),
        "test.echo" => Envelope::ok(action, echo(params)),
        "test.fail" => Envelope::fail(
            action,
            &[
                (MISSING_PROPERTY, "A required property is missing for this action"),
                (INVALID_PROPERTY, "A property is invalid"),
            ],
        ),
        _ => Envelope::fail(action, &[(UNKNOWN_CLASS, "The requested class does not exist")]),
    }
}

/// Every parameter except the reserved ones.
fn echo(params: &Params) -> Value {
    let data: Map<String, Value> = params
        .iter()
        .filter(|(k, _)| !k.starts_with("api_"))
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    Value::Object(data)
}
