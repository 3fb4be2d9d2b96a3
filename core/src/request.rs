//! Request construction.
//!
//! A `Request` is the flat parameter map for one API action. Argument values
//! of any supported scalar type are stored in their canonical string form,
//! which is what the form body carries.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Parameter naming the remote action.
pub const API_ACTION: &str = "api_action";

/// Parameter carrying the credential.
pub const API_KEY: &str = "api_key";

/// Action name of an aggregate batch request.
pub const BATCH_ACTION: &str = "batch";

/// Parameter holding the JSON array of batched parameter maps.
pub const REQUEST_ARRAY: &str = "api_requestArray";

/// A scalar argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Str(s) => f.write_str(s),
            ArgValue::Int(n) => write!(f, "{n}"),
            ArgValue::UInt(n) => write!(f, "{n}"),
            ArgValue::Float(x) => write!(f, "{x}"),
            ArgValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Str(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Str(s)
    }
}

impl From<&String> for ArgValue {
    fn from(s: &String) -> Self {
        ArgValue::Str(s.clone())
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

impl From<f32> for ArgValue {
    fn from(x: f32) -> Self {
        ArgValue::Float(f64::from(x))
    }
}

impl From<f64> for ArgValue {
    fn from(x: f64) -> Self {
        ArgValue::Float(x)
    }
}

macro_rules! arg_from_int {
    ($variant:ident, $wide:ty: $($t:ty),*) => {
        $(
            impl From<$t> for ArgValue {
                fn from(n: $t) -> Self {
                    ArgValue::$variant(<$wide>::from(n))
                }
            }
        )*
    };
}

arg_from_int!(Int, i64: i8, i16, i32, i64);
arg_from_int!(UInt, u64: u8, u16, u32, u64);

/// Parameters for one API action.
///
/// Always contains `api_action` and `api_key`. Those two are written after
/// the caller's arguments, so an argument with a colliding name is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Request {
    params: BTreeMap<String, String>,
}

impl Request {
    pub fn new<I, K, V>(action: &str, api_key: &str, args: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ArgValue>,
    {
        let mut params: BTreeMap<String, String> = args
            .into_iter()
            .map(|(k, v)| (k.into(), v.into().to_string()))
            .collect();
        params.insert(API_ACTION.to_string(), action.to_string());
        params.insert(API_KEY.to_string(), api_key.to_string());
        Self { params }
    }

    /// A request with no arguments besides the reserved pair.
    pub fn bare(action: &str, api_key: &str) -> Self {
        Self::new(action, api_key, std::iter::empty::<(String, ArgValue)>())
    }

    pub fn action(&self) -> &str {
        self.get(API_ACTION).unwrap_or_default()
    }

    pub fn api_key(&self) -> &str {
        self.get(API_KEY).unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// The parameters as form pairs, in key order.
    pub fn form_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
