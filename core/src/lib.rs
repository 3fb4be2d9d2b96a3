//! Synchronous client core for the Linode form API.
//!
//! # Overview
//! Requests are flat parameter maps POSTed as form bodies; every reply is a
//! JSON envelope of `ERRORARRAY`, `ACTION` and `DATA`. Several requests can
//! share one exchange through the `batch` action.
//!
//! # Design
//! - `Request` is built once and never mutated; `api_action` and `api_key`
//!   are always present and never shadowed by arguments.
//! - `LinodeClient` is stateless apart from its `Transport`. Building the
//!   form and parsing the reply are plain functions, so only the transport
//!   touches the network and tests can substitute it.
//! - The number of errors in an envelope alone decides the outcome: none
//!   yields `DATA`, one yields `LinodeError`, more yield `LinodeErrors`.
//! - A batch fails as a whole only for local or transport problems. Remote
//!   errors stay attached to the element they belong to.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod request;
pub mod transport;
pub mod types;

pub use client::LinodeClient;
pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use envelope::Envelope;
pub use error::{ApiError, LinodeError, LinodeErrors};
pub use http::{HttpRequest, HttpResponse};
pub use request::{ArgValue, Request};
pub use transport::{Transport, UreqTransport};
pub use types::BatchResponse;
