//! Request/response pipeline for the bpmink BPM REST client.
//!
//! This crate provides the transport-independent pieces:
//! - [`ApiCall`] - Request descriptor (verb, relative path, query, body, shape)
//! - [`Shape`] - Shape token naming the expected payload type, and the envelope decoder
//! - [`RootResult`] and [`ErrorInfo`] - Decoded envelope: payload, server error, or both
//! - [`Request`] and [`Response`] - Raw HTTP exchanged with the transport
//! - [`HttpClient`] - Transport capability
//! - [`Session`] - Authentication and cookie headers attached to every call
//! - [`PathTemplate`] - Relative paths with percent-encoded parameters
//! - [`Error`] and [`Result`] - Argument, transport and decode failures

mod body;
mod call;
mod client;
mod envelope;
mod error;
mod method;
mod path_template;
pub mod prelude;
mod request;
mod response;
mod session;
mod shape;

pub use body::{ContentType, from_json, from_json_value, to_form, to_json};
pub use call::ApiCall;
pub use client::HttpClient;
pub use envelope::{ErrorCode, ErrorInfo, RootResult};
pub use error::{Error, Result};
pub use method::Method;
pub use path_template::PathTemplate;
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use session::Session;
pub use shape::{DATA_KEY, ERROR_KEYS, Shape};
