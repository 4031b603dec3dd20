//! Typed async client for the IBM BPM REST API.
//!
//! Every call goes through one pipeline: a facade builds an [`ApiCall`], the
//! [`BpmClient`] sends it over its transport, and the response envelope is
//! decoded into a [`RootResult`] carrying the payload, the server-reported
//! error, or both. Only argument, transport and decode failures surface as
//! [`Error`]; business errors are data.
//!
//! # Example
//!
//! ```ignore
//! use bpmink::prelude::*;
//!
//! let client = BpmClient::builder(HyperClient::new())
//!     .root_url("https://bpm.example.com:9443/rest/bpm/wle/v1")
//!     .session(Session::basic_auth("tw_admin", "secret"))
//!     .build()?;
//!
//! let claimed = client.tasks().assign_task_to_me("1234").await?;
//! match claimed.into_result() {
//!     Ok(details) => println!("claimed: {details:?}"),
//!     Err(error) => eprintln!("server refused: {error}"),
//! }
//! ```

pub mod api;
mod bpm_client;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod model;
pub mod prelude;

pub use bpm_client::{BpmClient, BpmClientBuilder};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_USER_AGENT};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use bpmink_core::{
    ApiCall, ContentType, Error, ErrorCode, ErrorInfo, HttpClient, Method, PathTemplate, Request,
    RequestBuilder, Response, Result, RootResult, Session, Shape, from_json, to_form, to_json,
};
