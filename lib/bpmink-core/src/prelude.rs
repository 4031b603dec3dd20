//! Prelude module for convenient imports.
//!
//! ```ignore
//! use bpmink_core::prelude::*;
//! ```

pub use crate::{
    ApiCall, ContentType, Error, ErrorCode, ErrorInfo, HttpClient, Method, PathTemplate, Request,
    RequestBuilder, Response, Result, RootResult, Session, Shape, from_json, to_json,
};
