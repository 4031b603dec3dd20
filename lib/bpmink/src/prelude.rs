//! Prelude module for convenient imports.
//!
//! ```ignore
//! use bpmink::prelude::*;
//! ```

pub use crate::model::{
    Empty, ProcessApp, ProcessApps, Snapshot, TaskClientSettings, TaskData, TaskDetails,
    TaskPriority, TaskStartData,
};
pub use crate::{
    ApiCall, BpmClient, ClientConfig, Error, ErrorCode, ErrorInfo, HttpClient, HyperClient, Method,
    Request, Response, Result, RootResult, Session,
};
