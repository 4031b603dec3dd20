//! Typed facades over [`BpmClient::invoke`](crate::BpmClient::invoke).
//!
//! Each operation fixes the verb, the relative path, the query parameters and
//! the payload type of one BPM REST resource.

mod process_apps;
mod task;

pub use process_apps::ProcessAppsApi;
pub use task::TaskApi;
