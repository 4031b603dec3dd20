//! Typed payloads carried in the `data` section of BPM responses.

mod process_app;
mod task;

use serde::{Deserialize, Serialize};

pub use process_app::{ProcessApp, ProcessApps, Snapshot};
pub use task::{TaskClientSettings, TaskData, TaskDetails, TaskPriority, TaskStartData};

/// Timestamp format used for query parameters such as `dueTime`.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Payload for operations whose `data` section carries nothing of interest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}
