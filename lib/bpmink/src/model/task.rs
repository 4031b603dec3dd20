//! Human task payloads.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Detailed information about a task instance.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetails {
    /// Task instance id.
    pub tkiid: String,
    /// Task subject.
    #[serde(default)]
    pub name: Option<String>,
    /// Longer description of the task.
    #[serde(default)]
    pub description: Option<String>,
    /// Lifecycle status (`Received`, `Closed`, ...).
    #[serde(default)]
    pub status: Option<String>,
    /// Execution state (`STATE_READY`, `STATE_CLAIMED`, ...).
    #[serde(default)]
    pub state: Option<String>,
    /// Task kind (`KIND_PARTICIPATING`, ...).
    #[serde(default)]
    pub kind: Option<String>,
    /// Priority.
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    /// Due time.
    #[serde(default)]
    pub due_time: Option<DateTime<Utc>>,
    /// User currently owning the task.
    #[serde(default)]
    pub owner: Option<String>,
    /// User or group the task is assigned to.
    #[serde(default)]
    pub assigned_to: Option<String>,
    /// Whether `assigned_to` names a user or a group.
    #[serde(default)]
    pub assigned_to_type: Option<String>,
    /// User who created the task.
    #[serde(default)]
    pub originator: Option<String>,
    /// Id of the enclosing process instance.
    #[serde(default)]
    pub piid: Option<String>,
    /// Name of the enclosing process instance.
    #[serde(default)]
    pub process_instance_name: Option<String>,
    /// Activation time.
    #[serde(default)]
    pub activation_time: Option<DateTime<Utc>>,
    /// Start time.
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    /// Completion time.
    #[serde(default)]
    pub completion_time: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default)]
    pub last_modification_time: Option<DateTime<Utc>>,
    /// Task variables, when requested.
    #[serde(default)]
    pub data: Option<Value>,
}

/// Task priority.
///
/// Sent by name on the wire. The server reports it either by name or as its
/// numeric level (10 for `Highest` up to 50 for `Lowest`); both are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PriorityRepr")]
pub enum TaskPriority {
    /// Level 10.
    Highest,
    /// Level 20.
    High,
    /// Level 30.
    Normal,
    /// Level 40.
    Low,
    /// Level 50.
    Lowest,
}

impl TaskPriority {
    /// All priorities, most urgent first.
    pub const ALL: [Self; 5] = [
        Self::Highest,
        Self::High,
        Self::Normal,
        Self::Low,
        Self::Lowest,
    ];

    /// Name used in requests.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Highest => "Highest",
            Self::High => "High",
            Self::Normal => "Normal",
            Self::Low => "Low",
            Self::Lowest => "Lowest",
        }
    }

    /// Numeric level reported by the server.
    #[must_use]
    pub const fn level(&self) -> u8 {
        match self {
            Self::Highest => 10,
            Self::High => 20,
            Self::Normal => 30,
            Self::Low => 40,
            Self::Lowest => 50,
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| format!("unknown task priority `{name}`"))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriorityRepr {
    Level(u8),
    Name(String),
}

impl TryFrom<PriorityRepr> for TaskPriority {
    type Error = String;

    fn try_from(repr: PriorityRepr) -> Result<Self, Self::Error> {
        match repr {
            PriorityRepr::Name(name) => name.parse(),
            PriorityRepr::Level(level) => Self::ALL
                .into_iter()
                .find(|priority| priority.level() == level)
                .ok_or_else(|| format!("unknown task priority level {level}")),
        }
    }
}

/// Result of starting a task: attribute/value pairs describing the first
/// coach or step reached.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskStartData {
    /// Attributes as sent by the server.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl TaskStartData {
    /// Single attribute by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

/// Task variables returned by `action=getData`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskData {
    /// Variable name to value.
    #[serde(default, rename = "resultMap")]
    pub result_map: BTreeMap<String, Value>,
}

/// Client settings of a human task, mainly the coach URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskClientSettings {
    /// URL invoking the coach associated with the task.
    #[serde(default)]
    pub url: Option<String>,
}
