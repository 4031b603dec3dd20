//! Process application payloads.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Process applications visible to the caller.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProcessApps {
    /// Applications, in server order.
    #[serde(default, rename = "processAppsList")]
    pub process_apps_list: Vec<ProcessApp>,
}

impl ProcessApps {
    /// Find an application by its short name (acronym).
    #[must_use]
    pub fn find_by_short_name(&self, short_name: &str) -> Option<&ProcessApp> {
        self.process_apps_list
            .iter()
            .find(|app| app.short_name.as_deref() == Some(short_name))
    }
}

/// A deployed process application.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessApp {
    /// Server id.
    #[serde(rename = "ID")]
    pub id: String,
    /// Acronym.
    #[serde(default)]
    pub short_name: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Plain description.
    #[serde(default)]
    pub description: Option<String>,
    /// HTML description.
    #[serde(default)]
    pub rich_description: Option<String>,
    /// Acronym of the default snapshot.
    #[serde(default)]
    pub default_version: Option<String>,
    /// Whether this is a toolkit rather than an application.
    #[serde(default)]
    pub toolkit: Option<bool>,
    /// Last modification time.
    #[serde(default)]
    pub last_modified_on: Option<DateTime<Utc>>,
    /// User who last modified it.
    #[serde(default)]
    pub last_modified_by: Option<String>,
    /// Snapshots installed on this server.
    #[serde(default)]
    pub installed_snapshots: Vec<Snapshot>,
}

impl ProcessApp {
    /// The snapshot currently marked active, if any.
    #[must_use]
    pub fn active_snapshot(&self) -> Option<&Snapshot> {
        self.installed_snapshots
            .iter()
            .find(|snapshot| snapshot.active == Some(true))
    }
}

/// Snapshot of a process application installed on the server.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Server id.
    #[serde(rename = "ID")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Snapshot acronym.
    #[serde(default)]
    pub acronym: Option<String>,
    /// Whether the snapshot is active.
    #[serde(default)]
    pub active: Option<bool>,
    /// Creation time.
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    /// Id of the branch (track) the snapshot belongs to.
    #[serde(default, rename = "branchID")]
    pub branch_id: Option<String>,
    /// Name of that branch.
    #[serde(default)]
    pub branch_name: Option<String>,
}
