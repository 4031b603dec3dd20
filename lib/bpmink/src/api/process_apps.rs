//! Process application operations.

use crate::model::ProcessApps;
use crate::{ApiCall, BpmClient, HttpClient, Result, RootResult};

const PROCESS_APPS: &str = "processApps";

/// Typed access to process applications, obtained from
/// [`BpmClient::process_apps`].
#[derive(Debug)]
pub struct ProcessAppsApi<'a, C> {
    client: &'a BpmClient<C>,
}

impl<'a, C> ProcessAppsApi<'a, C> {
    pub(crate) const fn new(client: &'a BpmClient<C>) -> Self {
        Self { client }
    }
}

impl<C: HttpClient> ProcessAppsApi<'_, C> {
    /// List the process applications and their installed snapshots.
    pub async fn list_process_apps(&self) -> Result<RootResult<ProcessApps>> {
        self.client.invoke(ApiCall::get(PROCESS_APPS)).await
    }
}
