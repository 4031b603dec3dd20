//! Task operations under `task/{tkiid}`.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::model::{
    DATE_FORMAT, Empty, TaskClientSettings, TaskData, TaskDetails, TaskPriority, TaskStartData,
};
use crate::{ApiCall, BpmClient, HttpClient, PathTemplate, Result, RootResult};

const TASK: PathTemplate = PathTemplate::new("task/{tkiid}");
const CLIENT_SETTINGS: PathTemplate =
    PathTemplate::new("task/{tkiid}/clientSettings/IBM_WLE_Coach");

/// Typed access to human tasks.
///
/// Obtained from [`BpmClient::tasks`]. Every operation rejects a blank task id
/// with [`Error::InvalidArgument`](crate::Error::InvalidArgument) before any
/// request is sent.
#[derive(Debug)]
pub struct TaskApi<'a, C> {
    client: &'a BpmClient<C>,
}

impl<'a, C> TaskApi<'a, C> {
    pub(crate) const fn new(client: &'a BpmClient<C>) -> Self {
        Self { client }
    }
}

impl<C> Clone for TaskApi<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for TaskApi<'_, C> {}

impl<C: HttpClient> TaskApi<'_, C> {
    /// Retrieve the details of a task.
    pub async fn get_task(&self, tkiid: &str) -> Result<RootResult<TaskDetails>> {
        let call = ApiCall::get(task_path(tkiid)?);
        self.client.invoke(call).await
    }

    /// Start a task, returning the first step reached.
    pub async fn start_task(&self, tkiid: &str) -> Result<RootResult<TaskStartData>> {
        self.client.invoke(action(tkiid, "start")?).await
    }

    /// Claim a task for the calling user.
    pub async fn assign_task_to_me(&self, tkiid: &str) -> Result<RootResult<TaskDetails>> {
        let call = action(tkiid, "assign")?.query("toMe", true);
        self.client.invoke(call).await
    }

    /// Return a claimed task to the group it was assigned to.
    pub async fn assign_task_back(&self, tkiid: &str) -> Result<RootResult<TaskDetails>> {
        let call = action(tkiid, "assign")?.query("back", true);
        self.client.invoke(call).await
    }

    /// Reassign a task to a user. `None` leaves the choice to the server.
    pub async fn assign_task_to_user(
        &self,
        tkiid: &str,
        user_name: Option<&str>,
    ) -> Result<RootResult<TaskDetails>> {
        let call = action(tkiid, "assign")?.query_opt("toUser", non_blank(user_name));
        self.client.invoke(call).await
    }

    /// Reassign a task to a group. `None` leaves the choice to the server.
    pub async fn assign_task_to_group(
        &self,
        tkiid: &str,
        group_name: Option<&str>,
    ) -> Result<RootResult<TaskDetails>> {
        let call = action(tkiid, "assign")?.query_opt("toGroup", non_blank(group_name));
        self.client.invoke(call).await
    }

    /// Complete a task, optionally setting its output variables.
    ///
    /// The variables are sent as one JSON document in the `params` query
    /// parameter.
    pub async fn complete_task(
        &self,
        tkiid: &str,
        input: Option<&Map<String, Value>>,
    ) -> Result<RootResult<TaskDetails>> {
        let params = input.map(serde_json::to_string).transpose()?;
        let call = action(tkiid, "finish")?
            .query("parts", "all")
            .query_opt("params", params);
        self.client.invoke(call).await
    }

    /// Cancel a task.
    pub async fn cancel_task(&self, tkiid: &str) -> Result<RootResult<Empty>> {
        self.client.invoke(action(tkiid, "cancel")?).await
    }

    /// Read task variables. Without `fields`, all variables are returned.
    pub async fn get_task_data(
        &self,
        tkiid: &str,
        fields: Option<&[&str]>,
    ) -> Result<RootResult<TaskData>> {
        let fields = fields
            .filter(|fields| !fields.is_empty())
            .map(|fields| fields.join(","));
        let call = ApiCall::get(task_path(tkiid)?)
            .query("action", "getData")
            .query_opt("fields", fields);
        self.client.invoke(call).await
    }

    /// Change the priority of a task.
    pub async fn update_task_priority(
        &self,
        tkiid: &str,
        priority: TaskPriority,
    ) -> Result<RootResult<TaskDetails>> {
        let call = action(tkiid, "update")?.query("priority", priority);
        self.client.invoke(call).await
    }

    /// Change the due time of a task.
    pub async fn update_task_due_time(
        &self,
        tkiid: &str,
        due_time: DateTime<Utc>,
    ) -> Result<RootResult<TaskDetails>> {
        let call = action(tkiid, "update")?.query("dueTime", due_time.format(DATE_FORMAT));
        self.client.invoke(call).await
    }

    /// Retrieve the coach URL of a task, absolute or relative to the server.
    pub async fn get_task_client_settings(
        &self,
        tkiid: &str,
        relative_url: bool,
    ) -> Result<RootResult<TaskClientSettings>> {
        let path = CLIENT_SETTINGS.render(&[("tkiid", tkiid)])?;
        let call = ApiCall::get(path).query("relativeURL", relative_url);
        self.client.invoke(call).await
    }
}

fn task_path(tkiid: &str) -> Result<String> {
    TASK.render(&[("tkiid", tkiid)])
}

fn action<T>(tkiid: &str, action: &str) -> Result<ApiCall<T>> {
    Ok(ApiCall::put(task_path(tkiid)?).query("action", action))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
