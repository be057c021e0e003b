use crate::{invocation::InvocationMode, scheduler::Frequency};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Parameters for registering a new scheduled task.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTaskCreateParams {
    /// ID of the middleware module hosting the invoked smart service.
    pub module_id: String,
    /// ID of the smart service to invoke.
    pub service_id: String,
    /// Classification tag used to query tasks by category.
    pub service_type: String,
    /// Cadence at which the task re-fires.
    pub frequency: Frequency,
    /// Mode every invocation of the task will use.
    pub mode: InvocationMode,
    /// Opaque request body forwarded verbatim to the smart service.
    pub payload: serde_json::Value,
    /// Explicit first due time. Computed from the registration time when absent.
    #[serde(
        with = "time::serde::timestamp::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_execution_time: Option<OffsetDateTime>,
}
