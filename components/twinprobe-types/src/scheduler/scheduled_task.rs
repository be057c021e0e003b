use crate::{invocation::InvocationMode, scheduler::Frequency};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A persistently scheduled, periodically re-fired smart service invocation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    /// Unique task id (UUIDv7). The identity never changes across reschedulings.
    pub id: Uuid,
    /// ID of the middleware module hosting the invoked smart service.
    pub module_id: String,
    /// ID of the smart service to invoke.
    pub service_id: String,
    /// Classification tag used to query tasks by category. Has no effect on scheduling.
    pub service_type: String,
    /// Cadence at which the task re-fires.
    pub frequency: Frequency,
    /// Mode every invocation of this task uses, fixed at registration.
    pub mode: InvocationMode,
    /// Opaque request body forwarded verbatim to the smart service.
    pub payload: serde_json::Value,
    /// Date and time when the task was registered.
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    /// Date and time when the task is next due to fire. Recomputed after every execution
    /// attempt, whether it succeeded or not.
    #[serde(with = "time::serde::timestamp")]
    pub next_execution_time: OffsetDateTime,
}
