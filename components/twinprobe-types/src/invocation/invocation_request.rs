use crate::{invocation::InvocationMode, scheduler::ScheduledTask};
use serde::{Deserialize, Serialize};

/// A single smart service invocation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvocationRequest {
    /// ID of the middleware module hosting the smart service.
    pub module_id: String,
    /// ID of the smart service to invoke.
    pub service_id: String,
    /// Opaque request body forwarded verbatim to the smart service. `null` is treated as
    /// an absent payload.
    pub payload: serde_json::Value,
    /// Invocation mode.
    pub mode: InvocationMode,
}

impl From<&ScheduledTask> for InvocationRequest {
    fn from(task: &ScheduledTask) -> Self {
        Self {
            module_id: task.module_id.clone(),
            service_id: task.service_id.clone(),
            payload: task.payload.clone(),
            mode: task.mode,
        }
    }
}
