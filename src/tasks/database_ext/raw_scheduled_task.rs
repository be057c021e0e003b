use anyhow::anyhow;
use std::str::FromStr;
use time::OffsetDateTime;
use twinprobe_types::{
    invocation::InvocationMode,
    scheduler::{Frequency, FrequencyUnit, ScheduledTask},
};
use uuid::Uuid;

#[derive(Debug, PartialEq, Clone, sqlx::FromRow)]
pub(super) struct RawScheduledTask {
    pub id: Uuid,
    pub module_id: String,
    pub service_id: String,
    pub service_type: String,
    pub frequency_unit: String,
    pub frequency_value: i32,
    pub mode: String,
    pub payload: serde_json::Value,
    pub created_at: OffsetDateTime,
    pub next_execution_time: OffsetDateTime,
}

impl TryFrom<RawScheduledTask> for ScheduledTask {
    type Error = anyhow::Error;

    fn try_from(raw_task: RawScheduledTask) -> Result<Self, Self::Error> {
        Ok(ScheduledTask {
            id: raw_task.id,
            module_id: raw_task.module_id,
            service_id: raw_task.service_id,
            service_type: raw_task.service_type,
            frequency: Frequency {
                unit: FrequencyUnit::from_str(&raw_task.frequency_unit).map_err(|err| anyhow!(err))?,
                value: u32::try_from(raw_task.frequency_value)?,
            },
            mode: InvocationMode::from_str(&raw_task.mode).map_err(|err| anyhow!(err))?,
            payload: raw_task.payload,
            created_at: raw_task.created_at,
            next_execution_time: raw_task.next_execution_time,
        })
    }
}

impl TryFrom<&ScheduledTask> for RawScheduledTask {
    type Error = anyhow::Error;

    fn try_from(task: &ScheduledTask) -> Result<Self, Self::Error> {
        Ok(RawScheduledTask {
            id: task.id,
            module_id: task.module_id.clone(),
            service_id: task.service_id.clone(),
            service_type: task.service_type.clone(),
            frequency_unit: task.frequency.unit.as_str().to_string(),
            frequency_value: i32::try_from(task.frequency.value)?,
            mode: task.mode.as_str().to_string(),
            payload: task.payload.clone(),
            created_at: task.created_at,
            next_execution_time: task.next_execution_time,
        })
    }
}
