mod frequency;
mod page;
mod scheduled_task;
mod scheduled_task_create_params;

pub use self::{
    frequency::{Frequency, FrequencyUnit},
    page::Page,
    scheduled_task::ScheduledTask,
    scheduled_task_create_params::ScheduledTaskCreateParams,
};
