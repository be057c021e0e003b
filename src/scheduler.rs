mod frequency_calculator;
mod task_scheduler;

pub use self::{
    frequency_calculator::{next_due, InvalidFrequencyError},
    task_scheduler::TaskScheduler,
};
