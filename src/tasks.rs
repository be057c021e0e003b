mod database_ext;
mod memory_task_store;
mod task_store;

pub use self::{memory_task_store::MemoryTaskStore, task_store::TaskStore};
