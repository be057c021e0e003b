use async_trait::async_trait;
use twinprobe_types::scheduler::{Page, ScheduledTask};
use uuid::Uuid;

/// Durable record store for scheduled tasks. The storage layer is expected to serialize
/// per-record writes; the scheduler core doesn't implement its own distributed locking.
#[async_trait]
pub trait TaskStore: Send + Sync + 'static {
    /// Inserts a new task record.
    async fn insert_task(&self, task: &ScheduledTask) -> anyhow::Result<()>;

    /// Updates the mutable portion of an existing task record (its next due time),
    /// returning `false` if the record no longer exists.
    async fn update_task(&self, task: &ScheduledTask) -> anyhow::Result<bool>;

    /// Retrieves the task with the specified ID.
    async fn get_task(&self, id: Uuid) -> anyhow::Result<Option<ScheduledTask>>;

    /// Retrieves all task records.
    async fn get_tasks(&self) -> anyhow::Result<Vec<ScheduledTask>>;

    /// Removes the task with the specified ID, returning `false` if it didn't exist.
    async fn remove_task(&self, id: Uuid) -> anyhow::Result<bool>;

    /// Retrieves a page of tasks with the specified service type, ordered by creation
    /// time.
    async fn get_tasks_by_type(
        &self,
        service_type: &str,
        page: Page,
    ) -> anyhow::Result<Vec<ScheduledTask>>;
}
