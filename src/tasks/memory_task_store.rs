use crate::tasks::TaskStore;
use anyhow::bail;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use twinprobe_types::scheduler::{Page, ScheduledTask};
use uuid::Uuid;

/// In-memory task store used in tests and for embedding without a database.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<HashMap<Uuid, ScheduledTask>>,
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert_task(&self, task: &ScheduledTask) -> anyhow::Result<()> {
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&task.id) {
            bail!("Task ('{}') already exists.", task.id);
        }

        tasks.insert(task.id, task.clone());
        Ok(())
    }

    async fn update_task(&self, task: &ScheduledTask) -> anyhow::Result<bool> {
        let mut tasks = self.tasks.write().await;
        let Some(existing_task) = tasks.get_mut(&task.id) else {
            return Ok(false);
        };

        existing_task.next_execution_time = task.next_execution_time;
        Ok(true)
    }

    async fn get_task(&self, id: Uuid) -> anyhow::Result<Option<ScheduledTask>> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn get_tasks(&self) -> anyhow::Result<Vec<ScheduledTask>> {
        let mut tasks = self
            .tasks
            .read()
            .await
            .values()
            .cloned()
            .collect::<Vec<_>>();
        tasks.sort_by_key(|task| (task.created_at, task.id));
        Ok(tasks)
    }

    async fn remove_task(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.tasks.write().await.remove(&id).is_some())
    }

    async fn get_tasks_by_type(
        &self,
        service_type: &str,
        page: Page,
    ) -> anyhow::Result<Vec<ScheduledTask>> {
        let mut tasks = self
            .tasks
            .read()
            .await
            .values()
            .filter(|task| task.service_type == service_type)
            .cloned()
            .collect::<Vec<_>>();
        tasks.sort_by_key(|task| (task.created_at, task.id));
        Ok(tasks.into_iter().skip(page.offset).take(page.size).collect())
    }
}
