mod raw_scheduled_task;

use self::raw_scheduled_task::RawScheduledTask;
use crate::{database::Database, tasks::TaskStore};
use async_trait::async_trait;
use twinprobe_types::scheduler::{Page, ScheduledTask};
use uuid::Uuid;

/// Extends the primary database with the scheduled-tasks store contract.
#[async_trait]
impl TaskStore for Database {
    async fn insert_task(&self, task: &ScheduledTask) -> anyhow::Result<()> {
        let raw_task = RawScheduledTask::try_from(task)?;
        sqlx::query(
            r#"
INSERT INTO scheduled_tasks (id, module_id, service_id, service_type, frequency_unit,
                             frequency_value, mode, payload, created_at, next_execution_time)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(raw_task.id)
        .bind(&raw_task.module_id)
        .bind(&raw_task.service_id)
        .bind(&raw_task.service_type)
        .bind(&raw_task.frequency_unit)
        .bind(raw_task.frequency_value)
        .bind(&raw_task.mode)
        .bind(&raw_task.payload)
        .bind(raw_task.created_at)
        .bind(raw_task.next_execution_time)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_task(&self, task: &ScheduledTask) -> anyhow::Result<bool> {
        let result =
            sqlx::query(r#"UPDATE scheduled_tasks SET next_execution_time = $2 WHERE id = $1"#)
                .bind(task.id)
                .bind(task.next_execution_time)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_task(&self, id: Uuid) -> anyhow::Result<Option<ScheduledTask>> {
        sqlx::query_as::<_, RawScheduledTask>(r#"SELECT * FROM scheduled_tasks WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(ScheduledTask::try_from)
            .transpose()
    }

    async fn get_tasks(&self) -> anyhow::Result<Vec<ScheduledTask>> {
        sqlx::query_as::<_, RawScheduledTask>(
            r#"SELECT * FROM scheduled_tasks ORDER BY created_at, id"#,
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(ScheduledTask::try_from)
        .collect()
    }

    async fn remove_task(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM scheduled_tasks WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_tasks_by_type(
        &self,
        service_type: &str,
        page: Page,
    ) -> anyhow::Result<Vec<ScheduledTask>> {
        sqlx::query_as::<_, RawScheduledTask>(
            r#"
SELECT * FROM scheduled_tasks WHERE service_type = $1
ORDER BY created_at, id OFFSET $2 LIMIT $3
            "#,
        )
        .bind(service_type)
        .bind(i64::try_from(page.offset)?)
        .bind(i64::try_from(page.size)?)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(ScheduledTask::try_from)
        .collect()
    }
}
