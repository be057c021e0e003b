use crate::{
    api::Api,
    error::Error as TwinprobeError,
    network::ModuleRegistry,
    scheduler::next_due,
    tasks::TaskStore,
};
use anyhow::{anyhow, bail};
use std::{collections::HashMap, sync::Arc, time::Instant};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, error, info, warn};
use twinprobe_types::{
    invocation::InvocationRequest,
    scheduler::{Page, ScheduledTask, ScheduledTaskCreateParams},
};
use uuid::Uuid;

/// Map from the task ID to the ID of the one-shot timer job currently armed for it.
type TimerHandles = Arc<RwLock<HashMap<Uuid, Uuid>>>;

/// Owns the in-memory timer set: arms a one-shot timer for every registered task,
/// executes due tasks via the invocation API, and re-arms them for the next occurrence
/// until they are deleted.
pub struct TaskScheduler<TS: TaskStore, MR: ModuleRegistry> {
    api: Arc<Api<TS, MR>>,
    inner_scheduler: JobScheduler,
    handles: TimerHandles,
}

impl<TS: TaskStore, MR: ModuleRegistry> TaskScheduler<TS, MR> {
    /// Starts the scheduler: re-arms every persisted task and begins processing timers.
    pub async fn start(api: Arc<Api<TS, MR>>) -> anyhow::Result<Self> {
        let scheduler = Self {
            api,
            inner_scheduler: JobScheduler::new().await?,
            handles: Arc::new(RwLock::new(HashMap::new())),
        };

        if scheduler.api.config.scheduler.enabled {
            scheduler.initialize().await?;
        } else {
            warn!("Task scheduler is disabled, persisted tasks won't be armed.");
        }

        scheduler.inner_scheduler.start().await?;

        Ok(scheduler)
    }

    /// Registers a new task: persists it and arms a one-shot timer at its next due time.
    pub async fn register_task(
        &self,
        params: ScheduledTaskCreateParams,
    ) -> anyhow::Result<ScheduledTask> {
        let created_at = OffsetDateTime::now_utc();

        // Validate the cadence even when the first due time is explicit.
        let computed_next = next_due(params.frequency, created_at)
            .map_err(|err| anyhow!(TwinprobeError::client_with_root_cause(err.into())))?;
        let next_execution_time = params.next_execution_time.unwrap_or(computed_next);

        let task = ScheduledTask {
            id: Uuid::now_v7(),
            module_id: params.module_id,
            service_id: params.service_id,
            service_type: params.service_type,
            frequency: params.frequency,
            mode: params.mode,
            payload: params.payload,
            created_at,
            next_execution_time,
        };

        // Persist first so that a storage failure never leaves an orphaned timer behind.
        self.api
            .store
            .insert_task(&task)
            .await
            .map_err(|err| anyhow!(TwinprobeError::service_operation(err)))?;

        Self::arm_job(
            self.api.clone(),
            self.handles.clone(),
            &self.inner_scheduler,
            task.clone(),
            task.next_execution_time,
        )
        .await?;

        info!(
            task.id = %task.id,
            task.module_id = %task.module_id,
            task.service_id = %task.service_id,
            "Registered scheduled task."
        );

        Ok(task)
    }

    /// Deletes the task: cancels its pending timer, if any, and removes the persisted
    /// record so the task is never re-armed again.
    pub async fn delete_task(&self, id: Uuid) -> anyhow::Result<()> {
        let job_id = self.handles.write().await.remove(&id);
        if let Some(job_id) = job_id {
            self.inner_scheduler.remove(&job_id).await?;
        }

        // Remove the record even when there is no in-memory handle (e.g. right after a
        // restart) so the task won't be re-armed by the next startup scan.
        let removed = self
            .api
            .store
            .remove_task(id)
            .await
            .map_err(|err| anyhow!(TwinprobeError::service_operation(err)))?;
        if !removed && job_id.is_none() {
            bail!(TwinprobeError::not_found(format!(
                "Task ('{id}') is not registered."
            )));
        }

        info!(task.id = %id, "Removed scheduled task.");

        Ok(())
    }

    /// Retrieves the task with the specified ID.
    pub async fn get_task(&self, id: Uuid) -> anyhow::Result<Option<ScheduledTask>> {
        self.api.store.get_task(id).await
    }

    /// Retrieves a page of tasks with the specified service type. This is an
    /// observability query: storage failures are reported as an empty result set.
    pub async fn query_tasks_by_type(&self, service_type: &str, page: Page) -> Vec<ScheduledTask> {
        match self.api.store.get_tasks_by_type(service_type, page).await {
            Ok(tasks) => tasks,
            Err(err) => {
                error!("Failed to query tasks by service type ('{service_type}'): {err:?}");
                Vec::new()
            }
        }
    }

    /// Stops timer processing. Armed timers are dropped; persisted tasks are re-armed on
    /// the next start.
    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        Ok(self.inner_scheduler.shutdown().await?)
    }

    /// Arms timers for all persisted tasks. Tasks that were due while the process was
    /// down execute once immediately and continue from now; failures are isolated per
    /// task.
    async fn initialize(&self) -> anyhow::Result<()> {
        let tasks = match self.api.store.get_tasks().await {
            Ok(tasks) => tasks,
            Err(err) => {
                // A storage outage must not crash the process: zero tasks are armed, to
                // be retried on the next restart or manual re-registration.
                error!("Failed to load persisted tasks, no tasks will be armed: {err:?}");
                return Ok(());
            }
        };

        info!("Loaded {} persisted tasks.", tasks.len());

        let mut armed_tasks = 0;
        for task in tasks {
            let task_id = task.id;
            match self.initialize_task(task).await {
                Ok(true) => armed_tasks += 1,
                Ok(false) => {}
                Err(err) => {
                    error!(task.id = %task_id, "Failed to arm persisted task: {err:?}");
                }
            }
        }

        info!("Armed {armed_tasks} persisted tasks.");

        Ok(())
    }

    async fn initialize_task(&self, task: ScheduledTask) -> anyhow::Result<bool> {
        // Deletion may have raced the startup scan, re-check the record right before
        // arming.
        if self.api.store.get_task(task.id).await?.is_none() {
            return Ok(false);
        }

        let now = OffsetDateTime::now_utc();
        let due_at = if task.next_execution_time <= now {
            // The process was down through one or more due times: execute once
            // immediately and compute the next due time from now, not from the missed
            // instant, to avoid a burst of catch-up executions.
            now
        } else {
            task.next_execution_time
        };

        Self::arm_job(
            self.api.clone(),
            self.handles.clone(),
            &self.inner_scheduler,
            task,
            due_at,
        )
        .await?;

        Ok(true)
    }

    /// Arms a one-shot timer that fires the task at the specified due time.
    async fn arm_job(
        api: Arc<Api<TS, MR>>,
        handles: TimerHandles,
        scheduler: &JobScheduler,
        task: ScheduledTask,
        due_at: OffsetDateTime,
    ) -> anyhow::Result<()> {
        let task_id = task.id;
        let job = Self::create_fire_job(api, handles.clone(), task, due_at)?;
        let job_id = job.guid();

        // Publish the handle before the job goes live so a concurrent deletion always
        // finds a timer to cancel.
        handles.write().await.insert(task_id, job_id);
        if let Err(err) = scheduler.add(job).await {
            let mut handles = handles.write().await;
            if handles.get(&task_id) == Some(&job_id) {
                handles.remove(&task_id);
            }
            return Err(err.into());
        }

        debug!(task.id = %task_id, job.id = %job_id, "Armed one-shot timer for scheduled task.");

        Ok(())
    }

    fn create_fire_job(
        api: Arc<Api<TS, MR>>,
        handles: TimerHandles,
        task: ScheduledTask,
        due_at: OffsetDateTime,
    ) -> anyhow::Result<Job> {
        let now = OffsetDateTime::now_utc();
        let delay = std::time::Duration::try_from(due_at - now).unwrap_or_default();

        let job = Job::new_one_shot_async(delay, move |job_id, scheduler| {
            let api = api.clone();
            let handles = handles.clone();
            let task = task.clone();
            Box::pin(async move {
                Self::fire(api, handles, scheduler, job_id, task, due_at).await;
            })
        })?;

        Ok(job)
    }

    /// Executes a due task and re-arms it for its next occurrence. Never propagates
    /// errors: a failing remote call doesn't stop the schedule, it only gets logged.
    async fn fire(
        api: Arc<Api<TS, MR>>,
        handles: TimerHandles,
        scheduler: JobScheduler,
        job_id: Uuid,
        task: ScheduledTask,
        due_at: OffsetDateTime,
    ) {
        let execute_start = Instant::now();
        let request = InvocationRequest::from(&task);
        match api.invocation().invoke(&request).await {
            Ok(_) => {
                debug!(
                    task.id = %task.id,
                    task.module_id = %task.module_id,
                    task.service_id = %task.service_id,
                    "Successfully executed scheduled task ({} elapsed).",
                    humantime::format_duration(execute_start.elapsed())
                );
            }
            Err(err) => {
                error!(
                    task.id = %task.id,
                    task.module_id = %task.module_id,
                    task.service_id = %task.service_id,
                    task.failure_kind = err.kind_tag(),
                    "Failed to execute scheduled task ({} elapsed): {err}",
                    humantime::format_duration(execute_start.elapsed())
                );
            }
        }

        // The fired one-shot timer won't tick again, drop its metadata.
        if let Err(err) = scheduler.remove(&job_id).await {
            debug!(task.id = %task.id, job.id = %job_id, "Failed to remove used one-shot timer: {err}");
        }

        // The next due time continues from the instant that was just due, not from the
        // wall clock, so the cadence doesn't drift by the execution duration.
        let next_execution_time = match next_due(task.frequency, due_at) {
            Ok(next_execution_time) => next_execution_time,
            Err(err) => {
                // Only possible for a record tampered with outside the registration path.
                error!(task.id = %task.id, "Cannot compute the next due time, the task won't be re-armed: {err}");
                handles.write().await.remove(&task.id);
                return;
            }
        };

        let task = ScheduledTask {
            next_execution_time,
            ..task
        };
        let task_id = task.id;

        // Deletion is authoritative: only a still-present record is allowed to re-arm.
        match api.store.update_task(&task).await {
            Ok(true) => {}
            Ok(false) => {
                debug!(task.id = %task_id, "Task was deleted mid-cycle and won't be re-armed.");
                handles.write().await.remove(&task_id);
                return;
            }
            Err(err) => {
                // Keep the schedule alive through a storage outage; the stored due time
                // catches up on the next successful cycle.
                error!(task.id = %task_id, "Failed to store the next due time: {err:?}");
            }
        }

        if let Err(err) = Self::arm_job(api, handles, &scheduler, task, next_execution_time).await {
            error!(task.id = %task_id, "Failed to re-arm scheduled task: {err:?}");
        }
    }
}
