//! Interval scheduler for the sweep phases.

use std::time::Duration;

use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use tempfiles_core::config::sweeper::SweeperConfig;
use tempfiles_core::error::AppError;

use crate::sweeper::ExpirySweeper;

/// Runs the soft-delete and purge phases on independent timers.
pub struct SweepScheduler {
    scheduler: JobScheduler,
    sweeper: ExpirySweeper,
    config: SweeperConfig,
}

impl std::fmt::Debug for SweepScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweepScheduler")
            .field("config", &self.config)
            .finish()
    }
}

impl SweepScheduler {
    pub async fn new(sweeper: ExpirySweeper, config: SweeperConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            sweeper,
            config,
        })
    }

    /// Register both phases.
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_soft_delete().await?;
        self.register_purge().await?;

        tracing::info!("Sweep tasks registered");
        Ok(())
    }

    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Sweep scheduler started");
        Ok(())
    }

    pub async fn shutdown(&self) -> Result<(), AppError> {
        let mut scheduler = self.scheduler.clone();
        scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shut down scheduler: {e}")))?;

        tracing::info!("Sweep scheduler shut down");
        Ok(())
    }

    /// Soft-delete expired folders every `soft_delete_interval_seconds`.
    async fn register_soft_delete(&self) -> Result<(), AppError> {
        let interval = Duration::from_secs(self.config.soft_delete_interval_seconds.max(1));
        let sweeper = self.sweeper.clone();
        let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
            let sweeper = sweeper.clone();
            Box::pin(async move {
                if let Err(e) = sweeper.soft_delete_expired(Utc::now()).await {
                    tracing::error!(error = %e, "Soft-delete sweep failed");
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create soft-delete schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add soft-delete schedule: {e}")))?;

        tracing::info!(interval_seconds = interval.as_secs(), "Registered: soft_delete");
        Ok(())
    }

    /// Purge deleted folders every `purge_interval_seconds`.
    async fn register_purge(&self) -> Result<(), AppError> {
        let interval = Duration::from_secs(self.config.purge_interval_seconds.max(1));
        let sweeper = self.sweeper.clone();
        let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
            let sweeper = sweeper.clone();
            Box::pin(async move {
                if let Err(e) = sweeper.purge_deleted().await {
                    tracing::error!(error = %e, "Purge sweep failed");
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create purge schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add purge schedule: {e}")))?;

        tracing::info!(interval_seconds = interval.as_secs(), "Registered: purge");
        Ok(())
    }
}
