use tokio_cron_scheduler::{Job, JobScheduler};
use std::sync::Arc;

use crate::services::approval::ApprovalFlow;

/// Periodically retires approval requests that outlived their validity window.
pub struct ApprovalSweeper {
    approvals: Arc<ApprovalFlow>,
    scheduler: JobScheduler,
}

impl ApprovalSweeper {
    pub async fn new(
        approvals: Arc<ApprovalFlow>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            approvals,
            scheduler,
        })
    }

    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let approvals = self.approvals.clone();

        // Every minute, on the minute
        let sweep_job = Job::new_async("0 * * * * *", move |_uuid, _l| {
            let approvals = approvals.clone();
            Box::pin(async move {
                let removed = approvals.sweep_expired().await;
                if removed > 0 {
                    tracing::debug!("Approval sweep removed {} request(s)", removed);
                }
            })
        })?;

        self.scheduler.add(sweep_job).await?;
        self.scheduler.start().await?;

        tracing::info!("Approval sweeper started - checking every minute");
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        Ok(())
    }
}
