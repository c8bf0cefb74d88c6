use tokio::task::JoinHandle;

/// Long-running tasks owned by the host
#[derive(Default)]
pub struct BackgroundTasks {
    pub scheduler: Option<JoinHandle<()>>,
    pub chat_printer: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    /// Wait for the scheduler to finish its current fight and stop
    pub async fn join_scheduler(&mut self) {
        if let Some(handle) = self.scheduler.take()
            && let Err(e) = handle.await
        {
            tracing::error!(error = %e, "Scheduler task failed");
        }
    }

    pub async fn abort_all(&mut self) {
        if let Some(handle) = self.scheduler.take() {
            handle.abort();
        }
        if let Some(handle) = self.chat_printer.take() {
            handle.abort();
        }
    }
}
