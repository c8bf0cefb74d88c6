use std::sync::Arc;

use bossfight_core::context::{AppConfig, AppConfigExt, BackgroundTasks};
use bossfight_core::{ChannelChat, FightHandle, FightScheduler, MemoryLedger};
use tokio::sync::{Mutex, RwLock};

/// Holds all shared state for the CLI application.
/// This is a lightweight container - fight logic lives in the scheduler.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    /// In-memory channel currency. Accounts are opened on first join.
    pub ledger: Arc<MemoryLedger>,
    pub fight: FightHandle,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
}

impl CliContext {
    /// Load the configuration and start the fight scheduler.
    ///
    /// Must be called from inside the tokio runtime.
    pub fn start(config: AppConfig) -> Result<Self, String> {
        config.validate().map_err(|e| e.to_string())?;

        let ledger = Arc::new(MemoryLedger::new());
        let (chat, mut chat_rx) = ChannelChat::new();
        let (scheduler, fight) = FightScheduler::new(
            config.clone(),
            Arc::new(chat),
            Arc::clone(&ledger),
            config.catalog_source(),
        );

        let chat_printer = tokio::spawn(async move {
            while let Some(line) = chat_rx.recv().await {
                println!("[chat] {line}");
            }
        });

        let tasks = BackgroundTasks {
            scheduler: Some(tokio::spawn(scheduler.run())),
            chat_printer: Some(chat_printer),
        };

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            ledger,
            fight,
            tasks: Arc::new(Mutex::new(tasks)),
        })
    }

    /// Stop the scheduler, letting a fight in progress settle first
    pub async fn shutdown(&self) {
        if let Err(e) = self.fight.shutdown().await {
            tracing::warn!(error = %e, "Scheduler already stopped");
        }

        let mut tasks = self.tasks.lock().await;
        tasks.join_scheduler().await;
        tasks.abort_all().await;
    }
}
