mod background_tasks;
mod config;
mod error;

pub use background_tasks::BackgroundTasks;
pub use config::{
    AppConfig, AppConfigExt, ChatterRole, ClassStats, FightMessages, FightSettings,
    FighterClasses,
};
pub use error::ConfigError;
