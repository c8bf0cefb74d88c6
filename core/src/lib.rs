pub mod catalog;
pub mod chat;
pub mod combat;
pub mod context;
pub mod fighter;
pub mod ledger;
pub mod messages;
pub mod registry;
pub mod rewards;
pub mod scheduler;

// Re-exports for convenience
pub use catalog::{
    BossCatalog, BossTier, CatalogError, CatalogSource, DirectoryCatalog, StaticCatalog,
    builtin_catalog,
};
pub use chat::{ChannelChat, ChatOutput, RecordingChat};
pub use combat::{CombatEvent, CombatOutcome, FightRng, ScriptedRolls, SeededRoller, resolve};
pub use fighter::{Fighter, FighterStats, account_key};
pub use ledger::{Ledger, LedgerError, MemoryLedger};
pub use messages::Narrator;
pub use registry::{FighterRegistry, JoinRejection};
pub use rewards::{Payout, RewardPlan, SettlementReport, Verdict, classify, plan_rewards, settle};
pub use scheduler::{Admission, CycleStatus, FightHandle, FightScheduler, PhaseKind};
