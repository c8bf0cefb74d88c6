//! Fighter registry for one fight cycle
//!
//! Many chat handlers add entrants concurrently; the scheduler closes the
//! registry exactly once when the recruitment window ends. Accepted entrants
//! keep their acceptance order, which is the combat turn order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use hashbrown::HashSet;
use thiserror::Error;

use crate::fighter::Fighter;

/// Why a join request was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum JoinRejection {
    #[error("already entered in this fight")]
    DuplicateEntry,

    #[error("the recruitment window is closed")]
    WindowClosed,

    #[error("the boss fight is on cooldown for another {}s", remaining.as_secs())]
    OnCooldown { remaining: Duration },

    #[error("the boss fight scheduler is not running")]
    Stopped,
}

#[derive(Debug, Default)]
struct RegistryInner {
    fighters: Vec<Fighter>,
    accounts: HashSet<String>,
    frozen: Option<Arc<[Fighter]>>,
}

/// Append-only entrant list, frozen by [`FighterRegistry::close`].
///
/// A registry is never reopened; the scheduler creates a fresh one for
/// every recruitment window.
#[derive(Debug, Default)]
pub struct FighterRegistry {
    inner: Mutex<RegistryInner>,
}

impl FighterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        // Every critical section leaves the state consistent, so a panic in
        // another holder does not invalidate it.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enter a fighter. Returns the fighter's 1-based position in turn order.
    pub fn add(&self, fighter: Fighter) -> Result<usize, JoinRejection> {
        let mut inner = self.lock();

        if inner.frozen.is_some() {
            return Err(JoinRejection::WindowClosed);
        }
        if !inner.accounts.insert(fighter.account()) {
            return Err(JoinRejection::DuplicateEntry);
        }

        inner.fighters.push(fighter);
        Ok(inner.fighters.len())
    }

    /// Freeze the entrant list and return it in acceptance order.
    ///
    /// Idempotent: later calls return the same frozen sequence.
    pub fn close(&self) -> Arc<[Fighter]> {
        let mut inner = self.lock();

        if let Some(frozen) = &inner.frozen {
            return Arc::clone(frozen);
        }

        let fighters: Arc<[Fighter]> = std::mem::take(&mut inner.fighters).into();
        inner.frozen = Some(Arc::clone(&fighters));
        fighters
    }

    pub fn count(&self) -> usize {
        let inner = self.lock();
        match &inner.frozen {
            Some(frozen) => frozen.len(),
            None => inner.fighters.len(),
        }
    }
}
