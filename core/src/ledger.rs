//! Currency ledger collaborator
//!
//! The fight only reads a balance and writes back the credited total.
//! There is no transaction spanning survivors: each credit stands alone.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hashbrown::{HashMap, HashSet};
use thiserror::Error;

/// Errors from the ledger service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("ledger unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("no ledger account for {user}")]
    NoAccount { user: String },

    #[error("ledger rejected the balance update for {user}")]
    Rejected { user: String },
}

/// Balance lookup and update for channel currency.
///
/// `check_balance` returns `Ok(None)` when the user has no account.
pub trait Ledger: Send + Sync {
    fn check_balance(
        &self,
        user: &str,
    ) -> impl Future<Output = Result<Option<i64>, LedgerError>> + Send;

    fn update_funds(
        &self,
        user: &str,
        new_balance: i64,
    ) -> impl Future<Output = Result<(), LedgerError>> + Send;
}

impl<L: Ledger + ?Sized> Ledger for Arc<L> {
    fn check_balance(
        &self,
        user: &str,
    ) -> impl Future<Output = Result<Option<i64>, LedgerError>> + Send {
        (**self).check_balance(user)
    }

    fn update_funds(
        &self,
        user: &str,
        new_balance: i64,
    ) -> impl Future<Output = Result<(), LedgerError>> + Send {
        (**self).update_funds(user, new_balance)
    }
}

#[derive(Debug, Default)]
struct MemoryLedgerInner {
    balances: HashMap<String, i64>,
    offline: HashSet<String>,
}

/// In-process ledger keyed by account name
#[derive(Debug, Default)]
pub struct MemoryLedger {
    inner: Mutex<MemoryLedgerInner>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryLedgerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create an account if missing. Existing balances are kept.
    pub fn open_account(&self, user: &str, balance: i64) {
        self.lock().balances.entry(user.to_string()).or_insert(balance);
    }

    pub fn balance(&self, user: &str) -> Option<i64> {
        self.lock().balances.get(user).copied()
    }

    /// Make every call for `user` fail as if the service were down
    pub fn set_unavailable(&self, user: &str, unavailable: bool) {
        let mut inner = self.lock();
        if unavailable {
            inner.offline.insert(user.to_string());
        } else {
            inner.offline.remove(user);
        }
    }

    fn check_online(inner: &MemoryLedgerInner, user: &str) -> Result<(), LedgerError> {
        if inner.offline.contains(user) {
            return Err(LedgerError::Unavailable {
                reason: format!("account service for {user} is offline"),
            });
        }
        Ok(())
    }
}

impl Ledger for MemoryLedger {
    async fn check_balance(&self, user: &str) -> Result<Option<i64>, LedgerError> {
        let inner = self.lock();
        Self::check_online(&inner, user)?;
        Ok(inner.balances.get(user).copied())
    }

    async fn update_funds(&self, user: &str, new_balance: i64) -> Result<(), LedgerError> {
        let mut inner = self.lock();
        Self::check_online(&inner, user)?;
        match inner.balances.get_mut(user) {
            Some(balance) => {
                *balance = new_balance;
                Ok(())
            }
            None => Err(LedgerError::NoAccount {
                user: user.to_string(),
            }),
        }
    }
}
