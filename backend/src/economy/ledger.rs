//! In-memory ledger
//!
//! A mutex-guarded balance map implementing `EconomyPort`. Accounts must be
//! opened before they can receive or pay; unknown accounts report a zero
//! balance.

use crate::economy::{EconomyError, EconomyPort};
use crate::models::Account;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// One account row in a ledger snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub name: String,
    pub balance: f64,

    /// Whether the player currently has a session (driver use only)
    #[serde(default)]
    pub online: bool,
}

impl LedgerEntry {
    pub fn account(&self) -> Account {
        Account::new(self.id, self.name.clone())
    }
}

/// Serializable ledger contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub accounts: Vec<LedgerEntry>,
}

impl LedgerSnapshot {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Look up an account row by id
    pub fn find(&self, id: Uuid) -> Option<&LedgerEntry> {
        self.accounts.iter().find(|entry| entry.id == id)
    }
}

#[derive(Debug, Default)]
struct Inner {
    balances: HashMap<Uuid, f64>,
    names: HashMap<Uuid, String>,
}

/// Thread-safe in-memory implementation of `EconomyPort`
///
/// # Example
/// ```
/// use death_tax_core::{Account, EconomyPort, InMemoryLedger};
/// use uuid::Uuid;
///
/// let ledger = InMemoryLedger::new();
/// let steve = Account::new(Uuid::new_v4(), "Steve");
/// ledger.open_account(&steve, 100.0);
///
/// ledger.withdraw(&steve, 40.0).unwrap();
/// assert_eq!(ledger.balance(&steve), 60.0);
/// assert!(ledger.withdraw(&steve, 100.0).is_err());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    inner: Mutex<Inner>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: &LedgerSnapshot) -> Self {
        let ledger = Self::new();
        for entry in &snapshot.accounts {
            ledger.open_account(&entry.account(), entry.balance);
        }
        ledger
    }

    /// Open `account` with an opening balance, replacing any existing row
    pub fn open_account(&self, account: &Account, balance: f64) {
        let mut inner = self.lock();
        inner.balances.insert(account.id(), balance);
        inner.names.insert(account.id(), account.name().to_string());
    }

    pub fn set_balance(&self, account: &Account, balance: f64) -> Result<(), EconomyError> {
        let mut inner = self.lock();
        match inner.balances.get_mut(&account.id()) {
            Some(current) => {
                *current = balance;
                Ok(())
            }
            None => Err(EconomyError::UnknownAccount(account.name().to_string())),
        }
    }

    pub fn has_account(&self, id: Uuid) -> bool {
        self.lock().balances.contains_key(&id)
    }

    /// Display name recorded when the account was opened
    pub fn name_of(&self, id: Uuid) -> Option<String> {
        self.lock().names.get(&id).cloned()
    }

    /// Sum of all balances
    pub fn total(&self) -> f64 {
        self.lock().balances.values().sum()
    }

    /// Current contents, sorted by name for stable output
    pub fn snapshot(&self) -> LedgerSnapshot {
        let inner = self.lock();
        let mut accounts: Vec<LedgerEntry> = inner
            .balances
            .iter()
            .map(|(id, balance)| LedgerEntry {
                id: *id,
                name: inner.names.get(id).cloned().unwrap_or_else(|| id.to_string()),
                balance: *balance,
                online: false,
            })
            .collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        LedgerSnapshot { accounts }
    }

    // A poisoned lock only means another thread panicked mid-update; the map
    // itself is still consistent because every update is a single insert.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn validate_amount(amount: f64) -> Result<(), EconomyError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(EconomyError::InvalidAmount(amount));
    }
    Ok(())
}

impl EconomyPort for InMemoryLedger {
    fn balance(&self, account: &Account) -> f64 {
        self.lock()
            .balances
            .get(&account.id())
            .copied()
            .unwrap_or(0.0)
    }

    fn withdraw(&self, account: &Account, amount: f64) -> Result<(), EconomyError> {
        validate_amount(amount)?;
        let mut inner = self.lock();
        let balance = inner
            .balances
            .get_mut(&account.id())
            .ok_or_else(|| EconomyError::UnknownAccount(account.name().to_string()))?;

        if *balance < amount {
            return Err(EconomyError::InsufficientFunds {
                required: amount,
                available: *balance,
            });
        }

        *balance -= amount;
        Ok(())
    }

    fn deposit(&self, account: &Account, amount: f64) -> Result<(), EconomyError> {
        validate_amount(amount)?;
        let mut inner = self.lock();
        let balance = inner
            .balances
            .get_mut(&account.id())
            .ok_or_else(|| EconomyError::UnknownAccount(account.name().to_string()))?;

        *balance += amount;
        Ok(())
    }
}
