//! Economy port
//!
//! The settlement engine never touches balances directly. Every balance
//! query and transfer goes through `EconomyPort`, which the host backs with
//! its real ledger. `InMemoryLedger` is the reference implementation used by
//! the driver and the tests.

pub mod ledger;

use crate::models::Account;
use std::sync::Arc;
use thiserror::Error;

pub use ledger::{InMemoryLedger, LedgerEntry, LedgerSnapshot};

/// Reasons a withdrawal or deposit can be rejected
///
/// The `Display` form is the reason string that ends up in warning logs.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EconomyError {
    #[error("Insufficient funds: required {required:.2}, available {available:.2}")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    /// Backend failure reported by a host ledger; `InMemoryLedger` never
    /// produces it
    #[error("Ledger error: {0}")]
    Ledger(String),
}

/// Balance and transfer capability consumed by the settlement engine
///
/// Each call is blocking and completes (or fails) before returning.
/// Implementations are responsible for serialising concurrent access.
pub trait EconomyPort: Send + Sync {
    /// Current balance of `account` (0 for accounts the ledger doesn't know)
    fn balance(&self, account: &Account) -> f64;

    fn withdraw(&self, account: &Account, amount: f64) -> Result<(), EconomyError>;

    fn deposit(&self, account: &Account, amount: f64) -> Result<(), EconomyError>;
}

impl<T: EconomyPort + ?Sized> EconomyPort for Arc<T> {
    fn balance(&self, account: &Account) -> f64 {
        (**self).balance(account)
    }

    fn withdraw(&self, account: &Account, amount: f64) -> Result<(), EconomyError> {
        (**self).withdraw(account, amount)
    }

    fn deposit(&self, account: &Account, amount: f64) -> Result<(), EconomyError> {
        (**self).deposit(account, amount)
    }
}

impl<T: EconomyPort + ?Sized> EconomyPort for &T {
    fn balance(&self, account: &Account) -> f64 {
        (**self).balance(account)
    }

    fn withdraw(&self, account: &Account, amount: f64) -> Result<(), EconomyError> {
        (**self).withdraw(account, amount)
    }

    fn deposit(&self, account: &Account, amount: f64) -> Result<(), EconomyError> {
        (**self).deposit(account, amount)
    }
}
