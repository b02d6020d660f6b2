//! Shared test fixtures
//!
//! `ScriptedEconomy` keeps balances like a real ledger but records every
//! transfer request and can be told to reject specific operations.

#![allow(dead_code)]

use death_tax_core::{Account, EconomyError, EconomyPort};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Withdraw,
    Deposit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub op: Op,
    pub account: String,
    pub amount: f64,
}

#[derive(Debug, Default)]
pub struct ScriptedEconomy {
    balances: Mutex<HashMap<Uuid, f64>>,
    failing: Mutex<HashSet<(Op, Uuid)>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedEconomy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(self, account: &Account, balance: f64) -> Self {
        self.balances.lock().unwrap().insert(account.id(), balance);
        self
    }

    /// Reject every `op` on `account` with a ledger error
    pub fn failing(self, op: Op, account: &Account) -> Self {
        self.failing.lock().unwrap().insert((op, account.id()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn withdrawals_from(&self, account: &Account) -> Vec<f64> {
        self.amounts(Op::Withdraw, account)
    }

    pub fn deposits_to(&self, account: &Account) -> Vec<f64> {
        self.amounts(Op::Deposit, account)
    }

    fn amounts(&self, op: Op, account: &Account) -> Vec<f64> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.op == op && c.account == account.name())
            .map(|c| c.amount)
            .collect()
    }

    fn record(&self, op: Op, account: &Account, amount: f64) -> Result<(), EconomyError> {
        self.calls.lock().unwrap().push(Call {
            op,
            account: account.name().to_string(),
            amount,
        });
        if self.failing.lock().unwrap().contains(&(op, account.id())) {
            return Err(EconomyError::Ledger("scripted failure".to_string()));
        }
        Ok(())
    }
}

impl EconomyPort for ScriptedEconomy {
    fn balance(&self, account: &Account) -> f64 {
        self.balances
            .lock()
            .unwrap()
            .get(&account.id())
            .copied()
            .unwrap_or(0.0)
    }

    fn withdraw(&self, account: &Account, amount: f64) -> Result<(), EconomyError> {
        self.record(Op::Withdraw, account, amount)?;
        *self.balances.lock().unwrap().entry(account.id()).or_insert(0.0) -= amount;
        Ok(())
    }

    fn deposit(&self, account: &Account, amount: f64) -> Result<(), EconomyError> {
        self.record(Op::Deposit, account, amount)?;
        *self.balances.lock().unwrap().entry(account.id()).or_insert(0.0) += amount;
        Ok(())
    }
}

pub fn victim() -> Account {
    Account::new(Uuid::from_u128(1), "Alex")
}

pub fn killer() -> Account {
    Account::new(Uuid::from_u128(2), "Steve")
}

pub fn collector() -> Account {
    Account::new(Uuid::from_u128(3), "Treasury")
}

/// Approximate equality for f64 money comparisons
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
