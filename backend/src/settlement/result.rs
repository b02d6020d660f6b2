//! Settlement results
//!
//! What actually moved during one death event. Lives only for the duration
//! of the event; the driver serialises it for reporting.

use serde::Serialize;
use std::fmt;

/// How far settlement got
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementOutcome {
    /// Configured tax is zero or negative
    NothingOwed,

    /// Victim's balance is below the minimum
    VictimExempt,

    /// Every withdrawal failed or clamped to zero
    NothingCollected,

    /// Something was collected and distribution was attempted
    Settled,
}

/// Transfer steps that can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStep {
    KillerWithdrawal,
    VictimWithdrawal,
    KillerReward,
    CollectorDeposit,
}

impl fmt::Display for TransferStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransferStep::KillerWithdrawal => "killer withdrawal",
            TransferStep::VictimWithdrawal => "victim withdrawal",
            TransferStep::KillerReward => "killer reward",
            TransferStep::CollectorDeposit => "collector deposit",
        };
        f.write_str(label)
    }
}

/// A rejected withdrawal or deposit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferFailure {
    pub step: TransferStep,
    pub account: String,
    pub amount: f64,
    pub reason: String,
}

/// Amounts moved for one death event
///
/// `tax_paid_from_victim` and `tax_paid_from_killer` are what actually left
/// each account; a failed step reports 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementResult {
    pub outcome: SettlementOutcome,

    /// Configured tax after clamping to >= 0
    pub tax_owed: f64,

    pub tax_paid_from_victim: f64,
    pub tax_paid_from_killer: f64,
    pub killer_reward: f64,
    pub collector_received: f64,

    pub failures: Vec<TransferFailure>,
}

impl SettlementResult {
    pub(crate) fn untouched(outcome: SettlementOutcome, tax_owed: f64) -> Self {
        Self {
            outcome,
            tax_owed,
            tax_paid_from_victim: 0.0,
            tax_paid_from_killer: 0.0,
            killer_reward: 0.0,
            collector_received: 0.0,
            failures: Vec::new(),
        }
    }

    /// Sum withdrawn from victim and killer
    pub fn tax_collected(&self) -> f64 {
        self.tax_paid_from_victim + self.tax_paid_from_killer
    }

    /// Whether the full owed amount was withdrawn
    pub fn is_fully_collected(&self) -> bool {
        self.tax_owed > 0.0 && self.tax_collected() >= self.tax_owed
    }

    /// Whether the amount withdrawn differs from the amount owed
    ///
    /// Compares the victim and killer withdrawals, before any killer reward
    /// is paid out of them.
    pub fn is_partial_collection(&self) -> bool {
        self.tax_collected() != self.tax_owed
    }

    /// Whether any money changed hands
    pub fn moved_money(&self) -> bool {
        self.tax_collected() > 0.0 || self.killer_reward > 0.0 || self.collector_received > 0.0
    }

    pub fn failed(&self, step: TransferStep) -> bool {
        self.failures.iter().any(|f| f.step == step)
    }
}
