//! Death tax settlement engine
//!
//! Runs the transfer chain for one death event:
//!
//! ```text
//! killer ──(share)──┐
//!                   ├──> collected ──(reward)──> killer
//! victim ──(rest)───┘        │
//!                            └──(remainder)────> collector
//! ```
//!
//! The killer's share is subtracted from the victim's share before the
//! killer withdrawal is attempted, and is not restored if that withdrawal
//! fails. The killer reward is only paid when the full tax was collected.

use crate::config::TaxConfig;
use crate::economy::{EconomyError, EconomyPort};
use crate::models::{Account, DeathEvent};
use crate::notify::Notifier;
use crate::settlement::result::{
    SettlementOutcome, SettlementResult, TransferFailure, TransferStep,
};

/// Clamp `amount` into `[0, cap]`
///
/// NaN amounts and NaN or negative caps clamp to 0.
///
/// # Example
/// ```
/// use death_tax_core::settlement::clamp_amount;
///
/// assert_eq!(clamp_amount(30.0, 10.0), 10.0);
/// assert_eq!(clamp_amount(-5.0, 10.0), 0.0);
/// assert_eq!(clamp_amount(5.0, -1.0), 0.0);
/// assert_eq!(clamp_amount(f64::NAN, 10.0), 0.0);
/// ```
pub fn clamp_amount(amount: f64, cap: f64) -> f64 {
    amount.max(0.0).min(cap.max(0.0))
}

/// Computes and executes death tax transfers
///
/// Holds no mutable state: the collector and configuration are fixed at
/// construction, so one engine can serve concurrent death events as long as
/// the economy serialises its own access.
#[derive(Debug)]
pub struct TaxSettlementEngine<E, N> {
    economy: E,
    notifier: N,
    collector: Account,
    config: TaxConfig,
}

impl<E: EconomyPort, N: Notifier> TaxSettlementEngine<E, N> {
    pub fn new(economy: E, notifier: N, collector: Account, config: TaxConfig) -> Self {
        Self {
            economy,
            notifier,
            collector,
            config,
        }
    }

    pub fn collector(&self) -> &Account {
        &self.collector
    }

    pub fn config(&self) -> &TaxConfig {
        &self.config
    }

    pub fn economy(&self) -> &E {
        &self.economy
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Host entry point: settle `event` with the engine's configuration
    pub fn on_death(&self, event: &DeathEvent) -> SettlementResult {
        self.settle(event, &self.config)
    }

    /// Settle one death event against an explicit configuration snapshot
    ///
    /// Never fails: rejected transfers are logged, recorded in
    /// `SettlementResult::failures` and treated as zero downstream.
    pub fn settle(&self, event: &DeathEvent, config: &TaxConfig) -> SettlementResult {
        let victim = &event.victim;
        let killer = event.killer.as_ref();

        let tax_amount = config.death_tax_amount.max(0.0);
        if tax_amount <= 0.0 {
            return SettlementResult::untouched(SettlementOutcome::NothingOwed, 0.0);
        }

        let victim_balance = self.economy.balance(victim);
        if victim_balance < config.minimum_balance.max(0.0) {
            log::debug!(
                "{} is below the minimum balance, skipping death tax",
                victim
            );
            return SettlementResult::untouched(SettlementOutcome::VictimExempt, tax_amount);
        }

        let mut result = SettlementResult::untouched(SettlementOutcome::Settled, tax_amount);
        let mut tax_paid_from_victim = tax_amount;
        let mut tax_paid_from_killer = 0.0;

        if let Some(killer) = killer {
            let killer_balance = self.economy.balance(killer);
            let intended = clamp_amount(config.amount_from_killer, tax_amount);

            // Victim's share shrinks by the intended amount, even if the
            // killer turns out unable to pay it.
            tax_paid_from_victim = (tax_paid_from_victim - intended).max(0.0);

            let killer_contribution = clamp_amount(intended, killer_balance);
            if killer_contribution > 0.0 {
                match self.economy.withdraw(killer, killer_contribution) {
                    Ok(()) => {
                        tax_paid_from_killer = killer_contribution;
                        self.notifier.notify(
                            killer,
                            &config.taxed_notification,
                            killer_contribution,
                        );
                    }
                    Err(err) => {
                        record_failure(
                            &mut result,
                            TransferStep::KillerWithdrawal,
                            killer,
                            killer_contribution,
                            &err,
                        );
                    }
                }
            }
        }

        if tax_paid_from_victim > 0.0 {
            let victim_contribution = clamp_amount(tax_paid_from_victim, victim_balance);
            tax_paid_from_victim = 0.0;
            if victim_contribution > 0.0 {
                match self.economy.withdraw(victim, victim_contribution) {
                    Ok(()) => {
                        tax_paid_from_victim = victim_contribution;
                        self.notifier.notify(
                            victim,
                            &config.taxed_notification,
                            victim_contribution,
                        );
                    }
                    Err(err) => {
                        record_failure(
                            &mut result,
                            TransferStep::VictimWithdrawal,
                            victim,
                            victim_contribution,
                            &err,
                        );
                    }
                }
            }
        }

        result.tax_paid_from_victim = tax_paid_from_victim;
        result.tax_paid_from_killer = tax_paid_from_killer;

        let mut tax_collected = tax_paid_from_killer + tax_paid_from_victim;
        if tax_collected <= 0.0 {
            result.outcome = SettlementOutcome::NothingCollected;
            return result;
        }

        if let Some(killer) = killer {
            if tax_collected >= tax_amount {
                let reward = clamp_amount(config.amount_to_killer, tax_collected);
                if reward > 0.0 {
                    match self.economy.deposit(killer, reward) {
                        Ok(()) => {
                            tax_collected -= reward;
                            result.killer_reward = reward;
                            self.notifier.notify(
                                killer,
                                &config.tax_received_notification,
                                reward,
                            );
                        }
                        Err(err) => {
                            record_failure(
                                &mut result,
                                TransferStep::KillerReward,
                                killer,
                                reward,
                                &err,
                            );
                        }
                    }
                }
            }
        }

        if tax_collected > 0.0 {
            match self.economy.deposit(&self.collector, tax_collected) {
                Ok(()) => {
                    result.collector_received = tax_collected;
                    self.notifier.notify(
                        &self.collector,
                        &config.collector_notification,
                        tax_collected,
                    );
                    // Judged on what was withdrawn, not on what remains after
                    // the killer reward.
                    if let Some(killer) = killer {
                        if result.is_partial_collection() {
                            log::info!(
                                "Partial DeathTax for {}: collected {:.2} of {:.2} owed (killer {})",
                                victim,
                                result.tax_collected(),
                                tax_amount,
                                killer
                            );
                        }
                    }
                }
                Err(err) => {
                    record_failure(
                        &mut result,
                        TransferStep::CollectorDeposit,
                        &self.collector,
                        tax_collected,
                        &err,
                    );
                }
            }
        }

        result
    }
}

fn record_failure(
    result: &mut SettlementResult,
    step: TransferStep,
    account: &Account,
    amount: f64,
    err: &EconomyError,
) {
    log::warn!("Unable to process DeathTax {} for {}: {}", step, account, err);
    result.failures.push(TransferFailure {
        step,
        account: account.name().to_string(),
        amount,
        reason: err.to_string(),
    });
}
