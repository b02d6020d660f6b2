//! Settlement Module
//!
//! Death tax settlement: withdraw the tax from the victim (and optionally the
//! killer), pay the killer's reward out of a fully collected tax, and deposit
//! the rest with the collector.
//!
//! # Critical Invariants
//!
//! 1. **Clamped transfers**: every amount handed to the economy is finite,
//!    positive and no larger than its cap
//! 2. **Bounded collection**: victim + killer never pay more than the tax owed
//! 3. **No rollback**: a failed step zeroes its own amount and processing
//!    continues; earlier steps stand
//!
//! # Example
//!
//! ```rust
//! use death_tax_core::{Account, DeathEvent, InMemoryLedger, RecordingNotifier, TaxConfig};
//! use death_tax_core::settlement::TaxSettlementEngine;
//! use death_tax_core::EconomyPort;
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! let ledger = Arc::new(InMemoryLedger::new());
//! let victim = Account::new(Uuid::new_v4(), "Alex");
//! let killer = Account::new(Uuid::new_v4(), "Steve");
//! let bank = Account::new(Uuid::new_v4(), "Treasury");
//! ledger.open_account(&victim, 200.0);
//! ledger.open_account(&killer, 50.0);
//! ledger.open_account(&bank, 0.0);
//!
//! let config = TaxConfig::with_amounts(100.0, 0.0, 30.0, 20.0);
//! let engine = TaxSettlementEngine::new(ledger.clone(), RecordingNotifier::new(), bank.clone(), config);
//!
//! let result = engine.on_death(&DeathEvent::killed_by(victim.clone(), killer.clone()));
//! assert_eq!(result.tax_paid_from_killer, 30.0);
//! assert_eq!(result.tax_paid_from_victim, 70.0);
//! assert_eq!(result.killer_reward, 20.0);
//! assert_eq!(ledger.balance(&bank), 80.0);
//! ```

pub mod engine;
pub mod result;

// Re-export public API
pub use engine::{clamp_amount, TaxSettlementEngine};
pub use result::{SettlementOutcome, SettlementResult, TransferFailure, TransferStep};
