//! DeathTax Core
//!
//! Computes and settles a monetary tax when a player dies: the victim (and
//! optionally the killer) pays, the killer may be rewarded, and the remainder
//! goes to a fixed collector account.
//!
//! # Architecture
//!
//! - **models**: Domain types (Account, DeathEvent)
//! - **config**: Tax parameters and settings file loading
//! - **economy**: Balance/transfer port and an in-memory ledger
//! - **notify**: Player notifications and template rendering
//! - **settlement**: The settlement engine
//! - **bootstrap**: Startup checks and engine construction
//!
//! # Critical Invariants
//!
//! 1. The engine never mutates balances directly; all money moves through `EconomyPort`
//! 2. Every transfer amount is clamped before it is requested
//! 3. Settlement never fails the host: errors are logged and recorded

// Module declarations
pub mod bootstrap;
pub mod config;
pub mod economy;
pub mod models;
pub mod notify;
pub mod settlement;

// Re-exports for convenience
pub use bootstrap::StartupError;
pub use config::{ConfigError, DeathTaxSettings, TaxConfig};
pub use economy::{EconomyError, EconomyPort, InMemoryLedger, LedgerSnapshot};
pub use models::{Account, DeathEvent};
pub use notify::{Notifier, RecordingNotifier};
pub use settlement::{
    SettlementOutcome, SettlementResult, TaxSettlementEngine, TransferFailure, TransferStep,
};
