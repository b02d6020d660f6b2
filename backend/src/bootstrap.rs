//! Startup wiring
//!
//! Enabling death tax needs an economy provider and a resolvable collector
//! account. Either missing is fatal: the engine is never constructed and the
//! host should leave death events unhandled.

use crate::config::DeathTaxSettings;
use crate::economy::EconomyPort;
use crate::models::Account;
use crate::notify::Notifier;
use crate::settlement::TaxSettlementEngine;
use thiserror::Error;
use uuid::Uuid;

/// Reasons death tax cannot be enabled
#[derive(Debug, Error, PartialEq)]
pub enum StartupError {
    #[error("No compatible economy provider was detected")]
    EconomyUnavailable,

    #[error("Unknown tax collector UUID configured: {value:?}")]
    InvalidCollector { value: String },
}

/// Parse the configured collector id
///
/// `name_lookup` supplies a display name when the host knows one; otherwise
/// the UUID itself is used.
pub fn resolve_collector(
    raw: &str,
    name_lookup: impl FnOnce(Uuid) -> Option<String>,
) -> Result<Account, StartupError> {
    let id = Uuid::parse_str(raw.trim()).map_err(|_| StartupError::InvalidCollector {
        value: raw.to_string(),
    })?;

    Ok(match name_lookup(id) {
        Some(name) => Account::new(id, name),
        None => Account::unnamed(id),
    })
}

/// Build the engine from loaded settings
///
/// `economy` is `None` when the host has no economy provider registered.
pub fn enable<E: EconomyPort, N: Notifier>(
    settings: &DeathTaxSettings,
    economy: Option<E>,
    notifier: N,
    name_lookup: impl FnOnce(Uuid) -> Option<String>,
) -> Result<TaxSettlementEngine<E, N>, StartupError> {
    let Some(economy) = economy else {
        log::error!("Economy provider wasn't detected! DeathTax will be disabled!");
        return Err(StartupError::EconomyUnavailable);
    };

    let collector = resolve_collector(&settings.tax_collector_uuid, name_lookup).map_err(|err| {
        log::error!("{}! DeathTax will be disabled!", err);
        err
    })?;

    log::info!(
        "DeathTax enabled: {:.2} per death, proceeds to {}",
        settings.tax.death_tax_amount.max(0.0),
        collector
    );

    Ok(TaxSettlementEngine::new(
        economy,
        notifier,
        collector,
        settings.tax.clone(),
    ))
}
