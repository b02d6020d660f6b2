//! JSON report printed by `death-tax run`

use death_tax_core::economy::LedgerEntry;
use death_tax_core::notify::DeliveredMessage;
use death_tax_core::{DeathEvent, SettlementResult};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct EventReport {
    pub victim: String,
    pub killer: Option<String>,
    #[serde(flatten)]
    pub result: SettlementResult,
}

impl EventReport {
    pub fn new(event: &DeathEvent, result: SettlementResult) -> Self {
        Self {
            victim: event.victim.name().to_string(),
            killer: event.killer.as_ref().map(|k| k.name().to_string()),
            result,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub results: Vec<EventReport>,
    pub messages: Vec<DeliveredMessage>,
    pub balances: Vec<LedgerEntry>,
}
