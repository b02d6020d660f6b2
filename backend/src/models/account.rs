//! Account and death event models
//!
//! An `Account` is an opaque player identity. Balances are never stored here;
//! they live in whatever ledger sits behind the `EconomyPort`.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Player (or collector) identity as seen by the economy
///
/// # Example
/// ```
/// use death_tax_core::Account;
/// use uuid::Uuid;
///
/// let account = Account::new(Uuid::nil(), "Steve");
/// assert_eq!(account.name(), "Steve");
/// assert_eq!(account.to_string(), "Steve");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    /// Stable identifier used by the ledger
    id: Uuid,

    /// Display name, used in logs only
    name: String,
}

impl Account {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Account with no known display name; the UUID doubles as the name
    pub fn unnamed(id: Uuid) -> Self {
        Self {
            id,
            name: id.to_string(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A player died
///
/// Produced by the host; `killer` is set when another player is credited
/// with the kill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathEvent {
    pub victim: Account,

    #[serde(default)]
    pub killer: Option<Account>,
}

impl DeathEvent {
    /// Death with no player credited (fall damage, mobs, ...)
    pub fn natural(victim: Account) -> Self {
        Self {
            victim,
            killer: None,
        }
    }

    pub fn killed_by(victim: Account, killer: Account) -> Self {
        Self {
            victim,
            killer: Some(killer),
        }
    }

    pub fn has_killer(&self) -> bool {
        self.killer.is_some()
    }
}
