//! Death tax configuration
//!
//! Settings are read from a TOML file with kebab-case keys. Every key is
//! optional: amounts default to 0 and templates to empty, which disables the
//! corresponding behaviour. Values are not validated here; the settlement
//! engine clamps whatever it is given.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration shipped with a fresh install
pub const DEFAULT_CONFIG: &str = r#"# UUID of the account that receives collected death tax
tax-collector-uuid = ""

# Amount taxed on every player death (0 disables the tax)
death-tax-amount = 0.0

# Players with less than this balance are not taxed
minimum-balance = 0.0

# Share of the tax paid by the killer instead of the victim
amount-from-killer = 0.0

# Reward paid to the killer out of a fully collected tax
amount-to-killer = 0.0

# Messages ({TAX} is replaced by the amount, & colour codes are supported)
taxed-notification = "&cYou paid &6${TAX}&c in death tax."
tax-received-notification = "&aYou received &6${TAX}&a for your kill."
collector-notification = "&aThe treasury received &6${TAX}&a in death tax."
"#;

/// Errors loading or saving settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Numeric parameters and templates for one settlement
///
/// The original plugin's `victim-notification`, `killer-notification` and
/// `banker-notification` keys are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TaxConfig {
    pub death_tax_amount: f64,
    pub minimum_balance: f64,
    pub amount_from_killer: f64,
    pub amount_to_killer: f64,

    /// Sent to whoever pays tax (victim and killer)
    #[serde(alias = "victim-notification")]
    pub taxed_notification: String,

    /// Sent to the killer when the kill reward is paid
    #[serde(alias = "killer-notification")]
    pub tax_received_notification: String,

    /// Sent to the collector when proceeds are deposited
    #[serde(alias = "banker-notification")]
    pub collector_notification: String,
}

impl TaxConfig {
    /// Config with amounts only and no notifications
    pub fn with_amounts(
        death_tax_amount: f64,
        minimum_balance: f64,
        amount_from_killer: f64,
        amount_to_killer: f64,
    ) -> Self {
        Self {
            death_tax_amount,
            minimum_balance,
            amount_from_killer,
            amount_to_killer,
            ..Self::default()
        }
    }
}

/// Contents of the settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DeathTaxSettings {
    /// Resolved once at startup; see `bootstrap::resolve_collector`
    pub tax_collector_uuid: String,

    #[serde(flatten)]
    pub tax: TaxConfig,
}

impl DeathTaxSettings {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Settings as shipped in `DEFAULT_CONFIG`
    pub fn shipped_defaults() -> Result<Self, ConfigError> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load settings, writing `DEFAULT_CONFIG` first if the file is missing
    pub fn load_or_init(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!(
                "No config found at {}, writing defaults",
                path.display()
            );
            write_default(path)?;
        }
        Self::load(path)
    }
}

/// Write `DEFAULT_CONFIG` to `path`
pub fn write_default(path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let path = path.as_ref();
    fs::write(path, DEFAULT_CONFIG).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    log::info!("Created default config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_default_to_zero_and_empty() {
        let settings = DeathTaxSettings::from_toml_str("death-tax-amount = 25.0").unwrap();
        assert_eq!(settings.tax.death_tax_amount, 25.0);
        assert_eq!(settings.tax.minimum_balance, 0.0);
        assert_eq!(settings.tax.amount_to_killer, 0.0);
        assert!(settings.tax.taxed_notification.is_empty());
        assert!(settings.tax_collector_uuid.is_empty());
    }

    #[test]
    fn test_shipped_defaults_disable_tax() {
        let settings = DeathTaxSettings::shipped_defaults().unwrap();
        assert_eq!(settings.tax.death_tax_amount, 0.0);
        assert!(settings.tax.taxed_notification.contains("{TAX}"));
    }

    #[test]
    fn test_legacy_notification_keys() {
        let settings = DeathTaxSettings::from_toml_str(
            r#"
            victim-notification = "paid {TAX}"
            killer-notification = "got {TAX}"
            banker-notification = "bank {TAX}"
            "#,
        )
        .unwrap();
        assert_eq!(settings.tax.taxed_notification, "paid {TAX}");
        assert_eq!(settings.tax.tax_received_notification, "got {TAX}");
        assert_eq!(settings.tax.collector_notification, "bank {TAX}");
    }
}
