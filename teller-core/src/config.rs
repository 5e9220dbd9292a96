//! Configuration management
//!
//! Settings live in `settings.json` inside the teller directory:
//! ```json
//! {
//!   "demoMode": false,
//!   "currency": "INR",
//!   "minorUnits": 2,
//!   "credentialScheme": "argon2id",
//!   "legacyShiftOffset": 3,
//!   "accountPolicy": { "accountIdLength": 11, "passwordLength": 8, "numericAccountId": false }
//! }
//! ```
//! Account data itself is never written anywhere.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::credential::DEFAULT_SHIFT_OFFSET;
use crate::domain::money::{self, DEFAULT_MINOR_UNITS};
use crate::domain::CredentialScheme;

/// Raw settings.json structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    demo_mode: bool,
    #[serde(default = "default_currency")]
    currency: String,
    #[serde(default = "default_minor_units")]
    minor_units: u32,
    #[serde(default = "default_scheme_name")]
    credential_scheme: String,
    #[serde(default = "default_shift_offset")]
    legacy_shift_offset: u32,
    #[serde(default)]
    account_policy: AccountPolicy,
    // Fields this version doesn't manage survive a save
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            demo_mode: false,
            currency: default_currency(),
            minor_units: default_minor_units(),
            credential_scheme: default_scheme_name(),
            legacy_shift_offset: default_shift_offset(),
            account_policy: AccountPolicy::default(),
            other: HashMap::new(),
        }
    }
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_minor_units() -> u32 {
    DEFAULT_MINOR_UNITS
}

fn default_scheme_name() -> String {
    "argon2id".to_string()
}

fn default_shift_offset() -> u32 {
    DEFAULT_SHIFT_OFFSET
}

/// Length rules the shell applies before calling `register`
///
/// The ledger treats IDs and passwords as opaque; it never calls these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPolicy {
    #[serde(default = "default_account_id_length")]
    pub account_id_length: usize,
    #[serde(default = "default_password_length")]
    pub password_length: usize,
    /// Additionally require the account ID to be all ASCII digits
    #[serde(default)]
    pub numeric_account_id: bool,
}

fn default_account_id_length() -> usize {
    11
}

fn default_password_length() -> usize {
    8
}

impl Default for AccountPolicy {
    fn default() -> Self {
        Self {
            account_id_length: default_account_id_length(),
            password_length: default_password_length(),
            numeric_account_id: false,
        }
    }
}

impl AccountPolicy {
    /// Validate a proposed account ID
    pub fn check_account_id(&self, account_id: &str) -> std::result::Result<(), String> {
        if account_id.chars().count() != self.account_id_length {
            return Err(format!(
                "Invalid Account Number! It must be {} characters long.",
                self.account_id_length
            ));
        }
        if self.numeric_account_id && !account_id.chars().all(|c| c.is_ascii_digit()) {
            return Err("Invalid Account Number! Use digits only.".to_string());
        }
        Ok(())
    }

    /// Validate a proposed password
    pub fn check_password(&self, password: &str) -> std::result::Result<(), String> {
        if password.chars().count() != self.password_length {
            return Err(format!(
                "Invalid Password! It must be {} characters long.",
                self.password_length
            ));
        }
        Ok(())
    }
}

/// Teller configuration (typed view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub demo_mode: bool,
    pub currency: String,
    pub minor_units: u32,
    pub credential_scheme: CredentialScheme,
    pub account_policy: AccountPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo_mode: false,
            currency: default_currency(),
            minor_units: DEFAULT_MINOR_UNITS,
            credential_scheme: CredentialScheme::default(),
            account_policy: AccountPolicy::default(),
        }
    }
}

/// Parse a scheme name as written in settings or the environment
pub fn parse_scheme(name: &str, shift_offset: u32) -> Result<CredentialScheme> {
    match name.trim().to_lowercase().as_str() {
        "argon2id" | "argon2" => Ok(CredentialScheme::Argon2id),
        "legacy-shift" | "legacy_shift" | "shift" => Ok(CredentialScheme::LegacyShift {
            offset: shift_offset,
        }),
        other => Err(crate::Error::Config(format!("unknown credential scheme '{}'", other)).into()),
    }
}

impl Config {
    fn from_settings(raw: &SettingsFile) -> Result<Self> {
        Ok(Self {
            demo_mode: raw.demo_mode,
            currency: raw.currency.clone(),
            minor_units: money::check_minor_units(raw.minor_units)?,
            credential_scheme: parse_scheme(&raw.credential_scheme, raw.legacy_shift_offset)?,
            account_policy: raw.account_policy.clone(),
        })
    }

    /// Load config from the teller directory
    ///
    /// Environment overrides (for CI/testing):
    /// - `TELLER_DEMO_MODE`
    /// - `TELLER_CREDENTIAL_SCHEME`
    pub fn load(teller_dir: &Path) -> Result<Self> {
        let raw = Self::read_settings(teller_dir)?;
        let mut config = Self::from_settings(&raw)?;

        match std::env::var("TELLER_DEMO_MODE").ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => config.demo_mode = true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => config.demo_mode = false,
            _ => {}
        }

        if let Ok(scheme) = std::env::var("TELLER_CREDENTIAL_SCHEME") {
            config.credential_scheme = parse_scheme(&scheme, raw.legacy_shift_offset)?;
        }

        Ok(config)
    }

    fn read_settings(teller_dir: &Path) -> Result<SettingsFile> {
        let settings_path = teller_dir.join("settings.json");
        if !settings_path.exists() {
            return Ok(SettingsFile::default());
        }
        let content = std::fs::read_to_string(&settings_path)?;
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }

    /// Save config, preserving settings this version doesn't manage
    pub fn save(&self, teller_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(teller_dir)?;
        let mut settings = Self::read_settings(teller_dir)?;

        settings.demo_mode = self.demo_mode;
        settings.currency = self.currency.clone();
        settings.minor_units = self.minor_units;
        settings.credential_scheme = self.credential_scheme.name().to_string();
        if let CredentialScheme::LegacyShift { offset } = self.credential_scheme {
            settings.legacy_shift_offset = offset;
        }
        settings.account_policy = self.account_policy.clone();

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(teller_dir.join("settings.json"), content)?;
        Ok(())
    }

    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.currency, "INR");
        assert_eq!(config.minor_units, 2);
        assert_eq!(config.account_policy.account_id_length, 11);
        assert_eq!(config.account_policy.password_length, 8);
    }

    #[test]
    fn test_reads_legacy_scheme() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"credentialScheme": "legacy-shift", "legacyShiftOffset": 5}"#,
        )
        .unwrap();

        let raw = Config::read_settings(dir.path()).unwrap();
        let config = Config::from_settings(&raw).unwrap();
        assert_eq!(config.credential_scheme, CredentialScheme::LegacyShift { offset: 5 });
    }

    #[test]
    fn test_rejects_unrepresentable_minor_units() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), r#"{"minorUnits": 30}"#).unwrap();

        let err = Config::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("minor units"));

        std::fs::write(dir.path().join("settings.json"), r#"{"minorUnits": 28}"#).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap().minor_units, 28);
    }

    #[test]
    fn test_unknown_scheme_is_an_error() {
        assert!(parse_scheme("rot13", 3).is_err());
    }

    #[test]
    fn test_save_preserves_unknown_fields() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"theme": "dark", "currency": "USD"}"#,
        )
        .unwrap();

        let mut config = Config::from_settings(&Config::read_settings(dir.path()).unwrap()).unwrap();
        assert_eq!(config.currency, "USD");
        config.enable_demo_mode();
        config.save(dir.path()).unwrap();

        let content = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["demoMode"], true);
        assert_eq!(value["currency"], "USD");
    }

    #[test]
    fn test_account_policy() {
        let policy = AccountPolicy::default();
        assert!(policy.check_account_id("11111111111").is_ok());
        assert!(policy.check_account_id("1111").is_err());
        assert!(policy.check_password("pass1234").is_ok());
        assert!(policy.check_password("short").is_err());

        let numeric = AccountPolicy {
            numeric_account_id: true,
            ..AccountPolicy::default()
        };
        assert!(numeric.check_account_id("1111111111a").is_err());
    }
}
