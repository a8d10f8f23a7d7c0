//! User settings: the display name, currency, locale, timezone and theme.
//!
//! Settings are stored in the `settings` object of `config.json`. `AutoSave` lets an interactive
//! caller push every edit and have only the last one written once edits stop arriving.

use crate::debounce::Debouncer;
use crate::{Config, Result};
use anyhow::bail;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error};

/// The currencies amounts can be displayed in.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Inr,
    Cad,
    Aud,
}

serde_plain::derive_display_from_serialize!(Currency);
serde_plain::derive_fromstr_from_deserialize!(Currency);

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
            Currency::Inr => "₹",
            Currency::Cad => "CA$",
            Currency::Aud => "A$",
        }
    }

    /// Renders `value` with this currency's symbol and thousands separators, e.g. `-$1,200.00`.
    /// Yen are shown without minor units.
    pub fn format(&self, value: Decimal) -> String {
        let sign = if value < Decimal::ZERO { "-" } else { "" };
        let num = value.abs().to_f64().unwrap_or_default();
        let digits = match self {
            Currency::Jpy => format_num::format_num!(",.0", num),
            _ => format_num::format_num!(",.2", num),
        };
        format!("{sign}{}{digits}", self.symbol())
    }
}

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

serde_plain::derive_display_from_serialize!(Theme);
serde_plain::derive_fromstr_from_deserialize!(Theme);

/// A BCP 47 style language tag limited to `language` or `language-REGION`, e.g. `en` or `en-US`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Default for Locale {
    fn default() -> Self {
        Locale("en-US".to_string())
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('-');
        let language = parts.next().unwrap_or_default();
        let region = parts.next();
        if parts.next().is_some() {
            bail!("Invalid locale '{s}': expected 'language' or 'language-REGION'");
        }
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_lowercase())
        {
            bail!("Invalid locale '{s}': the language must be 2 or 3 lowercase letters");
        }
        if let Some(region) = region {
            if region.len() != 2 || !region.chars().all(|c| c.is_ascii_uppercase()) {
                bail!("Invalid locale '{s}': the region must be 2 uppercase letters");
            }
        }
        Ok(Locale(s.to_string()))
    }
}

impl TryFrom<String> for Locale {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Locale::from_str(&value)
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.0
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// The user's profile and display preferences.
///
/// ```json
/// {
///   "display_name": "Sam",
///   "currency": "EUR",
///   "locale": "de-DE",
///   "timezone": "Europe/Berlin",
///   "theme": "dark"
/// }
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub display_name: String,
    pub currency: Currency,
    pub locale: Locale,
    /// An IANA timezone name such as `America/New_York`. It is stored as given.
    pub timezone: String,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            currency: Currency::default(),
            locale: Locale::default(),
            timezone: "UTC".to_string(),
            theme: Theme::default(),
        }
    }
}

/// Writes settings to `config.json` after edits have stopped for `delay`.
pub struct AutoSave {
    config: Config,
    debouncer: Debouncer,
}

impl AutoSave {
    pub fn new(config: Config, delay: Duration) -> Self {
        Self {
            config,
            debouncer: Debouncer::new(delay),
        }
    }

    /// Schedules `settings` to be saved, replacing any save that has not happened yet.
    pub fn schedule(&mut self, settings: Settings) {
        let config = self.config.clone();
        debug!("Scheduling a settings save");
        self.debouncer.call(async move {
            if let Err(e) = config.save_settings(settings).await {
                error!("Unable to save settings: {e:#}");
            }
        });
    }

    /// Waits for the pending save, if any, to complete.
    pub async fn flush(&mut self) {
        self.debouncer.flush().await
    }
}
