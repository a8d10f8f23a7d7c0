//! Amount type for monetary values that may be written with a currency symbol.
//!
//! Ledger files are often edited by hand or exported from spreadsheets, so an amount may show up
//! as `1200`, `1,200.00`, `$1,200.00` or `-€45.10`. `Amount` wraps a `Decimal` and remembers how
//! it was written so that a rewritten ledger file keeps the user's formatting.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Currency symbols that are recognized (and stripped) when parsing.
const SYMBOLS: &[char] = &['$', '€', '£', '¥', '₹'];

/// Represents how an amount was (or should be) written.
///
/// # Examples
///  - `AmountFormat{ symbol: Some('$'), commas: true }` -> `-$60,000.00`
///  - `AmountFormat{ symbol: None, commas: true }` -> `-60,000.00`
///  - `AmountFormat{ symbol: None, commas: false }` -> `-60000.00`
///  - `AmountFormat{ symbol: Some('€'), commas: false }` -> `-€60000.00`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AmountFormat {
    /// The currency symbol that precedes the number, if any.
    symbol: Option<char>,
    /// Whether commas are present as thousands separators.
    commas: bool,
}

impl AmountFormat {
    /// A format with no symbol and no separators, e.g. `1200.50`.
    pub const PLAIN: AmountFormat = AmountFormat {
        symbol: None,
        commas: false,
    };

    pub const fn new(symbol: Option<char>, commas: bool) -> Self {
        Self { symbol, commas }
    }

    pub fn symbol(&self) -> Option<char> {
        self.symbol
    }
}

/// Represents a monetary amount.
///
/// Formatting is significant for equality, so compare `value()` for numeric comparisons.
///
/// ```
/// # use finsight::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("1200").unwrap();
/// let b = Amount::from_str("$1,200.00").unwrap();
/// assert_ne!(a, b);
/// assert_eq!(a.value(), b.value());
/// assert_eq!(b.to_string(), "$1,200.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
    format: AmountFormat,
}

impl Amount {
    /// Creates an amount that is written without a symbol or separators.
    pub const fn new(value: Decimal) -> Self {
        Self {
            value,
            format: AmountFormat::PLAIN,
        }
    }

    pub const fn new_with_format(value: Decimal, format: AmountFormat) -> Self {
        Self { value, format }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn format(&self) -> AmountFormat {
        self.format
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Returns true if the amount is strictly negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.value.is_sign_negative()
    }
}

/// An error that can occur when parsing a string into an `Amount`.
pub struct AmountError {
    input: String,
    source: rust_decimal::Error,
}

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "AmountError({:?}, {:?})", self.input, self.source)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid amount '{}': {}", self.input, self.source)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };

        let (symbol, number) = match unsigned.chars().next() {
            Some(c) if SYMBOLS.contains(&c) => (Some(c), unsigned[c.len_utf8()..].trim_start()),
            _ => (None, unsigned),
        };
        if negative && number.starts_with(&['-', '+'][..]) {
            return Err(AmountError {
                input: s.to_string(),
                source: rust_decimal::Error::ErrorString("more than one sign".to_string()),
            });
        }

        let without_commas = number.replace(',', "");
        let commas = without_commas.len() < number.len();

        let parsed = Decimal::from_str(&without_commas).map_err(|source| AmountError {
            input: s.to_string(),
            source,
        })?;
        let value = if negative { -parsed } else { parsed };

        Ok(Amount {
            value,
            format: AmountFormat { symbol, commas },
        })
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let num = self.value.abs();
        let symbol = self.format.symbol.map(String::from).unwrap_or_default();

        if self.format.commas {
            write!(f, "{sign}{symbol}{}", group_thousands(&num.to_string()))
        } else {
            write!(f, "{sign}{symbol}{num}")
        }
    }
}

/// Puts a comma between each group of three integer digits and leaves the fraction alone, so the
/// scale of the value is kept: `1234567.125` -> `1,234,567.125`.
fn group_thousands(digits: &str) -> String {
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let mut out = String::with_capacity(digits.len() + int.len() / 3);
    for (ix, c) in int.chars().enumerate() {
        if ix > 0 && (int.len() - ix) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("1200").unwrap();
        assert_eq!(amount.value(), dec("1200"));
        assert_eq!(amount.format(), AmountFormat::PLAIN);
        assert_eq!(amount.to_string(), "1200");
    }

    #[test]
    fn test_parse_dollar_and_commas() {
        let amount = Amount::from_str("$1,234,567.89").unwrap();
        assert_eq!(amount.value(), dec("1234567.89"));
        assert_eq!(amount.format(), AmountFormat::new(Some('$'), true));
    }

    #[test]
    fn test_parse_negative_euro() {
        let amount = Amount::from_str("-€45.10").unwrap();
        assert_eq!(amount.value(), dec("-45.10"));
        assert_eq!(amount.format().symbol(), Some('€'));
        assert!(amount.is_negative());
    }

    #[test]
    fn test_parse_empty_is_zero() {
        let amount = Amount::from_str("   ").unwrap();
        assert!(amount.is_zero());
        assert!(!amount.is_negative());
    }

    #[test]
    fn test_parse_garbage() {
        let err = Amount::from_str("twelve").unwrap_err();
        assert!(err.to_string().contains("twelve"));
    }

    #[test]
    fn test_parse_rejects_second_sign() {
        assert!(Amount::from_str("--5").is_err());
        assert!(Amount::from_str("-$-5").is_err());
        assert!(Amount::from_str("-+5").is_err());
        assert_eq!(Amount::from_str("-5").unwrap().value(), dec("-5"));
    }

    #[test]
    fn test_commas_keep_scale_and_precision() {
        let amount = Amount::from_str("1,000.125").unwrap();
        assert_eq!(amount.to_string(), "1,000.125");

        let big = Amount::from_str("12,345,678,901,234,567.89").unwrap();
        assert_eq!(big.value(), dec("12345678901234567.89"));
        assert_eq!(big.to_string(), "12,345,678,901,234,567.89");

        assert_eq!(Amount::from_str("$1,000").unwrap().to_string(), "$1,000");
        assert_eq!(Amount::from_str("-€999.5").unwrap().to_string(), "-€999.5");
    }

    #[test]
    fn test_formatting_is_retained() {
        for s in ["-$60,000.00", "1,000,000.00", "£99.95", "-5000.5", "100,000", "1,234.0001"] {
            assert_eq!(Amount::from_str(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_serde_json() {
        let amount: Amount = serde_json::from_str("\"$50.00\"").unwrap();
        assert_eq!(amount.value(), dec("50"));
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"$50.00\"");
    }
}
