//! Security identifiers.
//!
//! Provides validated ISIN and CUSIP identifiers. ESG score tables are keyed by
//! one or the other, so holdings carry a raw identifier string and resolution
//! classifies it with [`SecurityId::parse`].

use serde::{Deserialize, Serialize};

use crate::error::IdentifierError;

/// Maps an identifier character to its numeric value (0-9, A=10 .. Z=35).
fn char_value(c: char) -> Option<u32> {
    if c.is_ascii_digit() {
        c.to_digit(10)
    } else if c.is_ascii_uppercase() {
        Some((c as u32) - ('A' as u32) + 10)
    } else {
        None
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

// =============================================================================
// CUSIP (Committee on Uniform Securities Identification Procedures)
// =============================================================================

/// CUSIP identifier with validation.
///
/// A CUSIP is a 9-character alphanumeric code that identifies a North American
/// security. The first 6 characters identify the issuer, the next 2 the issue,
/// and the last is a check digit.
///
/// # Example
///
/// ```
/// use aurum_core::Cusip;
///
/// let cusip = Cusip::new("037833100").unwrap();
/// assert_eq!(cusip.issuer(), "037833");
/// assert_eq!(cusip.check_digit(), '0');
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cusip(String);

impl Cusip {
    /// Creates a new validated CUSIP (case-insensitive, surrounding whitespace ignored).
    pub fn new(value: &str) -> Result<Self, IdentifierError> {
        let value = normalize(value);
        Self::validate(&value)?;
        Ok(Self(value))
    }

    /// Validates an upper-case CUSIP string.
    pub fn validate(value: &str) -> Result<(), IdentifierError> {
        if value.len() != 9 {
            return Err(IdentifierError::InvalidLength {
                id_type: "CUSIP",
                expected: 9,
                actual: value.len(),
            });
        }

        for (i, c) in value.chars().enumerate() {
            if !c.is_ascii_alphanumeric() {
                return Err(IdentifierError::InvalidCharacter {
                    id_type: "CUSIP",
                    ch: c,
                    position: i,
                });
            }
        }

        let expected = Self::calculate_check_digit(&value[..8]);
        if expected != value.chars().nth(8) {
            return Err(IdentifierError::InvalidCheckDigit {
                id_type: "CUSIP",
                value: value.to_string(),
            });
        }

        Ok(())
    }

    /// Calculates the check digit for the first 8 characters.
    ///
    /// Doubles every second value (positions 1, 3, 5, 7) and sums the digits.
    #[must_use]
    pub fn calculate_check_digit(first_eight: &str) -> Option<char> {
        if first_eight.len() != 8 {
            return None;
        }

        let mut sum = 0;
        for (i, c) in first_eight.to_uppercase().chars().enumerate() {
            let mut v = char_value(c)?;
            if i % 2 == 1 {
                v *= 2;
            }
            sum += v / 10 + v % 10;
        }

        char::from_digit((10 - (sum % 10)) % 10, 10)
    }

    /// Returns the issuer code (first 6 characters).
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.0[0..6]
    }

    /// Returns the issue code (characters 7-8).
    #[must_use]
    pub fn issue(&self) -> &str {
        &self.0[6..8]
    }

    /// Returns the check digit (last character).
    #[must_use]
    pub fn check_digit(&self) -> char {
        self.0.chars().last().unwrap_or('0')
    }

    /// Returns the full CUSIP string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cusip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Cusip {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Cusip> for String {
    fn from(value: Cusip) -> Self {
        value.0
    }
}

// =============================================================================
// ISIN (International Securities Identification Number)
// =============================================================================

/// ISIN identifier with validation (ISO 6166).
///
/// A 12-character code: 2-letter country code, 9-character national
/// identifier (NSIN), and a Luhn check digit.
///
/// # Example
///
/// ```
/// use aurum_core::Isin;
///
/// let isin = Isin::new("US0378331005").unwrap();
/// assert_eq!(isin.country_code(), "US");
/// assert_eq!(isin.nsin(), "037833100");
/// assert_eq!(isin.embedded_cusip().unwrap().as_str(), "037833100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isin(String);

impl Isin {
    /// Creates a new validated ISIN (case-insensitive, surrounding whitespace ignored).
    pub fn new(value: &str) -> Result<Self, IdentifierError> {
        let value = normalize(value);
        Self::validate(&value)?;
        Ok(Self(value))
    }

    /// Validates an upper-case ISIN string.
    pub fn validate(value: &str) -> Result<(), IdentifierError> {
        if value.len() != 12 {
            return Err(IdentifierError::InvalidLength {
                id_type: "ISIN",
                expected: 12,
                actual: value.len(),
            });
        }

        let chars: Vec<char> = value.chars().collect();

        if !chars[0].is_ascii_uppercase() || !chars[1].is_ascii_uppercase() {
            return Err(IdentifierError::InvalidFormat {
                id_type: "ISIN",
                reason: "Country code must be two letters".to_string(),
            });
        }

        for (i, &c) in chars[2..].iter().enumerate() {
            if !c.is_ascii_alphanumeric() {
                return Err(IdentifierError::InvalidCharacter {
                    id_type: "ISIN",
                    ch: c,
                    position: i + 2,
                });
            }
        }

        if !Self::verify_check_digit(value) {
            return Err(IdentifierError::InvalidCheckDigit {
                id_type: "ISIN",
                value: value.to_string(),
            });
        }

        Ok(())
    }

    /// Verifies the check digit using the Luhn algorithm on the expanded digits.
    fn verify_check_digit(isin: &str) -> bool {
        let mut digits = Vec::with_capacity(24);
        for c in isin.chars() {
            match char_value(c) {
                Some(v) if v < 10 => digits.push(v),
                Some(v) => {
                    digits.push(v / 10);
                    digits.push(v % 10);
                }
                None => return false,
            }
        }

        // Double every second digit counting from the right, check digit excluded
        let len = digits.len();
        let sum: u32 = digits
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                if (len - 1 - i) % 2 == 1 {
                    let doubled = d * 2;
                    doubled / 10 + doubled % 10
                } else {
                    d
                }
            })
            .sum();

        sum % 10 == 0
    }

    /// Returns the country code (first 2 characters).
    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.0[0..2]
    }

    /// Returns the NSIN (national identifier, characters 3-11).
    #[must_use]
    pub fn nsin(&self) -> &str {
        &self.0[2..11]
    }

    /// Returns the check digit (last character).
    #[must_use]
    pub fn check_digit(&self) -> char {
        self.0.chars().last().unwrap_or('0')
    }

    /// Returns the CUSIP embedded in a US or Canadian ISIN.
    ///
    /// Returns `None` for other countries or when the NSIN is not a valid CUSIP.
    #[must_use]
    pub fn embedded_cusip(&self) -> Option<Cusip> {
        match self.country_code() {
            "US" | "CA" => Cusip::new(self.nsin()).ok(),
            _ => None,
        }
    }

    /// Returns the full ISIN string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Isin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Isin {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Isin> for String {
    fn from(value: Isin) -> Self {
        value.0
    }
}

// =============================================================================
// CLASSIFIED IDENTIFIER
// =============================================================================

/// A security identifier classified by standard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityId {
    /// International Securities Identification Number.
    Isin(Isin),
    /// CUSIP.
    Cusip(Cusip),
}

impl SecurityId {
    /// Classifies a raw identifier string.
    ///
    /// Twelve characters are parsed as an ISIN, nine as a CUSIP.
    ///
    /// # Example
    ///
    /// ```
    /// use aurum_core::SecurityId;
    ///
    /// assert!(matches!(SecurityId::parse("us0378331005"), Ok(SecurityId::Isin(_))));
    /// assert!(matches!(SecurityId::parse("037833100"), Ok(SecurityId::Cusip(_))));
    /// assert!(SecurityId::parse("AAPL").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        match value.trim().len() {
            12 => Isin::new(value).map(Self::Isin),
            9 => Cusip::new(value).map(Self::Cusip),
            _ => Err(IdentifierError::Unrecognized(value.to_string())),
        }
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Isin(isin) => isin.as_str(),
            Self::Cusip(cusip) => cusip.as_str(),
        }
    }

    /// Returns the standard name ("ISIN" or "CUSIP").
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Isin(_) => "ISIN",
            Self::Cusip(_) => "CUSIP",
        }
    }
}

impl std::fmt::Display for SecurityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cusip_valid() {
        let cusip = Cusip::new("037833100").unwrap();
        assert_eq!(cusip.issuer(), "037833");
        assert_eq!(cusip.issue(), "10");
        assert_eq!(cusip.check_digit(), '0');

        // Alphanumeric issuer
        assert!(Cusip::new("02079K305").is_ok());
        assert!(Cusip::new("02079k305").is_ok());
    }

    #[test]
    fn test_cusip_check_digit_calculation() {
        assert_eq!(Cusip::calculate_check_digit("03783310"), Some('0'));
        // 1 + 4 + 3 + 8 + 5 + 3 + 7 + 7 = 38 -> (10 - 8) % 10 = 2
        assert_eq!(Cusip::calculate_check_digit("12345678"), Some('2'));
        assert_eq!(Cusip::calculate_check_digit("1234"), None);
    }

    #[test]
    fn test_cusip_invalid() {
        assert!(matches!(
            Cusip::new("09702"),
            Err(IdentifierError::InvalidLength { .. })
        ));
        assert!(matches!(
            Cusip::new("037833101"),
            Err(IdentifierError::InvalidCheckDigit { .. })
        ));
        assert!(matches!(
            Cusip::new("0378-3100"),
            Err(IdentifierError::InvalidCharacter { position: 4, .. })
        ));
    }

    #[test]
    fn test_isin_valid() {
        let isin = Isin::new("US0378331005").unwrap();
        assert_eq!(isin.country_code(), "US");
        assert_eq!(isin.nsin(), "037833100");
        assert_eq!(isin.check_digit(), '5');

        assert!(Isin::new("GB0002634946").is_ok());
        assert!(Isin::new("DE0007164600").is_ok());
        assert!(Isin::new(" us5949181045 ").is_ok());
    }

    #[test]
    fn test_isin_invalid() {
        assert!(matches!(
            Isin::new("US037833100"),
            Err(IdentifierError::InvalidLength { .. })
        ));
        assert!(matches!(
            Isin::new("US0378331006"),
            Err(IdentifierError::InvalidCheckDigit { .. })
        ));
        assert!(matches!(
            Isin::new("120378331005"),
            Err(IdentifierError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_embedded_cusip() {
        let isin = Isin::new("US02079K3059").unwrap();
        assert_eq!(isin.embedded_cusip().unwrap().as_str(), "02079K305");

        let isin = Isin::new("GB0002634946").unwrap();
        assert!(isin.embedded_cusip().is_none());
    }

    #[test]
    fn test_security_id_parse() {
        let id = SecurityId::parse("US88160R1014").unwrap();
        assert_eq!(id.kind(), "ISIN");
        assert_eq!(id.to_string(), "US88160R1014");

        let id = SecurityId::parse("88160R101").unwrap();
        assert_eq!(id.kind(), "CUSIP");

        assert!(matches!(
            SecurityId::parse("TSLA"),
            Err(IdentifierError::Unrecognized(_))
        ));
    }

    #[test]
    fn test_serde_validates() {
        let isin: Isin = serde_json::from_str("\"US0231351067\"").unwrap();
        assert_eq!(isin.as_str(), "US0231351067");
        assert!(serde_json::from_str::<Isin>("\"US0231351068\"").is_err());

        let json = serde_json::to_string(&Cusip::new("023135106").unwrap()).unwrap();
        assert_eq!(json, "\"023135106\"");
    }
}
