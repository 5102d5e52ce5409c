use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Null markers recognised when no explicit list is given.
pub const DEFAULT_NULL_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Character encoding of a raw delimited payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Encoding {
    #[default]
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    /// ISO-8859-1; every byte maps to one code point.
    #[serde(rename = "latin-1", alias = "latin1", alias = "iso-8859-1")]
    Latin1,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Latin1 => "latin-1",
        }
    }
}

impl std::str::FromStr for Encoding {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Encoding::Latin1),
            other => Err(format!("unsupported encoding: {other}")),
        }
    }
}

/// Decimal separator of numeric cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DecimalSeparator {
    #[default]
    #[serde(rename = ".")]
    Point,
    #[serde(rename = ",")]
    Comma,
}

impl DecimalSeparator {
    pub fn as_char(&self) -> char {
        match self {
            DecimalSeparator::Point => '.',
            DecimalSeparator::Comma => ',',
        }
    }
}

impl std::str::FromStr for DecimalSeparator {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "." => Ok(DecimalSeparator::Point),
            "," => Ok(DecimalSeparator::Comma),
            other => Err(format!("unsupported decimal separator: '{other}'")),
        }
    }
}

/// What to do with a data cell whose bytes do not decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InvalidCellPolicy {
    /// Fail the whole payload as malformed.
    #[default]
    Reject,
    /// Count the cell as missing.
    Missing,
}

/// Caller-supplied hints describing how to read a raw delimited payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FormatHints {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Quote byte.
    pub quote: u8,
    pub encoding: Encoding,
    pub decimal: DecimalSeparator,
    /// Exact cell texts that denote a missing value.
    pub null_markers: Vec<String>,
    pub invalid_cells: InvalidCellPolicy,
}

impl Default for FormatHints {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            encoding: Encoding::Utf8,
            decimal: DecimalSeparator::Point,
            null_markers: DEFAULT_NULL_MARKERS
                .iter()
                .map(|marker| marker.to_string())
                .collect(),
            invalid_cells: InvalidCellPolicy::Reject,
        }
    }
}

impl FormatHints {
    /// Explicit null marker only; empty cells are missing regardless of the list.
    pub fn is_null_marker(&self, value: &str) -> bool {
        self.null_markers.iter().any(|marker| marker == value)
    }

    /// Parse a cell as a finite number under these hints.
    pub fn parse_number(&self, value: &str) -> Option<f64> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        let parsed = match self.decimal {
            DecimalSeparator::Point => trimmed.parse::<f64>().ok()?,
            DecimalSeparator::Comma => {
                if trimmed.contains('.') {
                    return None;
                }
                trimmed.replace(',', ".").parse::<f64>().ok()?
            }
        };
        parsed.is_finite().then_some(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_with_default_separator() {
        let hints = FormatHints::default();
        assert_eq!(hints.parse_number(" 3.5 "), Some(3.5));
        assert_eq!(hints.parse_number("-2"), Some(-2.0));
        assert_eq!(hints.parse_number("1e3"), Some(1000.0));
        assert_eq!(hints.parse_number("abc"), None);
        assert_eq!(hints.parse_number("inf"), None);
    }

    #[test]
    fn parses_numbers_with_comma_separator() {
        let hints = FormatHints {
            decimal: DecimalSeparator::Comma,
            ..FormatHints::default()
        };
        assert_eq!(hints.parse_number("3,25"), Some(3.25));
        assert_eq!(hints.parse_number("3.25"), None);
    }

    #[test]
    fn decimal_separator_is_limited_to_point_and_comma() {
        let hints: FormatHints =
            serde_json::from_str(r#"{"decimal": ","}"#).expect("comma separator");
        assert_eq!(hints.decimal, DecimalSeparator::Comma);
        assert_eq!(hints.decimal.as_char(), ',');

        let err = serde_json::from_str::<FormatHints>(r#"{"decimal": "1"}"#);
        assert!(err.is_err());
        assert!("1".parse::<DecimalSeparator>().is_err());
        assert_eq!(".".parse::<DecimalSeparator>(), Ok(DecimalSeparator::Point));
    }

    #[test]
    fn encoding_accepts_common_spellings() {
        let value: Encoding = serde_json::from_str("\"latin1\"").expect("parse encoding");
        assert_eq!(value, Encoding::Latin1);
        let value: Encoding = serde_json::from_str("\"utf-8\"").expect("parse encoding");
        assert_eq!(value, Encoding::Utf8);
    }

    #[test]
    fn default_markers_include_empty_string() {
        let hints = FormatHints::default();
        assert!(hints.is_null_marker(""));
        assert!(hints.is_null_marker("NA"));
        assert!(!hints.is_null_marker("0"));
    }
}
