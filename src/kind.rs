use crate::error::{InvalidValue, UnknownKind};
use std::{fmt, str::FromStr, time::Duration};

/// Semantic type of a declared environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Kind {
    String,
    Integer,
    Float,
    Boolean,
    Duration,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Duration => "duration",
        }
    }
}

impl FromStr for Kind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "integer" | "int" => Ok(Self::Integer),
            "float" => Ok(Self::Float),
            "boolean" | "bool" => Ok(Self::Boolean),
            "duration" => Ok(Self::Duration),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for String {}
    impl Sealed for i64 {}
    impl Sealed for f64 {}
    impl Sealed for bool {}
    impl Sealed for std::time::Duration {}
}

/// A Rust type that can be the destination of a declared variable
///
/// Implemented for exactly one type per [`Kind`]: `String`, `i64`, `f64`,
/// `bool` and `std::time::Duration`.
pub trait EnvValue: sealed::Sealed + Clone + fmt::Debug + 'static {
    /// The semantic kind reported in errors and help output
    const KIND: Kind;

    /// Convert raw environment text into a value
    fn convert(raw: &str) -> Result<Self, InvalidValue>;

    /// Whether this is the type's empty/zero value
    fn is_zero(&self) -> bool;

    /// Textual form used when rendering defaults
    fn render(&self) -> String;
}

impl EnvValue for String {
    const KIND: Kind = Kind::String;

    fn convert(raw: &str) -> Result<Self, InvalidValue> {
        Ok(raw.to_string())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn render(&self) -> String {
        self.clone()
    }
}

impl EnvValue for i64 {
    const KIND: Kind = Kind::Integer;

    fn convert(raw: &str) -> Result<Self, InvalidValue> {
        parse_int(raw)
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl EnvValue for f64 {
    const KIND: Kind = Kind::Float;

    fn convert(raw: &str) -> Result<Self, InvalidValue> {
        raw.parse()
            .map_err(|e: std::num::ParseFloatError| InvalidValue::new(Kind::Float, e.to_string()))
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl EnvValue for bool {
    const KIND: Kind = Kind::Boolean;

    fn convert(raw: &str) -> Result<Self, InvalidValue> {
        match raw.to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Ok(true),
            "false" | "f" | "0" => Ok(false),
            _ => Err(InvalidValue::new(
                Kind::Boolean,
                "expected one of true, false, t, f, 1, 0",
            )),
        }
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl EnvValue for Duration {
    const KIND: Kind = Kind::Duration;

    fn convert(raw: &str) -> Result<Self, InvalidValue> {
        humantime::parse_duration(raw).map_err(|e| InvalidValue::new(Kind::Duration, e.to_string()))
    }

    fn is_zero(&self) -> bool {
        Duration::is_zero(self)
    }

    fn render(&self) -> String {
        humantime::format_duration(*self).to_string()
    }
}

/// Parses a signed integer literal, honouring `0x`, `0o`, `0b` and bare
/// leading-zero octal prefixes
fn parse_int(raw: &str) -> Result<i64, InvalidValue> {
    let invalid = |reason: &str| InvalidValue::new(Kind::Integer, reason);

    let (negative, body) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let (radix, digits) = if let Some(rest) = strip_radix_prefix(body, 'x') {
        (16, rest)
    } else if let Some(rest) = strip_radix_prefix(body, 'o') {
        (8, rest)
    } else if let Some(rest) = strip_radix_prefix(body, 'b') {
        (2, rest)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };

    // A single separator may follow a base prefix, as in `0x_1f`
    let digits = match radix {
        10 => digits,
        _ => digits.strip_prefix('_').unwrap_or(digits),
    };

    if digits.is_empty() {
        return Err(invalid("missing digits"));
    }
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return Err(invalid("misplaced digit separator"));
    }

    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if !cleaned.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid("invalid digit for radix"));
    }

    let magnitude = u64::from_str_radix(&cleaned, radix).map_err(|_| invalid("out of range"))?;
    let value = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };

    i64::try_from(value).map_err(|_| invalid("out of range"))
}

fn strip_radix_prefix(body: &str, marker: char) -> Option<&str> {
    let mut chars = body.chars();
    match (chars.next(), chars.next()) {
        (Some('0'), Some(c)) if c.to_ascii_lowercase() == marker => Some(&body[2..]),
        _ => None,
    }
}
