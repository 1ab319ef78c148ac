//! Canonical text form of a quaternion and the parsers that read it back.
//!
//! `Display` writes `"<r><±i>i<±j>j<±k>k"` with two decimals per component,
//! e.g. `1.00+2.00i-3.00j+4.00k`. Imaginary parts always carry their sign so
//! that adjacent numbers stay separable for the token scanner.
//!
//! Two parsers share one token scan:
//! - [`Quaternion::value_of`] is total. Unrecognized characters are skipped,
//!   missing components are `0.0`, and input with no token is the zero
//!   quaternion.
//! - `FromStr` is strict. It rejects input with no token or with anything
//!   other than `+` and whitespace between tokens.
//!
//! Both let the last occurrence of a component win (`"1i2i"` has `i = 2`).

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::DISPLAY_PRECISION;
use crate::error::QuatError;
use crate::quaternion::Quaternion;

// ASCII digits only; `\d` would also match non-ASCII digits f64 cannot parse.
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(-?[0-9]+(?:\.[0-9]+)?)([ijk])?").unwrap());

struct Scan {
    value: Quaternion,
    tokens: usize,
    /// First character outside a token that is neither `+` nor whitespace.
    stray: Option<char>,
}

fn is_separator(c: char) -> bool {
    c == '+' || c.is_whitespace()
}

fn scan(s: &str) -> Scan {
    let [mut r, mut i, mut j, mut k] = [0.0_f64; 4];
    let mut tokens = 0;
    let mut stray = None;
    let mut last = 0;

    for caps in TOKEN.captures_iter(s) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if stray.is_none() {
            stray = s[last..whole.start()].chars().find(|&c| !is_separator(c));
        }
        last = whole.end();

        let Ok(value) = caps[1].parse::<f64>() else {
            continue;
        };
        match caps.get(2).map(|m| m.as_str()) {
            None => r = value,
            Some("i") => i = value,
            Some("j") => j = value,
            Some(_) => k = value,
        }
        tokens += 1;
    }

    if stray.is_none() {
        stray = s[last..].chars().find(|&c| !is_separator(c));
    }

    Scan {
        value: Quaternion::new(r, i, j, k),
        tokens,
        stray,
    }
}

impl Quaternion {
    /// Lenient parse, the inverse of `Display`. Never fails.
    pub fn value_of(s: &str) -> Self {
        scan(s).value
    }
}

impl FromStr for Quaternion {
    type Err = QuatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let scanned = scan(s);
        if scanned.tokens == 0 || scanned.stray.is_some() {
            return Err(QuatError::InvalidFormat(s.to_string()));
        }
        Ok(scanned.value)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = DISPLAY_PRECISION;
        write!(
            f,
            "{:.*}{:+.*}i{:+.*}j{:+.*}k",
            p,
            self.real(),
            p,
            self.i(),
            p,
            self.j(),
            p,
            self.k()
        )
    }
}

/// Serialized as the canonical text form.
impl Serialize for Quaternion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Deserialized through the strict parser.
impl<'de> Deserialize<'de> for Quaternion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.to_string(), "1.00+2.00i+3.00j+4.00k");

        let q = Quaternion::new(-1.5, -2.0, 0.0, -0.25);
        assert_eq!(q.to_string(), "-1.50-2.00i+0.00j-0.25k");
    }

    #[test]
    fn test_display_rounds_to_two_decimals() {
        let q = Quaternion::new(1.006, 2.004, 0.5, 10.0);
        assert_eq!(q.to_string(), "1.01+2.00i+0.50j+10.00k");
    }

    #[test]
    fn test_value_of_canonical() {
        let q = Quaternion::value_of("1.00+2.00i-3.00j+4.00k");
        assert_eq!(q.to_array(), [1.0, 2.0, -3.0, 4.0]);
    }

    #[test]
    fn test_value_of_missing_components_default_to_zero() {
        let q = Quaternion::value_of("2.5j");
        assert_eq!(q.to_array(), [0.0, 0.0, 2.5, 0.0]);
        let q = Quaternion::value_of("-7");
        assert_eq!(q.to_array(), [-7.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_value_of_order_independent() {
        let q = Quaternion::value_of("4k+3j+2i+1");
        assert_eq!(q.to_array(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_value_of_last_wins() {
        let q = Quaternion::value_of("1i+2i+5+6");
        assert_eq!(q.to_array(), [6.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_value_of_skips_garbage() {
        let q = Quaternion::value_of("(1, 2i) & 3k!");
        assert_eq!(q.to_array(), [1.0, 2.0, 0.0, 3.0]);
        assert_eq!(Quaternion::value_of("hello").to_array(), [0.0; 4]);
        assert_eq!(Quaternion::value_of("").to_array(), [0.0; 4]);
    }

    #[test]
    fn test_value_of_display_roundtrip() {
        let q = Quaternion::new(-0.5, 12.25, -3.0, 0.75);
        let back = Quaternion::value_of(&q.to_string());
        assert_eq!(back.to_array(), q.to_array());
    }

    #[test]
    fn test_strict_accepts_canonical_and_spaced() {
        let q: Quaternion = "1.00+2.00i-3.00j+4.00k".parse().unwrap();
        assert_eq!(q.to_array(), [1.0, 2.0, -3.0, 4.0]);
        let q: Quaternion = " 1 + 2i + 3j ".parse().unwrap();
        assert_eq!(q.to_array(), [1.0, 2.0, 3.0, 0.0]);
        let q: Quaternion = "1i+2i".parse().unwrap();
        assert_eq!(q.i(), 2.0);
    }

    #[test]
    fn test_strict_rejects_empty_and_garbage() {
        assert_eq!(
            "".parse::<Quaternion>(),
            Err(QuatError::InvalidFormat(String::new()))
        );
        assert!("hello".parse::<Quaternion>().is_err());
        assert!("1+2x".parse::<Quaternion>().is_err());
        assert!("(1+2i)".parse::<Quaternion>().is_err());
        assert!("1+2i;".parse::<Quaternion>().is_err());
    }

    #[test]
    fn test_ascii_digits_only() {
        // Arabic-Indic digits are not tokens
        assert!("١٢".parse::<Quaternion>().is_err());
        assert_eq!(Quaternion::value_of("١٢").to_array(), [0.0; 4]);
    }

    #[test]
    fn test_serde_uses_text_form() {
        let q = Quaternion::new(1.0, -2.0, 0.5, 0.0);
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(json, "\"1.00-2.00i+0.50j+0.00k\"");

        let back: Quaternion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);

        assert!(serde_json::from_str::<Quaternion>("\"nope\"").is_err());
        assert!(serde_json::from_str::<Quaternion>("[1, 2, 3, 4]").is_err());
    }
}
