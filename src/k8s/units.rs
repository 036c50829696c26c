//! Kubernetes quantity parsing and conversion into report units.

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

use crate::error::{ReportError, Result};

pub const MEBIBYTE: i64 = 1024 * 1024;

/// Whole mebibytes in `bytes`, truncating: 1 byte reports as 0.
pub fn to_mebibytes(bytes: i64) -> i64 {
    bytes / MEBIBYTE
}

/// A quantity as `mantissa * 2^exp2 * 10^exp10`, kept exact until it is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedQuantity {
    mantissa: i128,
    exp10: i32,
    exp2: u32,
}

impl ParsedQuantity {
    /// Integer value in base units, rounded up.
    pub fn value(self) -> i64 {
        self.scaled(0)
    }

    /// Value in thousandths of a base unit, rounded up.
    pub fn milli_value(self) -> i64 {
        self.scaled(3)
    }

    fn scaled(self, scale: i32) -> i64 {
        let Some(base) = self.mantissa.checked_mul(1i128 << self.exp2) else {
            return saturate(self.mantissa);
        };
        let exp = self.exp10 + scale;
        let value = if exp >= 0 {
            10i128
                .checked_pow(exp.unsigned_abs())
                .and_then(|p| base.checked_mul(p))
        } else {
            Some(match 10i128.checked_pow(exp.unsigned_abs()) {
                Some(p) => div_ceil(base, p),
                // smaller than any representable unit
                None => i128::from(base > 0),
            })
        };
        match value {
            Some(v) => i64::try_from(v).unwrap_or_else(|_| saturate(v)),
            None => saturate(base),
        }
    }
}

fn saturate(v: i128) -> i64 {
    if v >= 0 {
        i64::MAX
    } else {
        i64::MIN
    }
}

fn div_ceil(a: i128, b: i128) -> i128 {
    let q = a / b;
    if a % b != 0 && a > 0 {
        q + 1
    } else {
        q
    }
}

/// Parse the Kubernetes quantity grammar: `<sign><number><suffix>` where the
/// suffix is binary (`Ki`..`Ei`), decimal (`n`, `u`, `m`, `k`, `M`..`E`) or an
/// exponent (`e3`, `E-2`).
pub fn parse_quantity(raw: &str) -> Result<ParsedQuantity> {
    let s = raw.trim();
    let invalid = || ReportError::Quantity(raw.to_string());

    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let number_end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());
    let (number, suffix) = rest.split_at(number_end);

    let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
    if frac_part.contains('.') || (int_part.is_empty() && frac_part.is_empty()) {
        return Err(invalid());
    }
    let mut mantissa: i128 = format!("{int_part}{frac_part}")
        .parse()
        .map_err(|_| invalid())?;
    if negative {
        mantissa = -mantissa;
    }
    let mut exp10 = -i32::try_from(frac_part.len()).map_err(|_| invalid())?;

    let exp2 = match suffix {
        "" => 0,
        "Ki" => 10,
        "Mi" => 20,
        "Gi" => 30,
        "Ti" => 40,
        "Pi" => 50,
        "Ei" => 60,
        "n" | "u" | "m" | "k" | "M" | "G" | "T" | "P" | "E" => {
            exp10 += match suffix {
                "n" => -9,
                "u" => -6,
                "m" => -3,
                "k" => 3,
                "M" => 6,
                "G" => 9,
                "T" => 12,
                "P" => 15,
                _ => 18,
            };
            0
        }
        s if s.starts_with(['e', 'E']) => {
            let exponent: i32 = s[1..].parse().map_err(|_| invalid())?;
            exp10 = exp10.checked_add(exponent).ok_or_else(invalid)?;
            0
        }
        _ => return Err(invalid()),
    };

    Ok(ParsedQuantity {
        mantissa,
        exp10,
        exp2,
    })
}

fn parse_or_zero(quantity: Option<&Quantity>) -> Option<ParsedQuantity> {
    let q = quantity?;
    match parse_quantity(&q.0) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("{e}, counting it as zero");
            None
        }
    }
}

/// CPU quantity in millicores. Absent or unparseable quantities count as 0.
pub fn millicores(quantity: Option<&Quantity>) -> i64 {
    parse_or_zero(quantity).map_or(0, ParsedQuantity::milli_value)
}

/// Byte quantity as an integer. Absent or unparseable quantities count as 0.
pub fn bytes(quantity: Option<&Quantity>) -> i64 {
    parse_or_zero(quantity).map_or(0, ParsedQuantity::value)
}

/// Byte quantity in whole MiB.
pub fn mebibytes(quantity: Option<&Quantity>) -> i64 {
    to_mebibytes(bytes(quantity))
}
