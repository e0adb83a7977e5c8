//! Parsers for command-line filter values.

use std::time::Duration;

use crate::error::SearchError;

/// Parse a duration such as `90s`, `1h30m`, `250ms` or `2d`.
///
/// Units: `ns`, `us`/`µs`, `ms`, `s`, `m`, `h`, `d`, `w`. Components may be
/// chained and may carry fractions (`1.5h`). A bare number is seconds.
pub fn parse_duration(input: &str) -> Result<Duration, SearchError> {
    let invalid = |message: &str| SearchError::InvalidDuration {
        input: input.to_string(),
        message: message.to_string(),
    };

    let s = input.trim();
    if s.is_empty() {
        return Err(invalid("empty duration"));
    }
    if let Ok(secs) = s.parse::<f64>() {
        return checked_secs(secs).ok_or_else(|| invalid("out of range"));
    }

    let mut total_nanos = 0.0_f64;
    let mut rest = s;
    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        if num_end == 0 {
            return Err(invalid("expected a number"));
        }
        let value: f64 = rest[..num_end]
            .parse()
            .map_err(|_| invalid("malformed number"))?;
        rest = &rest[num_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let multiplier = match &rest[..unit_end] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => SECOND,
            "m" => 60.0 * SECOND,
            "h" => 60.0 * 60.0 * SECOND,
            "d" => 24.0 * 60.0 * 60.0 * SECOND,
            "w" => 7.0 * 24.0 * 60.0 * 60.0 * SECOND,
            "" => return Err(invalid("missing unit")),
            _ => return Err(invalid("unknown unit")),
        };
        rest = &rest[unit_end..];
        total_nanos += value * multiplier;
    }

    if total_nanos > u64::MAX as f64 {
        return Err(invalid("out of range"));
    }
    Ok(Duration::from_nanos(total_nanos.round() as u64))
}

const SECOND: f64 = 1e9;

fn checked_secs(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs).ok()
}

/// Parse a permission mask: `0o755`, `0x1ed`, `0755` (octal) or `493`.
pub fn parse_permission(input: &str) -> Result<u32, SearchError> {
    let s = input.trim();
    let parsed = if let Some(oct) = s.strip_prefix("0o").or_else(|| s.strip_prefix("0O")) {
        u32::from_str_radix(oct, 8)
    } else if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        u32::from_str_radix(&s[1..], 8)
    } else {
        s.parse()
    };

    parsed.map_err(|_| SearchError::InvalidPermission {
        input: input.to_string(),
    })
}
