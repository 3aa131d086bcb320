//! Lenient numeric parsing for form input and stored documents.
//!
//! Form fields are parsed by prefix: leading whitespace is skipped and the
//! longest numeric prefix wins, so `"2019 model"` reads as 2019. Input with no
//! numeric prefix yields `None`, which is stored as a non-numeric value.

use jiff::Timestamp;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Integer prefix of `input`, or `None` when there are no leading digits.
///
/// Prefixes beyond the `i64` range saturate at `i64::MIN` or `i64::MAX`.
pub(crate) fn parse_int_prefix(input: &str) -> Option<i64> {
    let mut chars = input.trim_start().chars().peekable();
    let mut prefix = String::new();

    if let Some(&sign) = chars.peek()
        && (sign == '+' || sign == '-')
    {
        prefix.push(sign);
        chars.next();
    }

    let digits: String = chars.take_while(char::is_ascii_digit).collect();

    if digits.is_empty() {
        return None;
    }

    prefix.push_str(&digits);

    let saturated = if prefix.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    };

    Some(prefix.parse().unwrap_or(saturated))
}

/// Floating point prefix of `input`; non-finite results read as `None`.
pub(crate) fn parse_float_prefix(input: &str) -> Option<f64> {
    let chars: Vec<char> = input.trim_start().chars().collect();
    let mut prefix = String::new();
    let mut position = 0;

    if let Some(&sign) = chars.first()
        && (sign == '+' || sign == '-')
    {
        prefix.push(sign);
        position += 1;
    }

    let integral = take_digits(&chars, &mut position, &mut prefix);
    let mut fractional = 0;

    if chars.get(position) == Some(&'.') {
        let mut fraction = String::from(".");
        let mut lookahead = position + 1;

        fractional = take_digits(&chars, &mut lookahead, &mut fraction);

        if integral > 0 || fractional > 0 {
            prefix.push_str(&fraction);
            position = lookahead;
        }
    }

    if integral == 0 && fractional == 0 {
        return None;
    }

    if let Some(marker) = chars.get(position).filter(|c| **c == 'e' || **c == 'E') {
        let mut exponent = String::from(*marker);
        let mut lookahead = position + 1;

        if let Some(&sign) = chars.get(lookahead)
            && (sign == '+' || sign == '-')
        {
            exponent.push(sign);
            lookahead += 1;
        }

        if take_digits(&chars, &mut lookahead, &mut exponent) > 0 {
            prefix.push_str(&exponent);
        }
    }

    prefix.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn take_digits(chars: &[char], position: &mut usize, out: &mut String) -> usize {
    let mut taken = 0;

    while let Some(digit) = chars.get(*position).filter(|c| c.is_ascii_digit()) {
        out.push(*digit);
        *position += 1;
        taken += 1;
    }

    taken
}

/// Reads a stored year, tolerating doubles and numeric strings.
pub(crate) fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|value| value.is_finite())
                .map(f64::trunc)
                .and_then(float_to_i64)
        }),
        Value::String(text) => parse_int_prefix(&text),
        _ => None,
    })
}

/// Reads a stored price, tolerating numeric strings.
pub(crate) fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64().filter(|value| value.is_finite()),
        Value::String(text) => parse_float_prefix(&text),
        _ => None,
    })
}

/// Reads an RFC 3339 timestamp, treating anything else as absent.
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text.parse().ok(),
        _ => None,
    })
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "range is checked before the cast"
)]
fn float_to_i64(value: f64) -> Option<i64> {
    const LIMIT: f64 = 9_007_199_254_740_992.0;

    (value.abs() <= LIMIT).then_some(value as i64)
}
