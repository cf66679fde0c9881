// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lenient deserializers for form-originated payloads.
//!
//! Browser forms submit numbers as strings and empty inputs as `""`.
//! These helpers accept either a JSON number or a numeric string and treat
//! `null` and blank strings as absent. Use them with
//! `#[serde(default, deserialize_with = "...")]`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

fn parse_i64<E: serde::de::Error>(scalar: Scalar) -> Result<Option<i64>, E> {
    match scalar {
        Scalar::Int(value) => Ok(Some(value)),
        Scalar::Float(value) => {
            if value.fract() == 0.0 && value.is_finite() && value.abs() < 9.0e15 {
                #[allow(clippy::cast_possible_truncation)]
                let whole: i64 = value as i64;
                Ok(Some(whole))
            } else {
                Err(E::custom(format!("expected an integer, got {value}")))
            }
        }
        Scalar::Text(text) => {
            let trimmed: &str = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<i64>()
                .map(Some)
                .map_err(|_| E::custom(format!("expected an integer, got '{trimmed}'")))
        }
        Scalar::Bool(value) => Err(E::custom(format!("expected an integer, got {value}"))),
    }
}

fn parse_f64<E: serde::de::Error>(scalar: Scalar) -> Result<Option<f64>, E> {
    match scalar {
        Scalar::Int(value) => {
            #[allow(clippy::cast_precision_loss)]
            let widened: f64 = value as f64;
            Ok(Some(widened))
        }
        Scalar::Float(value) => Ok(Some(value)),
        Scalar::Text(text) => {
            let trimmed: &str = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| E::custom(format!("expected a number, got '{trimmed}'")))
        }
        Scalar::Bool(value) => Err(E::custom(format!("expected a number, got {value}"))),
    }
}

fn parse_bool<E: serde::de::Error>(scalar: Scalar) -> Result<Option<bool>, E> {
    match scalar {
        Scalar::Bool(value) => Ok(Some(value)),
        Scalar::Int(0) => Ok(Some(false)),
        Scalar::Int(1) => Ok(Some(true)),
        Scalar::Text(text) => match text.trim() {
            "" => Ok(None),
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            other => Err(E::custom(format!("expected a boolean, got '{other}'"))),
        },
        Scalar::Int(value) => Err(E::custom(format!("expected a boolean, got {value}"))),
        Scalar::Float(value) => Err(E::custom(format!("expected a boolean, got {value}"))),
    }
}

/// Deserializes an optional integer from a number, numeric string, blank or `null`.
///
/// # Errors
///
/// Returns an error if the value is present but not an integer.
pub fn opt_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    match Option::<Scalar>::deserialize(deserializer)? {
        Some(scalar) => parse_i64(scalar),
        None => Ok(None),
    }
}

/// Deserializes a required id from a number or numeric string.
///
/// Blank and `null` read as `0`, which id validation reports as a missing
/// field rather than a malformed body.
///
/// # Errors
///
/// Returns an error if the value is present but not an integer.
pub fn required_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(opt_i64(deserializer)?.unwrap_or(0))
}

/// Deserializes an optional number from a number, numeric string, blank or `null`.
///
/// # Errors
///
/// Returns an error if the value is present but not numeric.
pub fn opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    match Option::<Scalar>::deserialize(deserializer)? {
        Some(scalar) => parse_f64(scalar),
        None => Ok(None),
    }
}

/// Deserializes a boolean flag; blanks and `null` read as `false`.
///
/// # Errors
///
/// Returns an error if the value is present but not boolean-like.
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Option::<Scalar>::deserialize(deserializer)? {
        Some(scalar) => Ok(parse_bool(scalar)?.unwrap_or(false)),
        None => Ok(false),
    }
}

/// Deserializes optional text, mapping blank strings to `None` and trimming the rest.
///
/// # Errors
///
/// Returns an error if the value is neither a string nor `null`.
pub fn opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value: Option<String> = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|text| {
        let trimmed: &str = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}
