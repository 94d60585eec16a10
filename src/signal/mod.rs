// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deriving a cover position from an external signal.
//!
//! A cover may be bound to an expression evaluated by the host platform (a
//! template reading a sensor, for instance). The host hands back an already
//! evaluated scalar as a [`SignalValue`], and [`derive_position`] maps it to a
//! [`Position`]:
//!
//! | Value | Position |
//! |-------|----------|
//! | `true` / `"true"` / `"open"` | 100 |
//! | `false` / `"false"` / `"closed"` | 0 |
//! | integer in 0..=100 | unchanged |
//! | anything else | invalid |
//!
//! Text is matched case-insensitively.
//!
//! # Examples
//!
//! ```
//! use centronic_lib::signal::{derive_position, SignalValue};
//! use centronic_lib::types::Position;
//!
//! assert_eq!(derive_position(&SignalValue::Boolean(true)), Ok(Position::OPEN));
//! assert_eq!(derive_position(&SignalValue::Text("Closed".into())), Ok(Position::CLOSED));
//! assert_eq!(derive_position(&SignalValue::Integer(73)).unwrap().value(), 73);
//! assert!(derive_position(&SignalValue::Integer(150)).is_err());
//! ```

use std::fmt;

use thiserror::Error;

use crate::types::Position;

/// Text values recognised by [`derive_position`].
pub const VALID_STATES: [&str; 4] = ["open", "closed", "true", "false"];

/// A scalar produced by evaluating an external expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalValue {
    /// A boolean result.
    Boolean(bool),
    /// An integer result.
    Integer(i64),
    /// A textual result.
    Text(String),
    /// Any other result (floats, null, collections), kept in rendered form.
    Unrecognized(String),
}

impl fmt::Display for SignalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Text(s) | Self::Unrecognized(s) => f.write_str(s),
        }
    }
}

impl From<bool> for SignalValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for SignalValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for SignalValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SignalValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<serde_json::Value> for SignalValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Unrecognized(n.to_string()),
            },
            serde_json::Value::String(s) => Self::Text(s),
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

/// The host failed to evaluate the bound expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("template error: {0}")]
pub struct SignalError(pub String);

/// A value outside the recognised vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Received invalid cover is_on state: {received}. Expected: {}", expected())]
pub struct InvalidSignalValue {
    /// The rejected value.
    pub received: SignalValue,
}

/// Describes the accepted inputs for diagnostics.
#[must_use]
pub fn expected() -> String {
    format!("{}, numbers 0 -- 100", VALID_STATES.join(", "))
}

/// Maps an evaluated signal to a position.
///
/// # Errors
///
/// Returns [`InvalidSignalValue`] for out-of-range integers, unknown text and
/// unrecognised types.
pub fn derive_position(value: &SignalValue) -> Result<Position, InvalidSignalValue> {
    let invalid = || InvalidSignalValue {
        received: value.clone(),
    };

    match value {
        SignalValue::Boolean(true) => Ok(Position::OPEN),
        SignalValue::Boolean(false) => Ok(Position::CLOSED),
        SignalValue::Integer(i) => Position::try_from(*i).map_err(|_| invalid()),
        SignalValue::Text(s) => match s.to_lowercase().as_str() {
            "true" | "open" => Ok(Position::OPEN),
            "false" | "closed" => Ok(Position::CLOSED),
            _ => Err(invalid()),
        },
        SignalValue::Unrecognized(_) => Err(invalid()),
    }
}

/// Evaluates a signal and resolves it to a position, or `None` if unknown.
///
/// Evaluation failures and invalid values are logged and yield `None`; they
/// never propagate.
pub fn resolve(evaluated: Result<SignalValue, SignalError>) -> Option<Position> {
    match evaluated {
        Ok(value) => match derive_position(&value) {
            Ok(position) => Some(position),
            Err(err) => {
                tracing::error!(received = %err.received, expected = %expected(), "{err}");
                None
            }
        },
        Err(err) => {
            tracing::error!(error = %err, "Failed to evaluate cover signal");
            None
        }
    }
}

/// Host capability that evaluates the expression bound to a cover.
pub trait SignalSource: Send + Sync {
    /// Evaluates the expression once.
    ///
    /// # Errors
    ///
    /// Returns a [`SignalError`] when the host cannot evaluate it.
    fn evaluate(&self) -> Result<SignalValue, SignalError>;
}

impl<F> SignalSource for F
where
    F: Fn() -> Result<SignalValue, SignalError> + Send + Sync,
{
    fn evaluate(&self) -> Result<SignalValue, SignalError> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans() {
        assert_eq!(derive_position(&true.into()), Ok(Position::OPEN));
        assert_eq!(derive_position(&false.into()), Ok(Position::CLOSED));
    }

    #[test]
    fn integers_in_range_pass_through() {
        assert_eq!(derive_position(&SignalValue::Integer(0)), Ok(Position::CLOSED));
        assert_eq!(derive_position(&SignalValue::Integer(73)).unwrap().value(), 73);
        assert_eq!(derive_position(&SignalValue::Integer(100)), Ok(Position::OPEN));
    }

    #[test]
    fn integers_out_of_range_are_invalid() {
        for v in [-1_i64, 101, 150] {
            let err = derive_position(&SignalValue::Integer(v)).unwrap_err();
            assert_eq!(err.received, SignalValue::Integer(v));
        }
    }

    #[test]
    fn text_is_case_insensitive() {
        assert_eq!(derive_position(&"OPEN".into()), Ok(Position::OPEN));
        assert_eq!(derive_position(&"True".into()), Ok(Position::OPEN));
        assert_eq!(derive_position(&"closed".into()), Ok(Position::CLOSED));
        assert_eq!(derive_position(&"FALSE".into()), Ok(Position::CLOSED));
    }

    #[test]
    fn unknown_text_is_invalid() {
        assert!(derive_position(&"maybe".into()).is_err());
        // Numeric text is not an integer.
        assert!(derive_position(&"50".into()).is_err());
    }

    #[test]
    fn json_conversion() {
        assert_eq!(SignalValue::from(serde_json::json!(true)), SignalValue::Boolean(true));
        assert_eq!(SignalValue::from(serde_json::json!(42)), SignalValue::Integer(42));
        assert_eq!(SignalValue::from(serde_json::json!("open")), SignalValue::Text("open".into()));
        assert_eq!(
            SignalValue::from(serde_json::json!(4.5)),
            SignalValue::Unrecognized("4.5".into())
        );
        assert_eq!(
            SignalValue::from(serde_json::Value::Null),
            SignalValue::Unrecognized("null".into())
        );
    }

    #[test]
    fn unrecognized_is_invalid() {
        assert!(derive_position(&SignalValue::Unrecognized("null".into())).is_err());
    }

    #[test]
    fn invalid_value_message_lists_vocabulary() {
        let err = derive_position(&"maybe".into()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Received invalid cover is_on state: maybe. Expected: open, closed, true, false, numbers 0 -- 100"
        );
    }

    #[test]
    fn resolve_swallows_failures() {
        assert_eq!(resolve(Ok(true.into())), Some(Position::OPEN));
        assert_eq!(resolve(Ok(SignalValue::Integer(150))), None);
        assert_eq!(resolve(Err(SignalError("undefined variable".into()))), None);
    }

    #[test]
    fn closures_are_sources() {
        let source = || -> Result<SignalValue, SignalError> { Ok(SignalValue::Integer(20)) };
        assert_eq!(source.evaluate(), Ok(SignalValue::Integer(20)));
    }
}
