// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Administrative services exposed under the [`DOMAIN`] namespace.
//!
//! | Service     | Parameters                               |
//! |-------------|------------------------------------------|
//! | `pair`      | `channel` (1-7, required), `unit` (1-5)  |
//! | `log_units` | none                                     |
//!
//! Administrative calls go through the same stick as cover commands and are
//! never retried.

use serde_json::Value;

use crate::error::{Error, ValueError};
use crate::protocol::{Stick, Transceiver};
use crate::response::NumberedUnit;
use crate::types::{PairingAddress, PairingChannel, UnitNumber};

/// Service namespace.
pub const DOMAIN: &str = "becker";

/// Service name for pairing.
pub const SERVICE_PAIR: &str = "pair";

/// Service name for logging the unit database.
pub const SERVICE_LOG_UNITS: &str = "log_units";

/// Result of a successful service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceOutcome {
    /// Pairing was sent for this address.
    Paired(PairingAddress),
    /// The unit database, numbered from 1.
    Units(Vec<NumberedUnit>),
}

/// Parses the parameters of the `pair` service.
///
/// Numbers and numeric strings are accepted. `unit` defaults to 1.
///
/// # Errors
///
/// Returns `ValueError::InvalidParameter` for a missing or non-numeric value,
/// or `ValueError::OutOfRange` when a value is outside its range.
///
/// # Examples
///
/// ```
/// use centronic_lib::platform::parse_pair_params;
/// use serde_json::json;
///
/// let address = parse_pair_params(&json!({"channel": 3})).unwrap();
/// assert_eq!(address.to_string(), "1:3");
///
/// let address = parse_pair_params(&json!({"channel": "5", "unit": 2})).unwrap();
/// assert_eq!(address.to_string(), "2:5");
///
/// assert!(parse_pair_params(&json!({"channel": 8})).is_err());
/// ```
pub fn parse_pair_params(params: &Value) -> Result<PairingAddress, ValueError> {
    let channel = integer_param(params, "channel")?.ok_or_else(|| ValueError::InvalidParameter {
        name: "channel".to_string(),
        message: "required".to_string(),
    })?;
    let unit = match integer_param(params, "unit")? {
        Some(unit) => UnitNumber::new(unit)?,
        None => UnitNumber::default(),
    };

    Ok(PairingAddress::new(PairingChannel::new(channel)?, unit))
}

fn integer_param(params: &Value, name: &str) -> Result<Option<i64>, ValueError> {
    let invalid = |message: &str| ValueError::InvalidParameter {
        name: name.to_string(),
        message: message.to_string(),
    };

    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(|| invalid("not an integer")),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid("not an integer")),
        Some(_) => Err(invalid("expected a number")),
    }
}

/// Pairs the receiver currently in pairing mode.
///
/// # Errors
///
/// Returns error for invalid parameters or when the stick rejects the pairing.
pub async fn handle_pair<T: Transceiver>(
    stick: &Stick<T>,
    params: &Value,
) -> Result<PairingAddress, Error> {
    let address = parse_pair_params(params)?;
    tracing::info!(address = %address, "Pairing Becker unit");
    stick.pair(address).await?;
    Ok(address)
}

/// Logs and returns the unit database.
///
/// # Errors
///
/// Returns error if the database cannot be read.
pub async fn handle_log_units<T: Transceiver>(stick: &Stick<T>) -> Result<Vec<NumberedUnit>, Error> {
    stick.log_units().await
}

/// Dispatches a service call by name.
///
/// # Errors
///
/// Returns `Error::UnknownService` for names other than [`SERVICE_PAIR`] and
/// [`SERVICE_LOG_UNITS`], otherwise the service's own error.
pub async fn call_service<T: Transceiver>(
    stick: &Stick<T>,
    service: &str,
    params: &Value,
) -> Result<ServiceOutcome, Error> {
    match service {
        SERVICE_PAIR => handle_pair(stick, params).await.map(ServiceOutcome::Paired),
        SERVICE_LOG_UNITS => handle_log_units(stick).await.map(ServiceOutcome::Units),
        other => Err(Error::UnknownService(format!("{DOMAIN}.{other}"))),
    }
}
