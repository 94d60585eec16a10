// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `centronic_lib` library.
//!
//! This module provides the error hierarchy for value validation, cover
//! configuration, transceiver communication and stick-level failures.
//!
//! Invalid external signal values are not part of this hierarchy: they are
//! recovered locally by the cover (see [`crate::signal::InvalidSignalValue`]).

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A cover definition is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error occurred while talking to the transceiver.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The stick rejected or could not carry out an operation.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// No cover is configured on the requested channel.
    #[error("no cover on channel {0}")]
    CoverNotFound(String),

    /// The requested service does not exist.
    #[error("unknown service: {0}")]
    UnknownService(String),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// A channel identifier was empty.
    #[error("channel must not be empty")]
    EmptyChannel,

    /// A service parameter is missing or has the wrong type.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Description of the problem.
        message: String,
    },
}

/// Errors in a single cover definition.
///
/// The platform logs these and skips the offending cover; the remaining
/// covers are still set up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The required `channel` entry is missing.
    #[error("cover {cover}: must specify channel")]
    MissingChannel {
        /// Configuration key of the cover.
        cover: String,
    },

    /// A tilt position collides with a fixed position or another tilt position.
    #[error("cover {cover}: invalid tilt position {position}: {reason}")]
    InvalidTiltPosition {
        /// Configuration key of the cover.
        cover: String,
        /// The offending value.
        position: u8,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Another cover already uses this channel.
    #[error("cover {cover}: channel {channel} is already used by {existing}")]
    DuplicateChannel {
        /// Configuration key of the cover.
        cover: String,
        /// The contested channel.
        channel: String,
        /// Configuration key of the cover that claimed it first.
        existing: String,
    },

    /// The platform configuration document could not be parsed.
    #[error("invalid platform configuration: {0}")]
    Parse(String),
}

/// Errors related to transceiver communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The transport could not be opened or has gone away.
    #[error("transport unavailable: {0}")]
    TransportUnavailable(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reported by the stick itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The stick rejected a command.
    #[error("command rejected: {0}")]
    CommandRejected(String),

    /// The stick rejected a pairing address.
    #[error("pairing rejected for {address}: {message}")]
    PairingRejected {
        /// The `<unit>:<channel>` address.
        address: String,
        /// Driver message.
        message: String,
    },

    /// The unit database could not be read.
    #[error("unit database unavailable: {0}")]
    DatabaseUnavailable(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 1,
            max: 7,
            actual: 9,
        };
        assert_eq!(err.to_string(), "value 9 is out of range [1, 7]");
    }

    #[test]
    fn error_from_config_error() {
        let err: Error = ConfigError::MissingChannel {
            cover: "kitchen".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Config(ConfigError::MissingChannel { .. })));
        assert_eq!(
            err.to_string(),
            "configuration error: cover kitchen: must specify channel"
        );
    }

    #[test]
    fn device_error_display() {
        let err = DeviceError::PairingRejected {
            address: "1:3".to_string(),
            message: "no answer".to_string(),
        };
        assert_eq!(err.to_string(), "pairing rejected for 1:3: no answer");
    }

    #[test]
    fn protocol_timeout_display() {
        assert_eq!(
            ProtocolError::Timeout(5000).to_string(),
            "request timed out after 5000 ms"
        );
    }
}
