// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::cover::TiltPositions;
use crate::error::ConfigError;
use crate::protocol::{StickConfig, Warmup};
use crate::types::Channel;

/// Configuration of the cover platform.
///
/// # Examples
///
/// ```
/// use centronic_lib::platform::PlatformConfig;
///
/// let config = PlatformConfig::from_json(r#"{
///     "device": "/dev/ttyACM0",
///     "covers": {
///         "kitchen": { "channel": 1 },
///         "bedroom": {
///             "friendly_name": "Bedroom",
///             "channel": "2",
///             "value_template": "{{ states('sensor.bedroom_blind') }}"
///         }
///     }
/// }"#).unwrap();
///
/// assert_eq!(config.covers.len(), 2);
/// assert_eq!(config.stick_config().transport_path(), "/dev/ttyACM0");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformConfig {
    /// Cover definitions keyed by slug.
    #[serde(default)]
    pub covers: BTreeMap<String, CoverConfig>,
    /// Transport path override.
    #[serde(default)]
    pub device: Option<String>,
    /// Warm-up sequence; enabled with defaults when absent.
    #[serde(default)]
    pub warmup: Option<WarmupConfig>,
    /// Bound on a single transport call, in milliseconds.
    #[serde(default)]
    pub command_timeout_ms: Option<u64>,
    /// Retries after a timed-out cover command.
    #[serde(default)]
    pub max_retries: Option<u32>,
    /// Refresh period for externally derived covers, in seconds.
    #[serde(default)]
    pub scan_interval_secs: Option<u64>,
}

impl PlatformConfig {
    /// Default refresh period.
    pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(30);

    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Adds a cover definition.
    #[must_use]
    pub fn with_cover(mut self, key: impl Into<String>, cover: CoverConfig) -> Self {
        self.covers.insert(key.into(), cover);
        self
    }

    /// Overrides the transport path.
    #[must_use]
    pub fn with_device(mut self, path: impl Into<String>) -> Self {
        self.device = Some(path.into());
        self
    }

    /// Sets the warm-up sequence.
    #[must_use]
    pub fn with_warmup(mut self, warmup: WarmupConfig) -> Self {
        self.warmup = Some(warmup);
        self
    }

    /// Builds the stick configuration.
    #[must_use]
    pub fn stick_config(&self) -> StickConfig {
        let mut config = StickConfig::new().with_warmup(
            self.warmup
                .clone()
                .unwrap_or_default()
                .into_warmup(),
        );
        if let Some(device) = &self.device {
            config = config.with_transport_path(device.clone());
        }
        if let Some(ms) = self.command_timeout_ms {
            config = config.with_command_timeout(Duration::from_millis(ms));
        }
        if let Some(retries) = self.max_retries {
            config = config.with_max_retries(retries);
        }
        config
    }

    /// Returns the refresh period.
    #[must_use]
    pub fn scan_interval(&self) -> Duration {
        self.scan_interval_secs
            .filter(|s| *s > 0)
            .map_or(Self::DEFAULT_SCAN_INTERVAL, Duration::from_secs)
    }
}

/// Warm-up settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WarmupConfig {
    /// Whether to send the warm-up stops at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Channel the stops are sent on. Numbers are accepted as for covers.
    #[serde(
        default = "default_warmup_channel",
        deserialize_with = "channel_from_string_or_number"
    )]
    pub channel: Channel,
    /// Number of stops.
    #[serde(default = "default_warmup_count")]
    pub count: u8,
}

impl WarmupConfig {
    /// A configuration that skips the warm-up.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    fn into_warmup(self) -> Warmup {
        if self.enabled && self.count > 0 {
            Warmup::Stop {
                channel: self.channel,
                count: self.count,
            }
        } else {
            Warmup::Disabled
        }
    }
}

impl Default for WarmupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            channel: default_warmup_channel(),
            count: default_warmup_count(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_warmup_channel() -> Channel {
    Channel::from(1)
}

fn default_warmup_count() -> u8 {
    2
}

/// Definition of a single cover.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoverConfig {
    /// Display name; the configuration key is used when absent.
    #[serde(default)]
    pub friendly_name: Option<String>,
    /// RF channel; required. Numbers are accepted and rendered as text.
    #[serde(default, deserialize_with = "string_or_number")]
    pub channel: Option<String>,
    /// Expression evaluated by the host to derive the position.
    #[serde(default)]
    pub value_template: Option<String>,
    /// Position reached by tilting up from closed.
    #[serde(default)]
    pub ventilation_position: Option<u8>,
    /// Position reached by tilting down from open.
    #[serde(default)]
    pub intermediate_position: Option<u8>,
}

impl CoverConfig {
    /// Creates a definition for `channel`.
    #[must_use]
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: Some(channel.into()),
            ..Self::default()
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    /// Binds the position to an external expression.
    #[must_use]
    pub fn with_value_template(mut self, template: impl Into<String>) -> Self {
        self.value_template = Some(template.into());
        self
    }

    /// Sets the tilt positions.
    #[must_use]
    pub fn with_tilt_positions(mut self, ventilation: u8, intermediate: u8) -> Self {
        self.ventilation_position = Some(ventilation);
        self.intermediate_position = Some(intermediate);
        self
    }

    /// Validates the definition stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingChannel` when no usable channel is given,
    /// or `ConfigError::InvalidTiltPosition` for bad tilt positions.
    pub fn resolve(&self, key: &str) -> Result<ResolvedCover, ConfigError> {
        let channel = self
            .channel
            .as_deref()
            .and_then(|c| Channel::new(c).ok())
            .ok_or_else(|| ConfigError::MissingChannel {
                cover: key.to_string(),
            })?;

        let tilt = TiltPositions::new(
            self.ventilation_position
                .unwrap_or(TiltPositions::DEFAULT_VENTILATION),
            self.intermediate_position
                .unwrap_or(TiltPositions::DEFAULT_INTERMEDIATE),
        )
        .map_err(|invalid| ConfigError::InvalidTiltPosition {
            cover: key.to_string(),
            position: invalid.position,
            reason: invalid.reason,
        })?;

        Ok(ResolvedCover {
            name: self.friendly_name.clone().unwrap_or_else(|| key.to_string()),
            channel,
            value_template: self.value_template.clone(),
            tilt,
        })
    }
}

/// A validated cover definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCover {
    /// Display name.
    pub name: String,
    /// RF channel.
    pub channel: Channel,
    /// Bound expression, if any.
    pub value_template: Option<String>,
    /// Tilt positions.
    pub tilt: TiltPositions,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

fn channel_from_string_or_number<'de, D>(deserializer: D) -> Result<Channel, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match string_or_number(deserializer)? {
        Some(raw) => Channel::new(raw).map_err(D::Error::custom),
        None => Ok(default_warmup_channel()),
    }
}
