// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RF channel identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Identifier of the receiver group an RF command is addressed to.
///
/// The stick treats channels as opaque strings (`"1"`, `"2:3"`, ...), so no
/// structure is imposed beyond being non-empty. A channel also serves as the
/// unique id of the cover bound to it.
///
/// # Examples
///
/// ```
/// use centronic_lib::types::Channel;
///
/// let channel = Channel::new("3").unwrap();
/// assert_eq!(channel.as_str(), "3");
///
/// assert!(Channel::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Channel(String);

impl Channel {
    /// Creates a channel, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyChannel` if nothing is left after trimming.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValueError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValueError::EmptyChannel);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the channel as sent to the stick.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Channel {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Channel {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Channel> for String {
    fn from(channel: Channel) -> Self {
        channel.0
    }
}

impl From<u8> for Channel {
    fn from(value: u8) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_trims_whitespace() {
        assert_eq!(Channel::new(" 4 ").unwrap().as_str(), "4");
    }

    #[test]
    fn channel_rejects_empty() {
        assert_eq!(Channel::new(""), Err(ValueError::EmptyChannel));
    }

    #[test]
    fn channel_from_number() {
        assert_eq!(Channel::from(1).to_string(), "1");
    }

    #[test]
    fn channel_deserializes_from_string() {
        let channel: Channel = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(channel, Channel::from(2));

        assert!(serde_json::from_str::<Channel>("\"\"").is_err());
    }
}
