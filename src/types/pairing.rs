// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pairing address types.

use std::fmt;

use crate::error::ValueError;

/// Channel number used when pairing a receiver (1-7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairingChannel(u8);

impl PairingChannel {
    /// Lowest pairable channel.
    pub const MIN: u8 = 1;
    /// Highest pairable channel.
    pub const MAX: u8 = 7;

    /// Creates a pairing channel.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` outside 1-7.
    pub fn new(value: i64) -> Result<Self, ValueError> {
        checked(value, Self::MIN, Self::MAX).map(Self)
    }

    /// Returns the channel number.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

/// Unit number of the stick sending the pairing request (1-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitNumber(u8);

impl UnitNumber {
    /// Lowest unit number.
    pub const MIN: u8 = 1;
    /// Highest unit number.
    pub const MAX: u8 = 5;

    /// Creates a unit number.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` outside 1-5.
    pub fn new(value: i64) -> Result<Self, ValueError> {
        checked(value, Self::MIN, Self::MAX).map(Self)
    }

    /// Returns the unit number.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl Default for UnitNumber {
    fn default() -> Self {
        Self(1)
    }
}

fn checked(value: i64, min: u8, max: u8) -> Result<u8, ValueError> {
    u8::try_from(value)
        .ok()
        .filter(|v| (min..=max).contains(v))
        .ok_or(ValueError::OutOfRange {
            min: i64::from(min),
            max: i64::from(max),
            actual: value,
        })
}

/// Address of a pairing request, rendered as `<unit>:<channel>`.
///
/// # Examples
///
/// ```
/// use centronic_lib::types::{PairingAddress, PairingChannel, UnitNumber};
///
/// let address = PairingAddress::new(PairingChannel::new(3).unwrap(), UnitNumber::default());
/// assert_eq!(address.to_string(), "1:3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairingAddress {
    channel: PairingChannel,
    unit: UnitNumber,
}

impl PairingAddress {
    /// Creates a pairing address.
    #[must_use]
    pub const fn new(channel: PairingChannel, unit: UnitNumber) -> Self {
        Self { channel, unit }
    }

    /// Returns the channel.
    #[must_use]
    pub const fn channel(&self) -> PairingChannel {
        self.channel
    }

    /// Returns the unit.
    #[must_use]
    pub const fn unit(&self) -> UnitNumber {
        self.unit
    }
}

impl fmt::Display for PairingAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.unit.0, self.channel.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairing_channel_range() {
        assert!(PairingChannel::new(0).is_err());
        assert!(PairingChannel::new(1).is_ok());
        assert!(PairingChannel::new(7).is_ok());
        assert_eq!(
            PairingChannel::new(8),
            Err(ValueError::OutOfRange {
                min: 1,
                max: 7,
                actual: 8
            })
        );
    }

    #[test]
    fn unit_number_range() {
        assert!(UnitNumber::new(5).is_ok());
        assert!(UnitNumber::new(6).is_err());
        assert!(UnitNumber::new(-1).is_err());
        assert_eq!(UnitNumber::default().value(), 1);
    }

    #[test]
    fn address_is_unit_then_channel() {
        let address = PairingAddress::new(
            PairingChannel::new(7).unwrap(),
            UnitNumber::new(2).unwrap(),
        );
        assert_eq!(address.to_string(), "2:7");
    }
}
