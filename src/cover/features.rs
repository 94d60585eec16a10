// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity classification and supported operations.

use std::fmt;
use std::ops::BitOr;

/// Kind of cover as reported to the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceClass {
    /// Roller blinds and shutters.
    #[default]
    Blind,
}

impl DeviceClass {
    /// Returns the platform tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Blind => "blind",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bitset of operations a cover supports.
///
/// Bit values follow the host platform's cover feature flags.
///
/// # Examples
///
/// ```
/// use centronic_lib::cover::SupportedFeatures;
///
/// let features = SupportedFeatures::OPEN | SupportedFeatures::STOP;
/// assert!(features.contains(SupportedFeatures::OPEN));
/// assert!(!features.contains(SupportedFeatures::CLOSE_TILT));
/// assert_eq!(SupportedFeatures::COVER.bits(), 59);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SupportedFeatures(u32);

impl SupportedFeatures {
    /// Open the cover.
    pub const OPEN: Self = Self(1);
    /// Close the cover.
    pub const CLOSE: Self = Self(2);
    /// Stop the cover.
    pub const STOP: Self = Self(8);
    /// Tilt open.
    pub const OPEN_TILT: Self = Self(16);
    /// Tilt closed.
    pub const CLOSE_TILT: Self = Self(32);

    /// Everything a Centronic cover can do.
    pub const COVER: Self = Self(
        Self::OPEN.0 | Self::CLOSE.0 | Self::STOP.0 | Self::OPEN_TILT.0 | Self::CLOSE_TILT.0,
    );

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Returns `true` if every bit of `other` is set.
    #[must_use]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for SupportedFeatures {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_supports_all_five_operations() {
        for flag in [
            SupportedFeatures::OPEN,
            SupportedFeatures::CLOSE,
            SupportedFeatures::STOP,
            SupportedFeatures::OPEN_TILT,
            SupportedFeatures::CLOSE_TILT,
        ] {
            assert!(SupportedFeatures::COVER.contains(flag));
        }
    }

    #[test]
    fn device_class_tag() {
        assert_eq!(DeviceClass::default().to_string(), "blind");
    }
}
