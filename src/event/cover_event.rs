// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cover event types.

use crate::types::{Channel, Position};

/// Events emitted by covers and the platform.
///
/// Every event carries the channel of the cover it concerns, which is also
/// the cover's unique id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverEvent {
    /// A cover was created by the platform.
    CoverAdded {
        /// Channel of the cover.
        channel: Channel,
        /// Display name of the cover.
        name: String,
    },

    /// A cover's position changed.
    ///
    /// For self-tracked covers this is the optimistic estimate after a
    /// command; for externally derived covers it follows the signal.
    PositionChanged {
        /// Channel of the cover.
        channel: Channel,
        /// New position, `None` when unknown.
        position: Option<Position>,
    },
}

impl CoverEvent {
    /// Returns the channel associated with this event.
    #[must_use]
    pub fn channel(&self) -> &Channel {
        match self {
            Self::CoverAdded { channel, .. } | Self::PositionChanged { channel, .. } => channel,
        }
    }

    /// Returns `true` if this is a position change.
    #[must_use]
    pub fn is_position_change(&self) -> bool {
        matches!(self, Self::PositionChanged { .. })
    }

    /// Creates a cover added event.
    #[must_use]
    pub fn cover_added(channel: Channel, name: impl Into<String>) -> Self {
        Self::CoverAdded {
            channel,
            name: name.into(),
        }
    }

    /// Creates a position changed event.
    #[must_use]
    pub fn position_changed(channel: Channel, position: Option<Position>) -> Self {
        Self::PositionChanged { channel, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_accessor() {
        let event = CoverEvent::cover_added(Channel::from(5), "Patio");
        assert_eq!(event.channel(), &Channel::from(5));
        assert!(!event.is_position_change());
    }

    #[test]
    fn position_change_with_unknown_position() {
        let event = CoverEvent::position_changed(Channel::from(1), None);
        assert!(event.is_position_change());
        assert!(matches!(event, CoverEvent::PositionChanged { position: None, .. }));
    }
}
