// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting cover events.

use tokio::sync::broadcast;

use super::CoverEvent;

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Broadcast channel shared by every cover of a platform.
///
/// Cloning the bus yields another handle to the same channel. A subscriber
/// that falls more than the capacity behind loses the oldest events and sees
/// `RecvError::Lagged`.
///
/// # Examples
///
/// ```
/// use centronic_lib::event::{CoverEvent, EventBus};
/// use centronic_lib::types::Channel;
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// bus.publish(CoverEvent::cover_added(Channel::from(1), "Kitchen"));
/// assert_eq!(bus.subscriber_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoverEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus buffering up to `capacity` events.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CoverEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event; dropped silently when nobody listens.
    pub fn publish(&self, event: CoverEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Channel, Position};

    #[test]
    fn publish_without_subscribers_is_harmless() {
        let bus = EventBus::new();
        bus.publish(CoverEvent::cover_added(Channel::from(1), "Hall"));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn clones_share_the_channel() {
        let bus = EventBus::with_capacity(4);
        let mut rx = bus.subscribe();

        bus.clone()
            .publish(CoverEvent::position_changed(Channel::from(3), Some(Position::OPEN)));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.channel(), &Channel::from(3));
    }
}
