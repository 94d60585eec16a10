// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cover entities.
//!
//! A [`Cover`] controls the receivers on one RF channel. Operations are
//! forwarded to the shared [`Stick`] as channel-scoped commands. The cover
//! keeps a position for the host to display, obtained in one of two ways
//! fixed at construction:
//!
//! - **Self-tracked**: the position is guessed from the commands sent (see
//!   [`TiltPositions::next`]). It is an estimate, never confirmed by the
//!   hardware.
//! - **Externally derived**: the position is read from a [`SignalSource`] on
//!   every [`Cover::update`]. Commands never touch it.
//!
//! # Examples
//!
//! ```ignore
//! use std::sync::Arc;
//! use centronic_lib::cover::Cover;
//! use centronic_lib::types::Channel;
//!
//! # async fn example<T: centronic_lib::protocol::Transceiver>(
//! #     stick: Arc<centronic_lib::protocol::Stick<T>>,
//! # ) -> centronic_lib::Result<()> {
//! let cover = Cover::self_tracked("Living room", Channel::from(2), stick);
//!
//! cover.close().await?;
//! assert!(cover.is_closed());
//! # Ok(())
//! # }
//! ```

mod features;
mod state;

pub use features::{DeviceClass, SupportedFeatures};
pub use state::{InvalidTilt, Movement, TiltPositions};

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Error;
use crate::event::{CoverEvent, EventBus};
use crate::protocol::{Stick, Transceiver};
use crate::signal::{self, SignalSource};
use crate::types::{Channel, Position};

/// State label the host restores for a cover that was last open.
pub const STATE_OPEN: &str = "open";

/// How a cover obtains its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionMode {
    /// Guessed from the commands sent.
    SelfTracked,
    /// Read from an external signal.
    ExternallyDerived,
}

enum PositionSource {
    SelfTracked,
    External(Arc<dyn SignalSource>),
}

impl fmt::Debug for PositionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfTracked => f.write_str("SelfTracked"),
            Self::External(_) => f.write_str("External(..)"),
        }
    }
}

/// A cover on one RF channel.
#[derive(Debug)]
pub struct Cover<T> {
    name: String,
    channel: Channel,
    source: PositionSource,
    tilt: TiltPositions,
    position: RwLock<Option<Position>>,
    stick: Arc<Stick<T>>,
    events: EventBus,
}

impl<T: Transceiver> Cover<T> {
    /// Creates a cover that tracks its own position.
    ///
    /// The position starts at [`Position::STOPPED`] until a previous state is
    /// restored.
    #[must_use]
    pub fn self_tracked(name: impl Into<String>, channel: Channel, stick: Arc<Stick<T>>) -> Self {
        Self::with_source(
            name.into(),
            channel,
            stick,
            PositionSource::SelfTracked,
            Some(Position::STOPPED),
        )
    }

    /// Creates a cover whose position follows `source`.
    ///
    /// The position is unknown until the first [`update`](Self::update).
    #[must_use]
    pub fn externally_derived(
        name: impl Into<String>,
        channel: Channel,
        stick: Arc<Stick<T>>,
        source: Arc<dyn SignalSource>,
    ) -> Self {
        Self::with_source(
            name.into(),
            channel,
            stick,
            PositionSource::External(source),
            None,
        )
    }

    fn with_source(
        name: String,
        channel: Channel,
        stick: Arc<Stick<T>>,
        source: PositionSource,
        position: Option<Position>,
    ) -> Self {
        Self {
            name,
            channel,
            source,
            tilt: TiltPositions::default(),
            position: RwLock::new(position),
            stick,
            events: EventBus::new(),
        }
    }

    /// Sets the positions reached by tilt commands.
    #[must_use]
    pub fn with_tilt_positions(mut self, tilt: TiltPositions) -> Self {
        self.tilt = tilt;
        self
    }

    /// Publishes position changes on `events` instead of a private bus.
    #[must_use]
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    // ========== Entity Attributes ==========

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unique id, which is the channel.
    #[must_use]
    pub fn unique_id(&self) -> &Channel {
        &self.channel
    }

    /// Returns the channel the cover listens on.
    #[must_use]
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Returns how the position is obtained.
    #[must_use]
    pub fn mode(&self) -> PositionMode {
        match self.source {
            PositionSource::SelfTracked => PositionMode::SelfTracked,
            PositionSource::External(_) => PositionMode::ExternallyDerived,
        }
    }

    /// Returns the tilt positions.
    #[must_use]
    pub fn tilt_positions(&self) -> TiltPositions {
        self.tilt
    }

    /// Returns the current position, `None` when unknown.
    #[must_use]
    pub fn current_position(&self) -> Option<Position> {
        *self.position.read()
    }

    /// Returns `true` only when the position is known to be fully closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.current_position().is_some_and(|p| p.is_closed())
    }

    /// Returns the device class.
    #[must_use]
    pub fn device_class(&self) -> DeviceClass {
        DeviceClass::Blind
    }

    /// Returns the supported operations.
    #[must_use]
    pub fn supported_features(&self) -> SupportedFeatures {
        SupportedFeatures::COVER
    }

    // ========== Lifecycle ==========

    /// Restores the last known state when the cover joins the platform.
    ///
    /// For a self-tracked cover, `"open"` restores [`Position::OPEN`] and any
    /// other label [`Position::CLOSED`]. Without a label the position is left
    /// alone. Externally derived covers ignore this.
    pub fn restore(&self, last_state: Option<&str>) {
        if self.mode() != PositionMode::SelfTracked {
            return;
        }
        if let Some(label) = last_state {
            let position = if label == STATE_OPEN {
                Position::OPEN
            } else {
                Position::CLOSED
            };
            tracing::debug!(channel = %self.channel, label, %position, "Restored cover state");
            self.set_position(Some(position));
        }
    }

    /// Re-evaluates the external signal.
    ///
    /// Invalid values and evaluation failures are logged and leave the
    /// position unknown. Self-tracked covers have nothing to refresh.
    pub fn update(&self) {
        if let PositionSource::External(source) = &self.source {
            let position = signal::resolve(source.evaluate());
            self.set_position(position);
        }
    }

    // ========== Operations ==========

    /// Opens the cover.
    ///
    /// # Errors
    ///
    /// Returns error if the RF command fails.
    pub async fn open(&self) -> Result<(), Error> {
        self.execute(Movement::Open).await
    }

    /// Closes the cover.
    ///
    /// # Errors
    ///
    /// Returns error if the RF command fails.
    pub async fn close(&self) -> Result<(), Error> {
        self.execute(Movement::Close).await
    }

    /// Stops the cover.
    ///
    /// # Errors
    ///
    /// Returns error if the RF command fails.
    pub async fn stop(&self) -> Result<(), Error> {
        self.execute(Movement::Stop).await
    }

    /// Tilts the cover open: closed to ventilation, ventilation to open.
    ///
    /// # Errors
    ///
    /// Returns error if the RF command fails.
    pub async fn open_tilt(&self) -> Result<(), Error> {
        self.execute(Movement::OpenTilt).await
    }

    /// Tilts the cover closed: open to intermediate, intermediate to closed.
    ///
    /// # Errors
    ///
    /// Returns error if the RF command fails.
    pub async fn close_tilt(&self) -> Result<(), Error> {
        self.execute(Movement::CloseTilt).await
    }

    /// Applies the optimistic transition, then sends the command.
    ///
    /// The command goes out in both modes; only self-tracked covers move
    /// their position.
    async fn execute(&self, movement: Movement) -> Result<(), Error> {
        if self.mode() == PositionMode::SelfTracked {
            self.advance(movement);
        }

        tracing::debug!(channel = %self.channel, %movement, "Cover operation");
        self.stick.send(&movement.command(self.channel.clone())).await
    }

    /// Moves the tracked position one step, read and written under one guard.
    fn advance(&self, movement: Movement) {
        let (previous, next) = {
            let mut position = self.position.write();
            let next = self.tilt.next(*position, movement);
            (std::mem::replace(&mut *position, next), next)
        };
        if previous != next {
            self.events
                .publish(CoverEvent::position_changed(self.channel.clone(), next));
        }
    }

    fn set_position(&self, position: Option<Position>) {
        let previous = std::mem::replace(&mut *self.position.write(), position);
        if previous != position {
            self.events
                .publish(CoverEvent::position_changed(self.channel.clone(), position));
        }
    }
}
