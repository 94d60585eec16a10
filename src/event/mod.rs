// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for cover state changes.
//!
//! The [`EventBus`] uses tokio's broadcast channel so any number of
//! subscribers can follow position changes of every cover on the platform.
//!
//! # Examples
//!
//! ```
//! use centronic_lib::event::{CoverEvent, EventBus};
//! use centronic_lib::types::{Channel, Position};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(CoverEvent::position_changed(Channel::from(2), Some(Position::OPEN)));
//! ```

mod cover_event;
mod event_bus;

pub use cover_event::CoverEvent;
pub use event_bus::EventBus;
