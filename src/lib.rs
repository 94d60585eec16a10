// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `Centronic` Lib - A Rust library to control Becker Centronic RF covers.
//!
//! Covers (blinds, shutters) are driven through a single USB transceiver
//! stick. The library keeps one owner per stick and serializes every radio
//! command through it.
//!
//! # Supported Features
//!
//! - **Cover control**: Open, close, stop and two tilt steps per channel
//! - **Position tracking**: Guessed from the commands sent, or read from an
//!   external signal (boolean, number or state label)
//! - **Administration**: Pair new receivers, list the unit database
//! - **Events**: Broadcast of cover additions and position changes
//!
//! # Quick Start
//!
//! ## Platform from Configuration
//!
//! ```ignore
//! use centronic_lib::platform::{CoverPlatform, NoRestore, PlatformConfig};
//! use centronic_lib::cover::Movement;
//! use centronic_lib::types::Channel;
//!
//! # async fn example<T: centronic_lib::protocol::Transceiver + 'static>(
//! #     connect: impl FnOnce(&str, &std::path::Path) -> centronic_lib::Result<T>,
//! #     binder: impl centronic_lib::platform::SignalBinder,
//! # ) -> centronic_lib::Result<()> {
//! let config = PlatformConfig::from_json(
//!     r#"{
//!         "covers": {
//!             "kitchen": { "channel": "1", "friendly_name": "Kitchen" },
//!             "terrace": { "channel": "2", "value_template": "{{ states('sensor.terrace') }}" }
//!         }
//!     }"#,
//! )?;
//!
//! let mut platform = CoverPlatform::setup(&config, connect, &binder).await?;
//! platform.added_to_platform(&NoRestore);
//! platform.start_refresh();
//!
//! platform.execute(&Channel::from(1), Movement::Close).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Single Cover
//!
//! ```ignore
//! use std::sync::Arc;
//! use centronic_lib::cover::Cover;
//! use centronic_lib::protocol::{Stick, StickConfig};
//! use centronic_lib::types::Channel;
//!
//! # async fn example(driver: impl centronic_lib::protocol::Transceiver) -> centronic_lib::Result<()> {
//! let stick = Arc::new(Stick::new(driver, StickConfig::default()));
//! let cover = Cover::self_tracked("Office", Channel::from(4), stick);
//!
//! cover.open_tilt().await?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod cover;
pub mod error;
pub mod event;
pub mod platform;
pub mod protocol;
pub mod response;
pub mod signal;
pub mod types;

pub use command::{CommandKind, RfCommand};
pub use cover::{Cover, Movement, PositionMode, TiltPositions};
pub use error::{ConfigError, DeviceError, Error, ProtocolError, Result, ValueError};
pub use event::{CoverEvent, EventBus};
pub use platform::{CoverPlatform, PlatformConfig};
pub use protocol::{Stick, StickConfig, Transceiver, Warmup};
pub use response::{NumberedUnit, UnitRecord};
pub use signal::{SignalSource, SignalValue};
pub use types::{Channel, PairingAddress, Position};
