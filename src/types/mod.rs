// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for cover control.
//!
//! Each type ensures values are within their valid ranges at construction
//! time.
//!
//! # Types
//!
//! - [`Channel`] - RF receiver group a command is addressed to
//! - [`Position`] - Cover position (0-100%)
//! - [`PairingChannel`] / [`UnitNumber`] - Parts of a [`PairingAddress`]

mod channel;
mod pairing;
mod position;

pub use channel::Channel;
pub use pairing::{PairingAddress, PairingChannel, UnitNumber};
pub use position::Position;
