// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transceiver access.
//!
//! The [`Transceiver`] trait is the seam to the driver that owns the USB link
//! and encodes the radio protocol. [`Stick`] wraps exactly one driver and is
//! the only way the rest of the library reaches it: every RF command and
//! every administrative call goes through its lock, one at a time, in the
//! order they were submitted.
//!
//! # Examples
//!
//! ```ignore
//! use std::sync::Arc;
//! use centronic_lib::protocol::{Stick, StickConfig};
//! use centronic_lib::command::RfCommand;
//! use centronic_lib::types::Channel;
//!
//! # async fn example(driver: impl centronic_lib::protocol::Transceiver) -> centronic_lib::Result<()> {
//! let stick = Arc::new(Stick::new(driver, StickConfig::default()));
//! stick.warm_up().await?;
//! stick.send(&RfCommand::move_up(Channel::from(2))).await?;
//! # Ok(())
//! # }
//! ```

mod stick;

use std::future::Future;

pub use stick::{Stick, StickConfig, Warmup};

use crate::command::RfCommand;
use crate::error::Error;
use crate::response::UnitRecord;
use crate::types::PairingAddress;

/// Driver for the USB RF transceiver.
///
/// Implementations own the physical link. Methods take `&mut self`; callers
/// never need to coordinate access because [`Stick`] holds the driver behind
/// a single lock.
///
/// Errors should be reported as [`Error::Protocol`] for transport problems
/// and [`Error::Device`] when the stick rejects a request.
pub trait Transceiver: Send {
    /// Transmits a command on its channel.
    fn send(&mut self, command: &RfCommand) -> impl Future<Output = Result<(), Error>> + Send;

    /// Sends a pairing request from the given unit on the given channel.
    fn pair(&mut self, address: &PairingAddress) -> impl Future<Output = Result<(), Error>> + Send;

    /// Reads all units from the driver's database in its native order.
    fn list_units(&mut self) -> impl Future<Output = Result<Vec<UnitRecord>, Error>> + Send;
}
