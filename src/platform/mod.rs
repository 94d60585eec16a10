// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration with a host automation platform.
//!
//! The host hands over a [`PlatformConfig`] plus two capabilities it owns:
//! a [`SignalBinder`] that compiles `value_template` expressions and a
//! [`RestoreState`] that remembers the last state of each cover. In return
//! it gets a [`CoverPlatform`] with one [`Cover`](crate::cover::Cover) per
//! valid definition and the administrative [`services`].

mod config;
mod cover_platform;
mod host;
pub mod services;

pub use config::{CoverConfig, PlatformConfig, ResolvedCover, WarmupConfig};
pub use cover_platform::CoverPlatform;
pub use host::{NoRestore, RestoreState, SignalBinder};
pub use services::{DOMAIN, ServiceOutcome, call_service, parse_pair_params};
