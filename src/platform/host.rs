// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Capabilities supplied by the host platform.

use std::collections::HashMap;
use std::sync::Arc;

use crate::signal::SignalSource;
use crate::types::Channel;

/// Turns a configured expression into something that can be evaluated.
///
/// The library never interprets expressions itself; the host compiles them
/// with its own templating engine.
pub trait SignalBinder {
    /// Binds `expression` for later evaluation.
    fn bind(&self, expression: &str) -> Arc<dyn SignalSource>;
}

impl<F> SignalBinder for F
where
    F: Fn(&str) -> Arc<dyn SignalSource>,
{
    fn bind(&self, expression: &str) -> Arc<dyn SignalSource> {
        self(expression)
    }
}

/// Looks up the state label a cover had before the last restart.
pub trait RestoreState {
    /// Returns the last label (`"open"`, `"closed"`, ...) for `unique_id`.
    fn last_state(&self, unique_id: &Channel) -> Option<String>;
}

impl RestoreState for HashMap<Channel, String> {
    fn last_state(&self, unique_id: &Channel) -> Option<String> {
        self.get(unique_id).cloned()
    }
}

/// Restores nothing, as on a first start.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRestore;

impl RestoreState for NoRestore {
    fn last_state(&self, _unique_id: &Channel) -> Option<String> {
        None
    }
}
