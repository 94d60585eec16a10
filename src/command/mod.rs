// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RF command definitions.
//!
//! Every command is scoped to a single [`Channel`]. Encoding the command into
//! radio frames is the transceiver driver's job; this module only names the
//! operation.
//!
//! | Kind | Cover operation |
//! |------|-----------------|
//! | [`CommandKind::MoveUp`] | open |
//! | [`CommandKind::MoveDown`] | close |
//! | [`CommandKind::MoveUpIntermediate`] | open tilt (ventilation) |
//! | [`CommandKind::MoveDownIntermediate`] | close tilt (intermediate) |
//! | [`CommandKind::Stop`] | stop |
//!
//! # Examples
//!
//! ```
//! use centronic_lib::command::{CommandKind, RfCommand};
//! use centronic_lib::types::Channel;
//!
//! let cmd = RfCommand::move_up(Channel::from(3));
//! assert_eq!(cmd.kind(), CommandKind::MoveUp);
//! assert_eq!(cmd.to_string(), "up 3");
//! ```

use std::fmt;

use crate::types::Channel;

/// The operation carried by an RF command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Drive the cover fully up.
    MoveUp,
    /// Drive the cover fully down.
    MoveDown,
    /// Drive up to the ventilation position.
    MoveUpIntermediate,
    /// Drive down to the intermediate position.
    MoveDownIntermediate,
    /// Halt any movement.
    Stop,
}

impl CommandKind {
    /// Returns the short name used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MoveUp => "up",
            Self::MoveDown => "down",
            Self::MoveUpIntermediate => "up2",
            Self::MoveDownIntermediate => "down2",
            Self::Stop => "halt",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A command addressed to one channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RfCommand {
    channel: Channel,
    kind: CommandKind,
}

impl RfCommand {
    /// Creates a command.
    #[must_use]
    pub const fn new(channel: Channel, kind: CommandKind) -> Self {
        Self { channel, kind }
    }

    /// Creates a move-up command.
    #[must_use]
    pub const fn move_up(channel: Channel) -> Self {
        Self::new(channel, CommandKind::MoveUp)
    }

    /// Creates a move-down command.
    #[must_use]
    pub const fn move_down(channel: Channel) -> Self {
        Self::new(channel, CommandKind::MoveDown)
    }

    /// Creates a move-up-to-ventilation command.
    #[must_use]
    pub const fn move_up_intermediate(channel: Channel) -> Self {
        Self::new(channel, CommandKind::MoveUpIntermediate)
    }

    /// Creates a move-down-to-intermediate command.
    #[must_use]
    pub const fn move_down_intermediate(channel: Channel) -> Self {
        Self::new(channel, CommandKind::MoveDownIntermediate)
    }

    /// Creates a stop command.
    #[must_use]
    pub const fn stop(channel: Channel) -> Self {
        Self::new(channel, CommandKind::Stop)
    }

    /// Returns the target channel.
    #[must_use]
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Returns the operation.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        self.kind
    }
}

impl fmt::Display for RfCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        let ch = Channel::from(2);
        assert_eq!(RfCommand::move_up(ch.clone()).kind(), CommandKind::MoveUp);
        assert_eq!(RfCommand::move_down(ch.clone()).kind(), CommandKind::MoveDown);
        assert_eq!(
            RfCommand::move_up_intermediate(ch.clone()).kind(),
            CommandKind::MoveUpIntermediate
        );
        assert_eq!(
            RfCommand::move_down_intermediate(ch.clone()).kind(),
            CommandKind::MoveDownIntermediate
        );
        assert_eq!(RfCommand::stop(ch).kind(), CommandKind::Stop);
    }

    #[test]
    fn command_display() {
        assert_eq!(RfCommand::stop(Channel::from(1)).to_string(), "halt 1");
        assert_eq!(
            RfCommand::move_down_intermediate(Channel::from(4)).to_string(),
            "down2 4"
        );
    }
}
