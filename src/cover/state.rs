// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Optimistic position tracking.
//!
//! A self-tracked cover never learns its real position from the hardware.
//! It guesses from the commands it sends, moving between five named states:
//!
//! ```text
//!            open_tilt              open_tilt
//!   CLOSED ------------> VENTILATION ---------> OPEN
//!     ^                                           |
//!     |       close_tilt              close_tilt  |
//!     +------------------ INTERMEDIATE <----------+
//! ```
//!
//! `open`, `close` and `stop` jump straight to OPEN, CLOSED and STOPPED (50)
//! from anywhere. Tilt commands from any other state leave it unchanged.

use std::fmt;

use crate::command::{CommandKind, RfCommand};
use crate::types::{Channel, Position};

/// A cover operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    /// Open fully.
    Open,
    /// Close fully.
    Close,
    /// Stop moving.
    Stop,
    /// Step up through the ventilation position.
    OpenTilt,
    /// Step down through the intermediate position.
    CloseTilt,
}

impl Movement {
    /// Returns the RF command kind carrying this movement.
    #[must_use]
    pub const fn command_kind(self) -> CommandKind {
        match self {
            Self::Open => CommandKind::MoveUp,
            Self::Close => CommandKind::MoveDown,
            Self::Stop => CommandKind::Stop,
            Self::OpenTilt => CommandKind::MoveUpIntermediate,
            Self::CloseTilt => CommandKind::MoveDownIntermediate,
        }
    }

    /// Builds the RF command for `channel`.
    #[must_use]
    pub fn command(self, channel: Channel) -> RfCommand {
        RfCommand::new(channel, self.command_kind())
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Stop => "stop",
            Self::OpenTilt => "open_tilt",
            Self::CloseTilt => "close_tilt",
        };
        f.write_str(name)
    }
}

/// A rejected tilt position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTilt {
    /// The offending value.
    pub position: u8,
    /// Why it was rejected.
    pub reason: &'static str,
}

/// The two intermediate positions reached by tilt commands.
///
/// Both must lie strictly between closed and open, differ from the stopped
/// position and from each other, so every tracked state stays distinct.
///
/// # Examples
///
/// ```
/// use centronic_lib::cover::TiltPositions;
///
/// let tilt = TiltPositions::default();
/// assert_eq!(tilt.ventilation().value(), 10);
/// assert_eq!(tilt.intermediate().value(), 25);
///
/// assert!(TiltPositions::new(50, 25).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiltPositions {
    ventilation: Position,
    intermediate: Position,
}

impl TiltPositions {
    /// Default ventilation position.
    pub const DEFAULT_VENTILATION: u8 = 10;
    /// Default intermediate position.
    pub const DEFAULT_INTERMEDIATE: u8 = 25;

    /// Creates tilt positions.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTilt`] naming the first value that collides or is out
    /// of range.
    pub fn new(ventilation: u8, intermediate: u8) -> Result<Self, InvalidTilt> {
        let ventilation = check(ventilation)?;
        let intermediate = check(intermediate)?;
        if ventilation == intermediate {
            return Err(InvalidTilt {
                position: intermediate.value(),
                reason: "ventilation and intermediate positions must differ",
            });
        }
        Ok(Self {
            ventilation,
            intermediate,
        })
    }

    /// Returns the position reached by tilting up from closed.
    #[must_use]
    pub const fn ventilation(&self) -> Position {
        self.ventilation
    }

    /// Returns the position reached by tilting down from open.
    #[must_use]
    pub const fn intermediate(&self) -> Position {
        self.intermediate
    }

    /// Computes the position after `movement`, starting from `current`.
    ///
    /// An unknown position stays unknown under tilt commands.
    #[must_use]
    pub fn next(&self, current: Option<Position>, movement: Movement) -> Option<Position> {
        match movement {
            Movement::Open => Some(Position::OPEN),
            Movement::Close => Some(Position::CLOSED),
            Movement::Stop => Some(Position::STOPPED),
            Movement::OpenTilt => match current {
                Some(Position::CLOSED) => Some(self.ventilation),
                Some(p) if p == self.ventilation => Some(Position::OPEN),
                other => other,
            },
            Movement::CloseTilt => match current {
                Some(Position::OPEN) => Some(self.intermediate),
                Some(p) if p == self.intermediate => Some(Position::CLOSED),
                other => other,
            },
        }
    }
}

impl Default for TiltPositions {
    fn default() -> Self {
        Self {
            ventilation: Position::clamped(Self::DEFAULT_VENTILATION),
            intermediate: Position::clamped(Self::DEFAULT_INTERMEDIATE),
        }
    }
}

fn check(value: u8) -> Result<Position, InvalidTilt> {
    let invalid = |reason| InvalidTilt {
        position: value,
        reason,
    };
    match value {
        0 | 100.. => Err(invalid("must lie strictly between 0 and 100")),
        50 => Err(invalid("collides with the stopped position")),
        v => Position::new(v).map_err(|_| invalid("out of range")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(v: u8) -> Option<Position> {
        Some(Position::new(v).unwrap())
    }

    #[test]
    fn open_tilt_steps_up_and_saturates() {
        let tilt = TiltPositions::default();
        let mut current = Some(Position::CLOSED);

        current = tilt.next(current, Movement::OpenTilt);
        assert_eq!(current, pos(10));
        current = tilt.next(current, Movement::OpenTilt);
        assert_eq!(current, Some(Position::OPEN));
        current = tilt.next(current, Movement::OpenTilt);
        assert_eq!(current, Some(Position::OPEN));
    }

    #[test]
    fn close_tilt_steps_down_and_saturates() {
        let tilt = TiltPositions::default();
        let mut current = Some(Position::OPEN);

        current = tilt.next(current, Movement::CloseTilt);
        assert_eq!(current, pos(25));
        current = tilt.next(current, Movement::CloseTilt);
        assert_eq!(current, Some(Position::CLOSED));
        current = tilt.next(current, Movement::CloseTilt);
        assert_eq!(current, Some(Position::CLOSED));
    }

    #[test]
    fn tilt_from_stopped_is_a_no_op() {
        let tilt = TiltPositions::default();
        assert_eq!(
            tilt.next(Some(Position::STOPPED), Movement::OpenTilt),
            Some(Position::STOPPED)
        );
        assert_eq!(
            tilt.next(Some(Position::STOPPED), Movement::CloseTilt),
            Some(Position::STOPPED)
        );
    }

    #[test]
    fn tilt_crossing_branches_do_not_mix() {
        let tilt = TiltPositions::default();
        // Ventilation is only left upwards, intermediate only downwards.
        assert_eq!(tilt.next(pos(10), Movement::CloseTilt), pos(10));
        assert_eq!(tilt.next(pos(25), Movement::OpenTilt), pos(25));
    }

    #[test]
    fn unknown_position_is_kept_by_tilt() {
        let tilt = TiltPositions::default();
        assert_eq!(tilt.next(None, Movement::OpenTilt), None);
        assert_eq!(tilt.next(None, Movement::Stop), Some(Position::STOPPED));
    }

    #[test]
    fn invalid_tilt_positions() {
        assert!(TiltPositions::new(0, 25).is_err());
        assert!(TiltPositions::new(10, 100).is_err());
        assert!(TiltPositions::new(10, 150).is_err());
        assert!(TiltPositions::new(20, 20).is_err());
        assert_eq!(TiltPositions::new(10, 50).unwrap_err().position, 50);
        assert!(TiltPositions::new(5, 80).is_ok());
    }

    #[test]
    fn movements_map_to_commands() {
        let cmd = Movement::OpenTilt.command(Channel::from(6));
        assert_eq!(cmd.kind(), CommandKind::MoveUpIntermediate);
        assert_eq!(cmd.channel(), &Channel::from(6));
        assert_eq!(Movement::Close.command_kind(), CommandKind::MoveDown);
    }
}
