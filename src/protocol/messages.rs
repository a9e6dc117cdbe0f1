// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command message protocol used by the host link.
//!
//! Frame layout:
//!
//! | Byte | Content |
//! | ---- | ------- |
//! | 0 | [`START_BYTE`] |
//! | 1 | message id |
//! | 2.. | payload |
//! | last | checksum: wrapping sum of id and payload |

use crate::colour::{Colour, Zone};

/// Sync byte for the protocol.
pub const START_BYTE: u8 = 0xA5;

// Message IDs
pub const MSG_SHIP: u8 = 0x40;

// Colour / zone codes
pub const CODE_RED: u8 = 1;
pub const CODE_GREEN: u8 = 2;
pub const CODE_BLUE: u8 = 3;

/// Requests the host can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Ship one block of `colour` to `zone`.
    Ship { colour: Colour, zone: Zone },
}

/// Decode a colour or zone byte. Yellow has no code.
pub fn decode_colour(code: u8) -> Option<Colour> {
    match code {
        CODE_RED => Some(Colour::Red),
        CODE_GREEN => Some(Colour::Green),
        CODE_BLUE => Some(Colour::Blue),
        _ => None,
    }
}

pub fn encode_colour(colour: Colour) -> Option<u8> {
    match colour {
        Colour::Red => Some(CODE_RED),
        Colour::Green => Some(CODE_GREEN),
        Colour::Blue => Some(CODE_BLUE),
        Colour::Yellow => None,
    }
}
