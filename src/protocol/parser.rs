// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Message parser for the host-link command protocol.
//!
//! Bytes are pushed one at a time as they come off the USART. Any framing error (unknown id,
//! bad colour code, checksum mismatch) drops the frame and the parser waits for the next start
//! byte.

use embedded_hal::serial::Read;

use crate::protocol::messages::*;

#[derive(Clone, Copy, Debug)]
enum State {
    WaitStart,
    WaitId,
    WaitColour,
    WaitZone { colour: u8 },
    WaitChecksum { colour: u8, zone: u8 },
}

pub struct Parser {
    state: State,
    checksum: u8,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::WaitStart,
            checksum: 0,
        }
    }

    /// Feed one byte. Returns the command once its checksum byte arrives and checks out.
    pub fn push(&mut self, byte: u8) -> Option<Command> {
        match self.state {
            State::WaitStart => {
                if byte == START_BYTE {
                    self.state = State::WaitId;
                    self.checksum = 0;
                }
            }
            State::WaitId => {
                self.checksum = self.checksum.wrapping_add(byte);
                self.state = if byte == MSG_SHIP {
                    State::WaitColour
                } else {
                    State::WaitStart
                };
            }
            State::WaitColour => {
                self.checksum = self.checksum.wrapping_add(byte);
                self.state = State::WaitZone { colour: byte };
            }
            State::WaitZone { colour } => {
                self.checksum = self.checksum.wrapping_add(byte);
                self.state = State::WaitChecksum { colour, zone: byte };
            }
            State::WaitChecksum { colour, zone } => {
                self.state = State::WaitStart;
                if byte == self.checksum {
                    return match (decode_colour(colour), decode_colour(zone)) {
                        (Some(colour), Some(zone)) => Some(Command::Ship { colour, zone }),
                        _ => None,
                    };
                }
            }
        }
        None
    }

    /// Drain every byte currently buffered in `link`, returning the first complete command.
    ///
    /// Stops early on a complete command so the next one stays queued in the link.
    pub fn poll<L: Read<u8>>(&mut self, link: &mut L) -> Option<Command> {
        loop {
            match link.read() {
                Ok(byte) => {
                    if let Some(cmd) = self.push(byte) {
                        return Some(cmd);
                    }
                }
                // Overruns and framing errors lose bytes; the checksum catches the damage.
                Err(nb::Error::Other(_)) => continue,
                Err(nb::Error::WouldBlock) => return None,
            }
        }
    }
}

/// Encode a ship request into a frame.
pub fn encode_ship(colour: crate::colour::Colour, zone: crate::colour::Zone) -> Option<[u8; 5]> {
    let c = encode_colour(colour)?;
    let z = encode_colour(zone)?;
    let sum = MSG_SHIP.wrapping_add(c).wrapping_add(z);
    Some([START_BYTE, MSG_SHIP, c, z, sum])
}
