// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! ams TCS34725 RGBC colour sensor over I²C.
//!
//! The sensor returns raw red/green/blue/clear counts; [`classify`] turns them into the discrete
//! colour classes the control code works with. Thresholds are on chromaticity (channel / clear)
//! so they hold across the brightness difference between the floor tape and a block face.

use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::chassis::BlockSensor;
use crate::colour::{Colour, Reading};

pub const ADDRESS: u8 = 0x29;

// Register addresses
pub mod reg {
    pub const COMMAND: u8 = 0x80;
    pub const AUTO_INCREMENT: u8 = 0x20;

    pub const ENABLE: u8 = 0x00;
    pub const ATIME: u8 = 0x01;
    pub const CONTROL: u8 = 0x0F;
    pub const ID: u8 = 0x12;
    pub const CDATAL: u8 = 0x14;
}

// ENABLE bits
const PON: u8 = 0x01;
const AEN: u8 = 0x02;

/// Integration time: 256 - 10 cycles = 24 ms.
const ATIME_24MS: u8 = 0xF6;
/// Analog gain 4x.
const GAIN_4X: u8 = 0x01;

/// Raw channel counts.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Rgbc {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub c: u16,
}

/// Error type for `Tcs34725` operations.
#[derive(Debug)]
pub enum Error<E> {
    I2c(E),
    /// ID register did not match a TCS34725 (0x44) or TCS34727 (0x4D).
    UnexpectedId(u8),
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::I2c(e)
    }
}

pub struct Tcs34725<I2C> {
    i2c: I2C,
}

impl<I2C, E> Tcs34725<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    /// Check the ID, power up and start continuous RGBC conversion.
    pub fn new(mut i2c: I2C) -> Result<Self, Error<E>> {
        let mut id = [0u8; 1];
        i2c.write_read(ADDRESS, &[reg::COMMAND | reg::ID], &mut id)?;
        if id[0] != 0x44 && id[0] != 0x4D {
            return Err(Error::UnexpectedId(id[0]));
        }

        i2c.write(ADDRESS, &[reg::COMMAND | reg::ATIME, ATIME_24MS])?;
        i2c.write(ADDRESS, &[reg::COMMAND | reg::CONTROL, GAIN_4X])?;
        i2c.write(ADDRESS, &[reg::COMMAND | reg::ENABLE, PON | AEN])?;

        Ok(Self { i2c })
    }

    /// Read the latest clear/red/green/blue counts in one burst.
    pub fn read_rgbc(&mut self) -> Result<Rgbc, E> {
        let mut buf = [0u8; 8];
        self.i2c.write_read(
            ADDRESS,
            &[reg::COMMAND | reg::AUTO_INCREMENT | reg::CDATAL],
            &mut buf,
        )?;
        let word = |i: usize| u16::from_le_bytes([buf[i], buf[i + 1]]);
        Ok(Rgbc {
            c: word(0),
            r: word(2),
            g: word(4),
            b: word(6),
        })
    }

    /// Classified reading. Bus errors read as [`Reading::Other`].
    pub fn reading(&mut self) -> Reading {
        self.read_rgbc().map_or(Reading::Other, classify)
    }

    pub fn free(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> BlockSensor for Tcs34725<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    fn block_colour(&mut self) -> Reading {
        self.reading()
    }
}

/// Below this clear count nothing is in front of the sensor.
const MIN_CLEAR: u16 = 40;
/// A channel dominates when its share of R+G+B exceeds this (per mille).
const DOMINANT: u32 = 450;
/// Yellow: red and green both above this share, blue below `YELLOW_MAX_BLUE`.
const YELLOW_MIN_RG: u32 = 350;
const YELLOW_MAX_BLUE: u32 = 200;

/// Map raw counts to a colour class.
pub fn classify(raw: Rgbc) -> Reading {
    if raw.c < MIN_CLEAR {
        return Reading::Other;
    }
    let sum = raw.r as u32 + raw.g as u32 + raw.b as u32;
    if sum == 0 {
        return Reading::Other;
    }
    let share = |v: u16| v as u32 * 1000 / sum;
    let (r, g, b) = (share(raw.r), share(raw.g), share(raw.b));

    if r >= YELLOW_MIN_RG && g >= YELLOW_MIN_RG && b < YELLOW_MAX_BLUE {
        Reading::Colour(Colour::Yellow)
    } else if r > DOMINANT {
        Reading::Colour(Colour::Red)
    } else if g > DOMINANT {
        Reading::Colour(Colour::Green)
    } else if b > DOMINANT {
        Reading::Colour(Colour::Blue)
    } else {
        Reading::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgbc(r: u16, g: u16, b: u16) -> Rgbc {
        Rgbc {
            r,
            g,
            b,
            c: r + g + b,
        }
    }

    #[test]
    fn classifies_primary_colours() {
        assert_eq!(classify(rgbc(900, 200, 150)), Reading::Colour(Colour::Red));
        assert_eq!(classify(rgbc(150, 700, 200)), Reading::Colour(Colour::Green));
        assert_eq!(classify(rgbc(100, 250, 800)), Reading::Colour(Colour::Blue));
    }

    #[test]
    fn classifies_yellow_tape() {
        assert_eq!(classify(rgbc(800, 700, 150)), Reading::Colour(Colour::Yellow));
    }

    #[test]
    fn grey_floor_and_darkness_are_other() {
        assert_eq!(classify(rgbc(300, 320, 310)), Reading::Other);
        assert_eq!(classify(rgbc(5, 5, 5)), Reading::Other);
    }

    struct FakeBus {
        regs: [u8; 0x20],
    }

    impl Write for FakeBus {
        type Error = ();
        fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), ()> {
            assert_eq!(addr, ADDRESS);
            let r = (bytes[0] & 0x1F) as usize;
            self.regs[r] = bytes[1];
            Ok(())
        }
    }

    impl WriteRead for FakeBus {
        type Error = ();
        fn write_read(&mut self, addr: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), ()> {
            assert_eq!(addr, ADDRESS);
            let r = (bytes[0] & 0x1F) as usize;
            buffer.copy_from_slice(&self.regs[r..r + buffer.len()]);
            Ok(())
        }
    }

    #[test]
    fn init_and_burst_read() {
        let mut regs = [0u8; 0x20];
        regs[reg::ID as usize] = 0x44;
        // C = 1000, R = 800, G = 100, B = 100
        regs[0x14..0x1C].copy_from_slice(&[0xE8, 0x03, 0x20, 0x03, 0x64, 0x00, 0x64, 0x00]);
        let mut sensor = Tcs34725::new(FakeBus { regs }).unwrap();
        assert_eq!(
            sensor.read_rgbc().unwrap(),
            Rgbc {
                r: 800,
                g: 100,
                b: 100,
                c: 1000
            }
        );
        assert_eq!(sensor.reading(), Reading::Colour(Colour::Red));
        assert_eq!(sensor.block_colour(), Reading::Colour(Colour::Red));
        let bus = sensor.free();
        assert_eq!(bus.regs[reg::ENABLE as usize], PON | AEN);
    }

    #[test]
    fn rejects_wrong_id() {
        let bus = FakeBus { regs: [0u8; 0x20] };
        assert!(matches!(
            Tcs34725::new(bus),
            Err(Error::UnexpectedId(0))
        ));
    }
}
