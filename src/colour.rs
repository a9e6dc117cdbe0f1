// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Colour codes shared by blocks, floor lanes and shipping zones, plus the shelf slot layout.
//!
//! The rack has six slots grouped in colour bands:
//!
//! | Slots | Colour |
//! | ----- | ------ |
//! | 0, 1  | Red    |
//! | 2, 3  | Blue   |
//! | 4, 5  | Green  |
//!
//! Even slots sit on the bottom row, odd slots on the top row.

use core::ops::RangeInclusive;

/// Colour class reported by the colour sensors.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Colour {
    Red,
    Green,
    Blue,
    /// Boundary marker on the floor. Never a block colour.
    Yellow,
}

/// Shipping zones use the same codes as block colours.
pub type Zone = Colour;

impl Colour {
    /// The three colours a block can have.
    pub const STORABLE: [Colour; 3] = [Colour::Red, Colour::Green, Colour::Blue];

    /// True for colours that have a shelf band.
    #[inline]
    pub fn is_storable(self) -> bool {
        !matches!(self, Colour::Yellow)
    }

    /// Shelf indices reserved for this colour, ascending.
    pub fn band(self) -> Option<RangeInclusive<usize>> {
        match self {
            Colour::Red => Some(0..=1),
            Colour::Blue => Some(2..=3),
            Colour::Green => Some(4..=5),
            Colour::Yellow => None,
        }
    }
}

/// Discrete reading of a colour sensor.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Reading {
    Colour(Colour),
    /// Anything that is not one of the known colour classes (floor, no object, ...).
    Other,
}

impl Reading {
    /// The colour of a block in front of the forks, if it is one we can store.
    #[inline]
    pub fn storable(self) -> Option<Colour> {
        match self {
            Reading::Colour(c) if c.is_storable() => Some(c),
            _ => None,
        }
    }

    #[inline]
    pub fn is(self, colour: Colour) -> bool {
        self == Reading::Colour(colour)
    }
}

/// Shelf row. Selects lift heights and pulse lengths in the forklift routines.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Row {
    Bottom,
    Top,
}

/// One of the six storage positions on the rack.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ShelfSlot(u8);

impl ShelfSlot {
    pub const COUNT: usize = 6;

    /// Slot used for the temporary overflow drop and for shipping-zone drops.
    pub const OVERFLOW: ShelfSlot = ShelfSlot(0);

    /// Returns `None` for indices past the end of the rack.
    pub fn new(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn row(self) -> Row {
        if self.0 % 2 == 0 {
            Row::Bottom
        } else {
            Row::Top
        }
    }

    /// Colour band this slot belongs to. Fixed by position.
    pub fn colour(self) -> Colour {
        match self.0 {
            0 | 1 => Colour::Red,
            2 | 3 => Colour::Blue,
            _ => Colour::Green,
        }
    }
}

impl core::fmt::Display for ShelfSlot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
