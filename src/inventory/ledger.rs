// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Shelf occupancy and transfer counters.
//!
//! Counter layout, fixed because the report reads it positionally:
//!
//! | Index | Counter |
//! | ----- | ------- |
//! | 0 | overflow drops |
//! | 1..=3 | stored Red, Green, Blue |
//! | 4..=6 | shipped Red, Green, Blue |

use crate::colour::{Colour, ShelfSlot};

/// Number of transfer counters.
pub const COUNTERS: usize = 7;

/// What happened to a block.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TransferKind {
    Overflow,
    Stored,
    Shipped,
}

/// Inventory state owned by the mission orchestrator.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InventoryLedger {
    occupied: [bool; ShelfSlot::COUNT],
    counters: [u32; COUNTERS],
}

impl InventoryLedger {
    const OVERFLOW: usize = 0;
    const STORED: usize = 1;
    const SHIPPED: usize = 4;

    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn occupied(&self) -> &[bool; ShelfSlot::COUNT] {
        &self.occupied
    }

    #[inline]
    pub fn is_occupied(&self, slot: ShelfSlot) -> bool {
        self.occupied[slot.index()]
    }

    pub fn set_occupied(&mut self, slot: ShelfSlot, occupied: bool) {
        self.occupied[slot.index()] = occupied;
    }

    /// Raw counters in report order.
    #[inline]
    pub fn counters(&self) -> &[u32; COUNTERS] {
        &self.counters
    }

    /// Count one transfer. Overflow ignores the colour.
    ///
    /// Yellow is not a block colour; a Stored/Shipped transfer of Yellow counts nothing.
    pub fn record_transfer(&mut self, colour: Colour, kind: TransferKind) {
        let index = match kind {
            TransferKind::Overflow => Some(Self::OVERFLOW),
            TransferKind::Stored => Self::colour_offset(colour).map(|o| Self::STORED + o),
            TransferKind::Shipped => Self::colour_offset(colour).map(|o| Self::SHIPPED + o),
        };
        if let Some(i) = index {
            self.counters[i] = self.counters[i].saturating_add(1);
        }
    }

    pub fn overflow(&self) -> u32 {
        self.counters[Self::OVERFLOW]
    }

    pub fn stored(&self, colour: Colour) -> u32 {
        Self::colour_offset(colour).map_or(0, |o| self.counters[Self::STORED + o])
    }

    pub fn shipped(&self, colour: Colour) -> u32 {
        Self::colour_offset(colour).map_or(0, |o| self.counters[Self::SHIPPED + o])
    }

    fn colour_offset(colour: Colour) -> Option<usize> {
        match colour {
            Colour::Red => Some(0),
            Colour::Green => Some(1),
            Colour::Blue => Some(2),
            Colour::Yellow => None,
        }
    }
}
