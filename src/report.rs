// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Final shipping/storage report.
//!
//! Layout (no trailing newline):
//!
//! ```text
//! # Overload: <overflow>
//!
//! # Blocks Shipped:
//! Red: <n>
//! Green: <n>
//! Blue: <n>
//!
//! # Blocks in Storage:
//! Red: <n>
//! Green: <n>
//! Blue: <n>
//! ```

use core::fmt;

use crate::colour::Colour;
use crate::inventory::InventoryLedger;

/// Snapshot of the ledger counters, ready to print.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Report {
    pub overflow: u32,
    /// Red, Green, Blue.
    pub shipped: [u32; 3],
    /// Red, Green, Blue.
    pub stored: [u32; 3],
}

impl Report {
    pub fn from_ledger(ledger: &InventoryLedger) -> Self {
        const ORDER: [Colour; 3] = [Colour::Red, Colour::Green, Colour::Blue];
        Self {
            overflow: ledger.overflow(),
            shipped: ORDER.map(|c| ledger.shipped(c)),
            stored: ORDER.map(|c| ledger.stored(c)),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "# Overload: {}\n\n", self.overflow)?;

        f.write_str("# Blocks Shipped:\n")?;
        write!(
            f,
            "Red: {}\nGreen: {}\nBlue: {}\n\n",
            self.shipped[0], self.shipped[1], self.shipped[2]
        )?;

        f.write_str("# Blocks in Storage:\n")?;
        write!(
            f,
            "Red: {}\nGreen: {}\nBlue: {}",
            self.stored[0], self.stored[1], self.stored[2]
        )
    }
}

/// Write the report for `ledger` to `out`.
pub fn write_report<W: fmt::Write>(out: &mut W, ledger: &InventoryLedger) -> fmt::Result {
    write!(out, "{}", Report::from_ledger(ledger))
}
