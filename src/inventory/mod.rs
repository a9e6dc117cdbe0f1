// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Inventory
//!
//! Shelf occupancy and transfer counters, plus the allocator that picks a slot for a block.
//!
//! ## Modules
//!
//! - [`allocator`] - Pure slot selection within a colour band.
//! - [`ledger`] - Occupancy bits and the seven monotonic transfer counters.

pub mod allocator;
pub mod ledger;

pub use allocator::select_shelf;
pub use ledger::{InventoryLedger, TransferKind};
