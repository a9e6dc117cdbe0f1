// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Forklift Firmware
//!
//! This crate contains the control program for the block-sorting forklift robot: it receives
//! colour-coded blocks at a receiving station, stores them on a six-slot shelf rack, ships them to
//! operator-selected zones and reports totals when it parks.
//!
//! The library is hardware-agnostic and builds on the host; the `firmware` feature adds the
//! STM32F767 board layer and the `forklift` binary.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`colour`] | Block/line colours, shelf slots and rows |
//! | [`chassis`] | Traits at the sensor/actuator boundary |
//! | [`config`] | Calibration table for the physical robot |
//! | [`control`] | Closed-loop motion primitives and the forklift routines |
//! | [`inventory`] | Shelf allocator and transfer ledger |
//! | [`mission`] | Store, ship, startup and shutdown choreographies |
//! | [`dispatcher`] | Idle-timeout event loop |
//! | [`operator`] | Button panel prompts and shipping selection |
//! | [`protocol`] | Host-link shipping request packets |
//! | [`report`] | Final shipping/storage report |
//! | [`drivers`] | Device-level drivers (H-bridge, TCS34725, HC-SR04, MPU-6050, panel buttons) |
//! | `hw` | MCU-level wrappers (encoders, timers, USART); `firmware` only |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features firmware --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod chassis;
pub mod colour;
pub mod config;
pub mod control;
pub mod dispatcher;
pub mod drivers;
pub mod error;
pub mod inventory;
pub mod mission;
pub mod operator;
pub mod protocol;
pub mod report;

#[cfg(feature = "firmware")]
pub mod hw;

pub use chassis::{BlockSensor, Button, Chassis, Clock, Drivetrain, Lift, Panel, Sensors};
pub use colour::{Colour, Reading, Row, ShelfSlot, Zone};
pub use config::Calibration;
pub use dispatcher::{DispatchState, Dispatcher, IdleTimer};
pub use error::ConfigError;
pub use inventory::{select_shelf, InventoryLedger, TransferKind};
pub use mission::Orchestrator;
pub use report::Report;
