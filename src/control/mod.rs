// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Motion Control
//!
//! Closed-loop building blocks that turn relative sensor feedback into deterministic moves.
//!
//! Every routine here is synchronous: it commands the motors, spin-polls a feedback source until
//! its own stop condition holds, stops, and returns. There are no internal timeouts. A robot that
//! is physically stuck never returns from the call.
//!
//! ## Modules
//!
//! - [`motion`] - Distance, turn, range-approach and line-following primitives.
//! - [`forklift`] - Pick and place routines for the shelf rack.

pub mod forklift;
pub mod motion;

pub use motion::Travel;

use crate::chassis::Chassis;
use crate::config::Calibration;

/// Chassis plus its calibration. Owns the hardware for the lifetime of the program.
pub struct Robot<C> {
    chassis: C,
    cal: Calibration,
}

impl<C: Chassis> Robot<C> {
    pub fn new(chassis: C, cal: Calibration) -> Self {
        Self { chassis, cal }
    }

    #[inline]
    pub fn calibration(&self) -> &Calibration {
        &self.cal
    }

    /// Direct access to the underlying hardware.
    #[inline]
    pub fn chassis(&mut self) -> &mut C {
        &mut self.chassis
    }

    /// Tear down and return the hardware.
    pub fn free(self) -> C {
        self.chassis
    }
}
