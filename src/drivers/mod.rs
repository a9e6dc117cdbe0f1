// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! control code. They are written against `embedded-hal` traits, so they build and test on the
//! host.
//!
//! ## Existing drivers
//!
//! - [`buttons`] – three-button operator panel on GPIO inputs
//! - [`hbridge`] – DRV8873 H-bridge in PWM (IN1/IN2) mode
//! - [`tcs34725`] – ams TCS34725 I²C colour sensor with colour-class thresholds
//! - [`hcsr04`] – HC-SR04 ultrasonic ranger
//! - [`mpu6050`] – InvenSense MPU-6050 gyro, yaw rate integrated to a heading

pub mod buttons;
pub mod hbridge;
pub mod hcsr04;
pub mod mpu6050;
pub mod tcs34725;

pub use buttons::Buttons;
pub use hbridge::HBridge;
pub use hcsr04::Hcsr04;
pub use mpu6050::Mpu6050;
pub use tcs34725::Tcs34725;

/// Whether an asserted pin reads high or low on the board wiring.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActiveLevel {
    High,
    Low,
}

/// Free-running microsecond timebase. Wraps; compare with `wrapping_sub`.
pub trait Micros {
    fn now_us(&mut self) -> u32;
}
