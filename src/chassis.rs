// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Traits at the sensor/actuator boundary.
//!
//! Board code (see `hw`) implements these on real peripherals; the host tests implement them on a
//! simulated chassis. Sign conventions are fixed here so the control code never has to care how
//! a motor is mounted:
//!
//! - positive drive power moves the robot forward and increases wheel ticks;
//! - positive lift power raises the forks and increases lift ticks;
//! - heading grows clockwise.

use embedded_hal::blocking::delay::DelayMs;

use crate::colour::Reading;

/// Differential drivetrain with an encoder on the reference (left) wheel.
pub trait Drivetrain {
    /// Command both wheels. Power is a signed percentage in [-100, 100].
    fn drive(&mut self, left: i32, right: i32);

    /// Reference wheel position in encoder ticks since the last reset.
    fn wheel_ticks(&mut self) -> i32;

    fn reset_wheel_ticks(&mut self);

    #[inline]
    fn stop(&mut self) {
        self.drive(0, 0);
    }
}

/// Vertical forklift motor with its own encoder.
pub trait Lift {
    /// Signed percentage in [-100, 100]; positive raises.
    fn set_lift_power(&mut self, power: i32);

    fn lift_ticks(&mut self) -> i32;

    fn reset_lift_ticks(&mut self);
}

/// Feedback used by the motion primitives.
pub trait Sensors {
    /// Accumulated gyro angle in degrees, zeroed once at boot.
    fn heading_deg(&mut self) -> i32;

    /// Forward range in centimetres. `0` means the sensor has no valid echo yet.
    fn range_cm(&mut self) -> u16;

    /// Downward line sensor.
    fn line_colour(&mut self) -> Reading;
}

/// Everything the motion primitives and forklift routines drive.
pub trait Chassis: Drivetrain + Lift + Sensors + DelayMs<u32> {}

impl<T> Chassis for T where T: Drivetrain + Lift + Sensors + DelayMs<u32> {}

/// Forklift-front sensor that sees blocks placed at the receiving station.
pub trait BlockSensor {
    fn block_colour(&mut self) -> Reading;
}

/// Buttons on the operator panel.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Button {
    Left,
    Right,
    Enter,
    /// Any of the above.
    Any,
}

pub trait Panel {
    fn is_pressed(&mut self, button: Button) -> bool;
}

/// Free-running millisecond clock. Wraps; compare with `wrapping_sub`.
pub trait Clock {
    fn now_ms(&mut self) -> u32;
}
