// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Closed-loop motion primitives.
//!
//! Each primitive ends with a fixed settle pause ([`Calibration::settle_ms`]) so the next one
//! starts from rest.
//!
//! [`Calibration::settle_ms`]: crate::config::Calibration::settle_ms

use core::hint::spin_loop;

use crate::chassis::Chassis;
use crate::colour::Colour;
use crate::control::Robot;

/// Direction of travel for [`Robot::approach_by_range`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Travel {
    Forward,
    Reverse,
}

impl Travel {
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Travel::Forward => 1,
            Travel::Reverse => -1,
        }
    }
}

impl<C: Chassis> Robot<C> {
    /// Stop both wheels and wait for the chassis to come to rest.
    pub fn halt(&mut self) {
        self.chassis.stop();
        self.chassis.delay_ms(self.cal.settle_ms);
    }

    /// Drive straight for `cm` centimetres. The sign of `cm` selects the direction.
    ///
    /// A zero distance returns immediately without touching the motors.
    pub fn drive_distance(&mut self, cm: f32, speed: i32) {
        if cm == 0.0 {
            return;
        }
        let direction = if cm < 0.0 { -1 } else { 1 };
        let target = self.chassis.wheel_ticks() as f32 + cm / self.cal.cm_per_tick;

        self.chassis.drive(speed * direction, speed * direction);
        while ((direction * self.chassis.wheel_ticks()) as f32) < direction as f32 * target {
            spin_loop();
        }
        self.halt();
    }

    /// Turn in place by `delta_deg` relative to the intended heading.
    ///
    /// `heading` is the accumulated target angle, not the measured one. It is advanced by
    /// `delta_deg` first, and the turn runs until the gyro reaches the new value. The turn is
    /// done at full `speed` until within the fine-turn window, then at half speed.
    pub fn turn_to_angle(&mut self, delta_deg: i32, speed: i32, heading: &mut i32) {
        *heading += delta_deg;
        let target = *heading;
        let direction = if self.chassis.heading_deg() > target { -1 } else { 1 };

        let coarse_end = target - direction * self.cal.fine_turn_window_deg;
        self.chassis.drive(direction * speed, -direction * speed);
        while direction * self.chassis.heading_deg() < direction * coarse_end {
            spin_loop();
        }

        let fine = speed / 2;
        self.chassis.drive(direction * fine, -direction * fine);
        while direction * self.chassis.heading_deg() < direction * target {
            spin_loop();
        }
        self.halt();
    }

    /// Drive until the forward range reading reaches `target`.
    ///
    /// Forward travel stops once the reading is at or below `target`, reverse travel once it is at
    /// or above. A reading of `0` is a missing echo and never satisfies the stop condition.
    pub fn approach_by_range(&mut self, target: u16, travel: Travel, speed: i32) {
        let sign = travel.sign();
        let target = target as i32;

        self.chassis.drive(speed * sign, speed * sign);
        loop {
            let range = self.chassis.range_cm() as i32;
            if range != 0 && sign * range <= sign * target {
                break;
            }
            spin_loop();
        }
        self.halt();
    }

    /// Creep forward until the line sensor sees `colour`.
    pub fn follow_line_until(&mut self, colour: Colour) {
        let speed = self.cal.line_speed;
        self.chassis.drive(speed, speed);
        while !self.chassis.line_colour().is(colour) {
            self.chassis.delay_ms(self.cal.line_poll_ms);
        }
        self.halt();
    }
}
