// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pick and place routines for the shelf rack.
//!
//! Both routines home the lift on its encoder, raise it to a row-specific height, slide the forks
//! under the shelf on the drivetrain encoder, then move the block with a timed lift pulse. The
//! pulses are open-loop: the range sensor that used to find the shelf surface was too noisy, so
//! pulse lengths are part of the calibration table instead.
//!
//! Heights differ between `take` and `put` for the same row because placing comes down onto the
//! shelf from above while picking lifts from below.

use core::hint::spin_loop;

use crate::chassis::Chassis;
use crate::colour::{Row, ShelfSlot};
use crate::control::Robot;

impl<C: Chassis> Robot<C> {
    /// Pick the block off `shelf` and back away from the rack.
    pub fn take_block(&mut self, shelf: ShelfSlot) {
        let row = shelf.row();
        let cal = self.cal;

        self.home_lift();
        self.raise_lift(cal.take_height_ticks(row));
        self.insert_forks();

        self.lift_pulse(cal.take_pulse_power, cal.take_pulse_ms);

        self.withdraw_forks();
        self.drive_distance(cal.retreat_cm, cal.drive_speed);
        self.lower_to_carry(row);
    }

    /// Set the carried block down on `shelf` and back away.
    ///
    /// `None` is the overflow drop point (and the shipping zones), which sits at bottom-row
    /// height.
    pub fn put_block(&mut self, shelf: Option<ShelfSlot>) {
        let row = shelf.unwrap_or(ShelfSlot::OVERFLOW).row();
        let cal = self.cal;

        self.home_lift();
        self.raise_lift(cal.put_height_ticks(row));
        self.insert_forks();

        self.lift_pulse(-cal.put_release_power, cal.put_release_ms(row));
        self.chassis.delay_ms(cal.put_release_pause_ms);

        self.withdraw_forks();
        self.drive_distance(cal.retreat_cm, cal.drive_speed);
        self.lower_to_carry(row);
    }

    /// Lower the lift until its encoder is back at the zero captured by the last raise.
    fn home_lift(&mut self) {
        let power = self.cal.lift_home_power;
        if self.chassis.lift_ticks() > 0 {
            self.chassis.set_lift_power(-power);
            while self.chassis.lift_ticks() > 0 {
                spin_loop();
            }
        }
        self.chassis.set_lift_power(0);
    }

    /// Raise the lift `ticks` above the current (homed) position.
    fn raise_lift(&mut self, ticks: f32) {
        self.chassis.reset_lift_ticks();
        self.chassis.set_lift_power(self.cal.lift_raise_power);
        while (self.chassis.lift_ticks().abs() as f32) < ticks {
            spin_loop();
        }
        self.chassis.set_lift_power(0);
    }

    /// Slide the forks under the shelf on the drivetrain encoder.
    fn insert_forks(&mut self) {
        let depth = self.cal.insert_ticks();
        let speed = self.cal.insert_speed;

        self.chassis.reset_wheel_ticks();
        self.chassis.drive(speed, speed);
        while (self.chassis.wheel_ticks().abs() as f32) < depth {
            spin_loop();
        }
        self.chassis.stop();
    }

    /// Back out until the drivetrain encoder returns to where insertion started.
    fn withdraw_forks(&mut self) {
        let speed = self.cal.insert_speed;
        self.chassis.drive(-speed, -speed);
        while self.chassis.wheel_ticks() > 0 {
            spin_loop();
        }
        self.chassis.stop();
    }

    /// Run the lift at `power` for a fixed time.
    fn lift_pulse(&mut self, power: i32, ms: u32) {
        self.chassis.set_lift_power(power);
        self.chassis.delay_ms(ms);
        self.chassis.set_lift_power(0);
    }

    /// Timed descent back to carrying height once clear of the rack.
    fn lower_to_carry(&mut self, row: Row) {
        let cal = self.cal;
        self.lift_pulse(-cal.lower_power, cal.lower_ms(row));
        self.lift_pulse(-cal.lower_trim_power, cal.lower_trim_ms);
    }
}
