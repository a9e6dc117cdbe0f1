// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Calibration table for the physical robot.
//!
//! Every distance, angle, power and duration the control code uses lives here. The defaults are
//! tuned for one concrete chassis and shelf rack; change them together, not one at a time.
//!
//! Units:
//! - powers and speeds: signed motor percentage
//! - ranges: range finder units (cm)
//! - drive distances: cm
//! - lift heights: lift units, converted to ticks with [`Calibration::lift_ticks_per_unit`]
//! - durations: ms

use core::f32::consts::PI;

use crate::colour::Row;
use crate::error::ConfigError;

/// Calibration table. Use [`Calibration::DEFAULT`] unless the rack has been rebuilt.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Calibration {
    // ----- Motion primitives -----
    /// Pause after every primitive so momentum dies down.
    pub settle_ms: u32,
    /// Line sensor poll interval while line-following.
    pub line_poll_ms: u32,
    /// Forward power while line-following.
    pub line_speed: i32,
    /// Default drive/turn/approach power used by the missions.
    pub drive_speed: i32,
    /// Wheel travel per encoder tick (cm).
    pub cm_per_tick: f32,
    /// Coarse-turn phase ends this many degrees before the target.
    pub fine_turn_window_deg: i32,

    // ----- Routes -----
    /// Range at which the robot stops in front of a shelf, zone or the receiving station.
    pub approach_range: u16,
    /// Range the robot backs out to before turning away.
    pub retreat_range: u16,
    /// Garage exit approach range.
    pub startup_range: u16,
    /// Garage return retreat range.
    pub shutdown_range: u16,
    /// Straight run in and out of the garage (cm).
    pub garage_run_cm: f32,
    /// Lane offset jog on the store return route (cm).
    pub store_return_jog_cm: f32,
    /// Lane offset jog on the way to the shipping lanes (cm).
    pub ship_outbound_jog_cm: f32,
    /// Lane offset jog on the ship return route (cm).
    pub ship_return_jog_cm: f32,

    // ----- Forklift -----
    /// Lift encoder ticks per lift unit.
    pub lift_ticks_per_unit: f32,
    pub take_height_bottom: f32,
    pub take_height_top: f32,
    pub put_height_bottom: f32,
    pub put_height_top: f32,
    /// Forward insertion travel under the shelf, in lift units.
    pub insert_depth: f32,
    pub insert_speed: i32,
    pub lift_raise_power: i32,
    pub lift_home_power: i32,
    /// Backward drive after leaving the shelf (cm, negative).
    pub retreat_cm: f32,
    /// Timed raise that picks the block off the shelf.
    pub take_pulse_ms: u32,
    pub take_pulse_power: i32,
    /// Timed lowering that sets the block down.
    pub put_release_bottom_ms: u32,
    pub put_release_top_ms: u32,
    pub put_release_power: i32,
    pub put_release_pause_ms: u32,
    /// Timed lowering after the retreat, back to the carrying position.
    pub lower_bottom_ms: u32,
    pub lower_top_ms: u32,
    pub lower_power: i32,
    pub lower_trim_ms: u32,
    pub lower_trim_power: i32,

    // ----- Dispatcher -----
    pub poll_ms: u32,
    /// Shut down after this long without a block or shipping request.
    pub idle_timeout_ms: u32,
}

impl Calibration {
    pub const DEFAULT: Calibration = Calibration {
        settle_ms: 250,
        line_poll_ms: 25,
        line_speed: 20,
        drive_speed: 20,
        cm_per_tick: (4.0 * PI) / 180.0,
        fine_turn_window_deg: 45,

        approach_range: 35,
        retreat_range: 40,
        startup_range: 35,
        shutdown_range: 60,
        garage_run_cm: 50.0,
        store_return_jog_cm: 25.0,
        ship_outbound_jog_cm: 30.0,
        ship_return_jog_cm: -10.0,

        lift_ticks_per_unit: 18.7,
        take_height_bottom: 2.5,
        take_height_top: 15.5,
        put_height_bottom: 3.0,
        put_height_top: 18.0,
        insert_depth: 8.0,
        insert_speed: 10,
        lift_raise_power: 40,
        lift_home_power: 20,
        retreat_cm: -3.0,
        take_pulse_ms: 400,
        take_pulse_power: 20,
        put_release_bottom_ms: 1000,
        put_release_top_ms: 200,
        put_release_power: 30,
        put_release_pause_ms: 500,
        lower_bottom_ms: 1000,
        lower_top_ms: 3000,
        lower_power: 20,
        lower_trim_ms: 300,
        lower_trim_power: 10,

        poll_ms: 100,
        idle_timeout_ms: 30_000,
    };

    /// Lift target in ticks for picking a block off `row`.
    #[inline]
    pub fn take_height_ticks(&self, row: Row) -> f32 {
        self.lift_ticks_per_unit
            * match row {
                Row::Bottom => self.take_height_bottom,
                Row::Top => self.take_height_top,
            }
    }

    /// Lift target in ticks for placing a block onto `row`.
    #[inline]
    pub fn put_height_ticks(&self, row: Row) -> f32 {
        self.lift_ticks_per_unit
            * match row {
                Row::Bottom => self.put_height_bottom,
                Row::Top => self.put_height_top,
            }
    }

    #[inline]
    pub fn insert_ticks(&self) -> f32 {
        self.lift_ticks_per_unit * self.insert_depth
    }

    pub fn put_release_ms(&self, row: Row) -> u32 {
        match row {
            Row::Bottom => self.put_release_bottom_ms,
            Row::Top => self.put_release_top_ms,
        }
    }

    pub fn lower_ms(&self, row: Row) -> u32 {
        match row {
            Row::Bottom => self.lower_bottom_ms,
            Row::Top => self.lower_top_ms,
        }
    }

    /// Check the table for values that would stall or reverse a primitive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let powers = [
            ("line_speed", self.line_speed),
            ("drive_speed", self.drive_speed),
            ("insert_speed", self.insert_speed),
            ("lift_raise_power", self.lift_raise_power),
            ("lift_home_power", self.lift_home_power),
            ("take_pulse_power", self.take_pulse_power),
            ("put_release_power", self.put_release_power),
            ("lower_power", self.lower_power),
            ("lower_trim_power", self.lower_trim_power),
        ];
        for (name, value) in powers {
            if !(1..=100).contains(&value) {
                return Err(ConfigError::InvalidPower { name, value });
            }
        }

        let durations = [
            ("line_poll_ms", self.line_poll_ms),
            ("poll_ms", self.poll_ms),
            ("idle_timeout_ms", self.idle_timeout_ms),
        ];
        for (name, value) in durations {
            if value == 0 {
                return Err(ConfigError::ZeroDuration(name));
            }
        }

        let scales = [
            ("cm_per_tick", self.cm_per_tick),
            ("lift_ticks_per_unit", self.lift_ticks_per_unit),
            ("insert_depth", self.insert_depth),
        ];
        for (name, value) in scales {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidScale { name, value });
            }
        }

        Ok(())
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}
