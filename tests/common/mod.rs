// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Simulated robot for the integration tests.
//!
//! One shared [`World`] advances a millisecond clock. Every sensor read moves time forward by
//! 1 ms and every delay by its length, and the motors integrate their commanded power over that
//! time. The floor is modelled just well enough for every primitive to terminate:
//!
//! - the range finder sees a wall `WALL_CM` ahead after every turn and closes on it while driving;
//! - the line sensor crosses a repeating tape pattern (Yellow, Red, Green, Blue) at fixed spacing
//!   measured from the last turn;
//! - the lift has a hard floor.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::serial::Read;

use forklift::colour::{Colour, Reading};
use forklift::config::Calibration;
use forklift::{BlockSensor, Button, Clock, Drivetrain, Lift, Panel, Sensors};

/// Wheel ticks per ms per percent of power.
const TICKS_PER_MS_PER_POWER: f64 = 0.05;
/// Degrees per ms per percent of differential power.
const DEG_PER_MS_PER_POWER: f64 = 0.01;
/// Lift ticks per ms per percent of power.
const LIFT_TICKS_PER_MS_PER_POWER: f64 = 0.05;
/// Range to the wall after each turn.
pub const WALL_CM: f64 = 50.0;
/// Width of one tape band on the floor, in wheel ticks.
const TAPE_TICKS: f64 = 40.0;
const TAPES: [Reading; 5] = [
    Reading::Other,
    Reading::Colour(Colour::Yellow),
    Reading::Colour(Colour::Red),
    Reading::Colour(Colour::Green),
    Reading::Colour(Colour::Blue),
];

#[derive(Default)]
pub struct World {
    pub now_us: u64,

    pub left: i32,
    pub right: i32,
    wheel_pos: f64,
    wheel_zero: f64,
    heading: f64,
    range_cm: f64,
    travel_since_turn: f64,

    pub lift_power: i32,
    lift_pos: f64,
    lift_zero: f64,

    /// Range reads that return no echo before the next valid one.
    pub range_dropouts: u32,
    /// Blocks arriving at the receiving station: (due ms, colour).
    pub arrivals: VecDeque<(u32, Colour)>,
    /// Button presses: (start ms, button, hold ms).
    pub presses: VecDeque<(u32, Button, u32)>,
    /// Host link bytes: (due ms, byte).
    pub link_rx: VecDeque<(u32, u8)>,

    pub drive_commands: u32,
    pub wheel_reads: u32,
    pub heading_reads: u32,
    pub range_reads: u32,
    pub line_reads: u32,
    pub delays: u32,
    /// Highest lift encoder value handed out.
    pub lift_peak: i32,
    /// Delays spent with the lift powered: (power, ms).
    pub lift_pulses: Vec<(i32, u32)>,
}

impl World {
    pub fn now_ms(&self) -> u32 {
        (self.now_us / 1_000) as u32
    }

    fn step(&mut self, ms: u32) {
        let ms_f = ms as f64;
        let forward = (self.left + self.right) as f64 / 2.0;
        let spin = (self.left - self.right) as f64 / 2.0;

        let ticks = forward * TICKS_PER_MS_PER_POWER * ms_f;
        self.wheel_pos += self.left as f64 * TICKS_PER_MS_PER_POWER * ms_f;

        if spin != 0.0 {
            self.heading += spin * DEG_PER_MS_PER_POWER * ms_f;
            self.range_cm = WALL_CM;
            self.travel_since_turn = 0.0;
        } else {
            self.range_cm -= ticks * Calibration::DEFAULT.cm_per_tick as f64;
            self.travel_since_turn += ticks;
        }

        self.lift_pos = (self.lift_pos
            + self.lift_power as f64 * LIFT_TICKS_PER_MS_PER_POWER * ms_f)
            .max(0.0);

        self.now_us += ms as u64 * 1_000;
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Current range to the wall, without taking a reading.
    pub fn range(&self) -> f64 {
        self.range_cm
    }

    /// Wheel ticks since the last reset, without taking a reading.
    pub fn ticks(&self) -> i32 {
        (self.wheel_pos - self.wheel_zero).round() as i32
    }

    /// Tape under the line sensor.
    pub fn tape(&self) -> Reading {
        let band = (self.travel_since_turn.max(0.0) / TAPE_TICKS) as usize;
        TAPES[band % TAPES.len()]
    }

    pub fn lift_height(&self) -> f64 {
        self.lift_pos
    }

    pub fn is_stopped(&self) -> bool {
        self.left == 0 && self.right == 0 && self.lift_power == 0
    }

    /// Queue a shipping request over the host link, due at `at_ms`.
    pub fn send_link(&mut self, at_ms: u32, bytes: &[u8]) {
        self.link_rx.extend(bytes.iter().map(|&b| (at_ms, b)));
    }
}

pub type Sim = Rc<RefCell<World>>;

pub fn world() -> Sim {
    let w = World {
        range_cm: WALL_CM,
        ..World::default()
    };
    Rc::new(RefCell::new(w))
}

pub struct SimChassis(pub Sim);

impl Drivetrain for SimChassis {
    fn drive(&mut self, left: i32, right: i32) {
        let mut w = self.0.borrow_mut();
        w.left = left;
        w.right = right;
        w.drive_commands += 1;
    }

    fn wheel_ticks(&mut self) -> i32 {
        let mut w = self.0.borrow_mut();
        w.step(1);
        w.wheel_reads += 1;
        (w.wheel_pos - w.wheel_zero).round() as i32
    }

    fn reset_wheel_ticks(&mut self) {
        let mut w = self.0.borrow_mut();
        w.wheel_zero = w.wheel_pos;
    }
}

impl Lift for SimChassis {
    fn set_lift_power(&mut self, power: i32) {
        self.0.borrow_mut().lift_power = power;
    }

    fn lift_ticks(&mut self) -> i32 {
        let mut w = self.0.borrow_mut();
        w.step(1);
        let ticks = (w.lift_pos - w.lift_zero).round() as i32;
        w.lift_peak = w.lift_peak.max(ticks);
        ticks
    }

    fn reset_lift_ticks(&mut self) {
        let mut w = self.0.borrow_mut();
        w.lift_zero = w.lift_pos;
    }
}

impl Sensors for SimChassis {
    fn heading_deg(&mut self) -> i32 {
        let mut w = self.0.borrow_mut();
        w.step(1);
        w.heading_reads += 1;
        w.heading.round() as i32
    }

    fn range_cm(&mut self) -> u16 {
        let mut w = self.0.borrow_mut();
        w.step(1);
        w.range_reads += 1;
        if w.range_dropouts > 0 {
            w.range_dropouts -= 1;
            return 0;
        }
        w.range_cm.round().clamp(1.0, 400.0) as u16
    }

    fn line_colour(&mut self) -> Reading {
        let mut w = self.0.borrow_mut();
        w.step(1);
        w.line_reads += 1;
        w.tape()
    }
}

impl DelayMs<u32> for SimChassis {
    fn delay_ms(&mut self, ms: u32) {
        let mut w = self.0.borrow_mut();
        w.delays += 1;
        if w.lift_power != 0 {
            let power = w.lift_power;
            w.lift_pulses.push((power, ms));
        }
        w.step(ms);
    }
}

/// Block sensor at the receiving station. A due block is seen once, then it is on the forks.
pub struct SimBlockSensor(pub Sim);

impl BlockSensor for SimBlockSensor {
    fn block_colour(&mut self) -> Reading {
        let mut w = self.0.borrow_mut();
        w.step(1);
        let now = w.now_ms();
        match w.arrivals.front() {
            Some(&(due, colour)) if due <= now => {
                w.arrivals.pop_front();
                Reading::Colour(colour)
            }
            _ => Reading::Other,
        }
    }
}

pub struct SimPanel(pub Sim);

impl Panel for SimPanel {
    fn is_pressed(&mut self, button: Button) -> bool {
        let mut w = self.0.borrow_mut();
        w.step(1);
        let now = w.now_ms();
        while let Some(&(start, _, hold)) = w.presses.front() {
            if now >= start + hold {
                w.presses.pop_front();
            } else {
                break;
            }
        }
        match w.presses.front() {
            Some(&(start, held, _)) if now >= start => button == Button::Any || button == held,
            _ => false,
        }
    }
}

pub struct SimClock(pub Sim);

impl Clock for SimClock {
    fn now_ms(&mut self) -> u32 {
        self.0.borrow().now_ms()
    }
}

pub struct SimLink(pub Sim);

impl Read<u8> for SimLink {
    type Error = ();

    fn read(&mut self) -> nb::Result<u8, ()> {
        let mut w = self.0.borrow_mut();
        let now = w.now_ms();
        match w.link_rx.front() {
            Some(&(due, byte)) if due <= now => {
                w.link_rx.pop_front();
                Ok(byte)
            }
            _ => Err(nb::Error::WouldBlock),
        }
    }
}
