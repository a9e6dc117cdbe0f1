// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Mission choreographies.
//!
//! Every mission is a fixed sequence of motion primitives and forklift routines between named
//! places on the floor: the garage, the receiving station, the overflow drop, the shelf lanes and
//! the shipping lanes. Lanes are found by line-following to a coloured tape, using the block
//! colour (or zone code) as the tape colour; yellow tape marks the boundary between the receiving
//! side and the lanes.
//!
//! Outbound and return routes are not mirror images. The return legs add short straight jogs to
//! make up for the lane offset, and turn the other way round where that lands the robot on the
//! right side of the boundary tape.
//!
//! The orchestrator is the only owner of the [`InventoryLedger`] and the heading reference.

use core::fmt::{self, Write};

use crate::chassis::Chassis;
use crate::colour::{Colour, ShelfSlot, Zone};
use crate::config::Calibration;
use crate::control::{Robot, Travel};
use crate::inventory::{InventoryLedger, TransferKind};
use crate::report;

pub struct Orchestrator<C, W> {
    robot: Robot<C>,
    ledger: InventoryLedger,
    /// Intended absolute heading in degrees. Every turn is computed from here.
    heading: i32,
    console: W,
}

impl<C: Chassis, W: Write> Orchestrator<C, W> {
    pub fn new(chassis: C, cal: Calibration, console: W) -> Self {
        Self {
            robot: Robot::new(chassis, cal),
            ledger: InventoryLedger::new(),
            heading: 0,
            console,
        }
    }

    #[inline]
    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    #[inline]
    pub fn heading(&self) -> i32 {
        self.heading
    }

    #[inline]
    pub fn robot(&mut self) -> &mut Robot<C> {
        &mut self.robot
    }

    #[inline]
    pub fn console(&mut self) -> &mut W {
        &mut self.console
    }

    pub fn calibration(&self) -> &Calibration {
        self.robot.calibration()
    }

    /// Print the final report for the current ledger to the console.
    pub fn write_report(&mut self) -> fmt::Result {
        report::write_report(&mut self.console, &self.ledger)
    }

    /// Tear down and return the hardware, console and final ledger.
    pub fn free(self) -> (C, W, InventoryLedger) {
        (self.robot.free(), self.console, self.ledger)
    }

    /// Leave the garage and park facing the receiving station.
    pub fn startup(&mut self) {
        let _ = write!(self.console, "startup\r\n");
        let cal = *self.robot.calibration();
        let speed = cal.drive_speed;

        self.robot.drive_distance(cal.garage_run_cm, speed);
        self.robot.turn_to_angle(-90, speed, &mut self.heading);
        self.robot
            .approach_by_range(cal.startup_range, Travel::Forward, speed);
    }

    /// Back away from the receiving station and reverse into the garage.
    pub fn shutdown(&mut self) {
        let _ = write!(self.console, "shutdown\r\n");
        let cal = *self.robot.calibration();
        let speed = cal.drive_speed;

        self.robot
            .approach_by_range(cal.shutdown_range, Travel::Reverse, speed);
        self.robot.turn_to_angle(90, speed, &mut self.heading);
        self.robot.drive_distance(-cal.garage_run_cm, speed);
    }

    /// Take the block waiting at the receiving station to `shelf`, or to the overflow drop when
    /// the allocator found no empty slot, and come back.
    pub fn store_block(&mut self, shelf: Option<ShelfSlot>, colour: Colour) {
        match shelf {
            None => self.store_overflow(colour),
            Some(slot) => self.store_on_shelf(slot, colour),
        }
    }

    fn store_overflow(&mut self, colour: Colour) {
        let _ = write!(self.console, "overflow: {:?}\r\n", colour);
        let cal = *self.robot.calibration();
        let speed = cal.drive_speed;

        // The overflow drop sits straight behind the receiving station.
        self.robot
            .approach_by_range(cal.retreat_range, Travel::Reverse, speed);
        self.robot.turn_to_angle(180, speed, &mut self.heading);
        self.robot
            .approach_by_range(cal.approach_range, Travel::Forward, speed);

        self.robot.put_block(None);
        self.ledger.record_transfer(colour, TransferKind::Overflow);

        self.robot
            .approach_by_range(cal.retreat_range, Travel::Reverse, speed);
        self.robot.turn_to_angle(-180, speed, &mut self.heading);
        self.robot
            .approach_by_range(cal.approach_range, Travel::Forward, speed);
    }

    fn store_on_shelf(&mut self, slot: ShelfSlot, colour: Colour) {
        let _ = write!(self.console, "store: shelf {} ({:?})\r\n", slot, colour);
        let cal = *self.robot.calibration();

        self.go_to_shelf_lane(colour);
        self.robot.put_block(Some(slot));
        self.ledger.set_occupied(slot, true);
        self.ledger.record_transfer(colour, TransferKind::Stored);

        self.return_from_shelf(cal.store_return_jog_cm);
    }

    /// Fetch the block from `shelf`, drop it at the shipping lane for `zone`, and come back.
    pub fn ship_block(&mut self, shelf: ShelfSlot, zone: Zone, colour: Colour) {
        let _ = write!(
            self.console,
            "ship: shelf {} -> zone {:?} ({:?})\r\n",
            shelf, zone, colour
        );
        let cal = *self.robot.calibration();
        let speed = cal.drive_speed;

        self.go_to_shelf_lane(colour);
        self.robot.take_block(shelf);
        self.ledger.set_occupied(shelf, false);
        self.robot
            .approach_by_range(cal.retreat_range, Travel::Reverse, speed);

        // Cross to the shipping side.
        self.robot.turn_to_angle(180, speed, &mut self.heading);
        self.robot.follow_line_until(Colour::Yellow);
        self.robot.drive_distance(cal.ship_outbound_jog_cm, speed);
        self.robot.turn_to_angle(-90, speed, &mut self.heading);
        self.robot.follow_line_until(Colour::Yellow);
        self.robot.turn_to_angle(180, speed, &mut self.heading);

        // Zone lane and drop.
        self.robot.follow_line_until(zone);
        self.robot.turn_to_angle(-90, speed, &mut self.heading);
        self.robot
            .approach_by_range(cal.approach_range, Travel::Forward, speed);
        self.robot.put_block(None);
        self.ledger.record_transfer(colour, TransferKind::Shipped);
        self.robot
            .approach_by_range(cal.retreat_range, Travel::Reverse, speed);

        // Back to receiving.
        self.robot.turn_to_angle(-180, speed, &mut self.heading);
        self.robot.follow_line_until(Colour::Yellow);
        self.robot.drive_distance(cal.ship_return_jog_cm, speed);
        self.robot.turn_to_angle(-90, speed, &mut self.heading);
        self.robot.follow_line_until(Colour::Yellow);
        self.robot.turn_to_angle(90, speed, &mut self.heading);
        self.robot
            .approach_by_range(cal.approach_range, Travel::Forward, speed);
    }

    /// Receiving station to the front of the shelf pair for `lane`.
    fn go_to_shelf_lane(&mut self, lane: Colour) {
        let cal = *self.robot.calibration();
        let speed = cal.drive_speed;

        self.robot
            .approach_by_range(cal.retreat_range, Travel::Reverse, speed);
        self.robot.turn_to_angle(180, speed, &mut self.heading);
        self.robot.follow_line_until(Colour::Yellow);
        self.robot.turn_to_angle(-90, speed, &mut self.heading);
        self.robot.follow_line_until(lane);
        self.robot.turn_to_angle(-90, speed, &mut self.heading);
        self.robot
            .approach_by_range(cal.approach_range, Travel::Forward, speed);
    }

    /// Shelf front back to the receiving station. `jog_cm` clears the lane offset past the
    /// boundary tape before turning.
    fn return_from_shelf(&mut self, jog_cm: f32) {
        let cal = *self.robot.calibration();
        let speed = cal.drive_speed;

        self.robot
            .approach_by_range(cal.retreat_range, Travel::Reverse, speed);
        self.robot.turn_to_angle(180, speed, &mut self.heading);
        self.robot.follow_line_until(Colour::Yellow);
        self.robot.drive_distance(jog_cm, speed);
        self.robot.turn_to_angle(90, speed, &mut self.heading);
        self.robot.follow_line_until(Colour::Yellow);
        self.robot.turn_to_angle(90, speed, &mut self.heading);
        self.robot
            .approach_by_range(cal.approach_range, Travel::Forward, speed);
    }
}
