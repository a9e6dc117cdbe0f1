// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Top-level event loop.
//!
//! ```text
//! AwaitingStart --(Enter)--> Active --(idle window elapsed)--> ShuttingDown
//! ```
//!
//! While `Active` the dispatcher polls at a fixed cadence for two kinds of qualifying event:
//!
//! - a shipping request (Enter on the panel, or a host-link packet): pick the lowest occupied slot
//!   of the requested colour and ship it. With no such slot the request is dropped.
//! - a storable block at the receiving station: pick the lowest empty slot of its colour and
//!   store it, overflowing when the band is full.
//!
//! Each qualifying event restarts the idle timer once it has been handled. Missions run to
//! completion; the idle timer is only checked between them.

use core::fmt::{self, Write};

use embedded_hal::serial::Read;

use crate::chassis::{BlockSensor, Button, Chassis, Clock, Panel};
use crate::colour::{Colour, Zone};
use crate::inventory::{select_shelf, InventoryLedger};
use crate::mission::Orchestrator;
use crate::operator;
use crate::protocol::{Command, Parser};

/// Dispatcher lifecycle.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DispatchState {
    AwaitingStart,
    Active,
    /// Terminal. The robot is parked and the report has been written.
    ShuttingDown,
}

/// Restartable idle window on a wrapping millisecond clock.
#[derive(Copy, Clone, Debug)]
pub struct IdleTimer {
    start_ms: u32,
    window_ms: u32,
}

impl IdleTimer {
    pub fn new(now_ms: u32, window_ms: u32) -> Self {
        Self {
            start_ms: now_ms,
            window_ms,
        }
    }

    #[inline]
    pub fn reset(&mut self, now_ms: u32) {
        self.start_ms = now_ms;
    }

    #[inline]
    pub fn elapsed(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.start_ms)
    }

    #[inline]
    pub fn expired(&self, now_ms: u32) -> bool {
        self.elapsed(now_ms) >= self.window_ms
    }
}

/// Owns the mission orchestrator and every input the loop polls.
pub struct Dispatcher<C, W, P, B, K, L> {
    orchestrator: Orchestrator<C, W>,
    panel: P,
    block_sensor: B,
    clock: K,
    link: L,
    parser: Parser,
    idle: IdleTimer,
    state: DispatchState,
}

impl<C, W, P, B, K, L> Dispatcher<C, W, P, B, K, L>
where
    C: Chassis,
    W: Write,
    P: Panel,
    B: BlockSensor,
    K: Clock,
    L: Read<u8>,
{
    pub fn new(
        orchestrator: Orchestrator<C, W>,
        panel: P,
        block_sensor: B,
        mut clock: K,
        link: L,
    ) -> Self {
        let window = orchestrator.calibration().idle_timeout_ms;
        let now = clock.now_ms();
        Self {
            orchestrator,
            panel,
            block_sensor,
            clock,
            link,
            parser: Parser::new(),
            idle: IdleTimer::new(now, window),
            state: DispatchState::AwaitingStart,
        }
    }

    #[inline]
    pub fn state(&self) -> DispatchState {
        self.state
    }

    #[inline]
    pub fn ledger(&self) -> &InventoryLedger {
        self.orchestrator.ledger()
    }

    #[inline]
    pub fn orchestrator(&mut self) -> &mut Orchestrator<C, W> {
        &mut self.orchestrator
    }

    /// Run one step of the state machine and return the state it left the dispatcher in.
    ///
    /// - `AwaitingStart`: blocks for the start press, leaves the garage, starts the idle timer.
    /// - `Active`: handles at most one event of each kind, then sleeps one poll interval. Checks
    ///   the idle window first; on expiry parks the robot and writes the report.
    /// - `ShuttingDown`: no-op.
    pub fn poll(&mut self) -> Result<DispatchState, fmt::Error> {
        match self.state {
            DispatchState::AwaitingStart => {
                operator::wait_for_start(&mut self.panel, self.orchestrator.console());
                operator::prompt_idle(self.orchestrator.console());
                self.orchestrator.startup();
                self.idle.reset(self.clock.now_ms());
                self.transition(DispatchState::Active);
            }
            DispatchState::Active => {
                if self.idle.expired(self.clock.now_ms()) {
                    self.transition(DispatchState::ShuttingDown);
                    self.orchestrator.shutdown();
                    self.orchestrator.write_report()?;
                } else {
                    self.tick();
                }
            }
            DispatchState::ShuttingDown => {}
        }
        Ok(self.state)
    }

    /// Poll until the idle window closes. Returns the final ledger.
    pub fn run(&mut self) -> Result<InventoryLedger, fmt::Error> {
        while self.poll()? != DispatchState::ShuttingDown {}
        Ok(self.orchestrator.ledger().clone())
    }

    fn tick(&mut self) {
        if let Some(Command::Ship { colour, zone }) = self.parser.poll(&mut self.link) {
            self.handle_ship_request(colour, zone);
        }

        if self.panel.is_pressed(Button::Enter) {
            let (colour, zone) =
                operator::select_shipping(&mut self.panel, self.orchestrator.console());
            self.handle_ship_request(colour, zone);
        }

        if let Some(colour) = self.block_sensor.block_colour().storable() {
            let shelf = select_shelf(self.orchestrator.ledger().occupied(), false, colour);
            self.orchestrator.store_block(shelf, colour);
            self.idle.reset(self.clock.now_ms());
        }

        let poll_ms = self.orchestrator.calibration().poll_ms;
        self.orchestrator.robot().chassis().delay_ms(poll_ms);
    }

    fn handle_ship_request(&mut self, colour: Colour, zone: Zone) {
        match select_shelf(self.orchestrator.ledger().occupied(), true, colour) {
            Some(shelf) => self.orchestrator.ship_block(shelf, zone, colour),
            None => {
                let _ = write!(
                    self.orchestrator.console(),
                    "ship: no {:?} block in storage\r\n",
                    colour
                );
            }
        }
        self.idle.reset(self.clock.now_ms());
    }

    fn transition(&mut self, next: DispatchState) {
        let _ = write!(
            self.orchestrator.console(),
            "state: {:?} -> {:?}\r\n",
            self.state,
            next
        );
        self.state = next;
    }
}
