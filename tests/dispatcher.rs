// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

mod common;

use common::{world, Sim, SimBlockSensor, SimChassis, SimClock, SimLink, SimPanel};
use forklift::colour::Colour;
use forklift::config::Calibration;
use forklift::protocol::parser::encode_ship;
use forklift::{Button, DispatchState, Dispatcher, Orchestrator, Report};

type Rig = Dispatcher<SimChassis, String, SimPanel, SimBlockSensor, SimClock, SimLink>;

const IDLE_MS: u32 = Calibration::DEFAULT.idle_timeout_ms;
const POLL_MS: u32 = Calibration::DEFAULT.poll_ms;
/// Sensor reads that can fall between a handled event and the end of its tick.
const TICK_READS_MS: u32 = 2;

fn rig() -> (Rig, Sim) {
    let sim = world();
    let orch = Orchestrator::new(SimChassis(sim.clone()), Calibration::DEFAULT, String::new());
    let dispatcher = Dispatcher::new(
        orch,
        SimPanel(sim.clone()),
        SimBlockSensor(sim.clone()),
        SimClock(sim.clone()),
        SimLink(sim.clone()),
    );
    (dispatcher, sim)
}

fn now(sim: &Sim) -> u32 {
    sim.borrow().now_ms()
}

/// Press Enter at the start prompt and leave the garage. Returns the time the idle window opened.
fn start(d: &mut Rig, sim: &Sim) -> u32 {
    sim.borrow_mut().presses.push_back((10, Button::Enter, 50));
    assert_eq!(d.poll(), Ok(DispatchState::Active));
    now(sim)
}

/// Operator ship request through the panel: Enter, then a colour button, then a zone button.
fn press_ship(sim: &Sim, colour: Button, zone: Button) {
    let t = now(sim);
    let mut w = sim.borrow_mut();
    w.presses.push_back((t + 10, Button::Enter, 150));
    w.presses.push_back((t + 400, colour, 100));
    w.presses.push_back((t + 700, zone, 100));
}

fn poll_until(d: &mut Rig, mut done: impl FnMut(&mut Rig) -> bool) {
    for _ in 0..10_000 {
        if done(d) {
            return;
        }
        assert_eq!(d.poll(), Ok(DispatchState::Active));
    }
    panic!("condition never reached");
}

/// Poll until the dispatcher shuts down. Returns the clock at the start of the final poll.
fn shutdown_time(d: &mut Rig, sim: &Sim) -> u32 {
    loop {
        let t = now(sim);
        if d.poll() == Ok(DispatchState::ShuttingDown) {
            return t;
        }
    }
}

/// `done` is the clock right after the poll that handled the last event.
fn assert_idle_window_restarted(shutdown_at: u32, done: u32) {
    let handled_at = done - POLL_MS - TICK_READS_MS;
    assert!(shutdown_at >= handled_at + IDLE_MS, "{shutdown_at} vs {done}");
    assert!(shutdown_at < done + IDLE_MS + POLL_MS, "{shutdown_at} vs {done}");
}

#[test]
fn waits_for_enter_before_leaving_the_garage() {
    let (mut d, sim) = rig();
    assert_eq!(d.state(), DispatchState::AwaitingStart);

    sim.borrow_mut().presses.push_back((500, Button::Enter, 50));
    assert_eq!(d.poll(), Ok(DispatchState::Active));

    let console = d.orchestrator().console().clone();
    assert!(console.starts_with("PRESS ENTER\r\n"));
    assert!(console.contains("state: AwaitingStart -> Active"));
    assert_eq!(d.orchestrator().heading(), -90);
    assert!(now(&sim) > 500);
}

#[test]
fn shuts_down_exactly_when_idle_window_closes() {
    let (mut d, sim) = rig();
    let opened = start(&mut d, &sim);

    let mut last_before = opened;
    loop {
        let t = now(&sim);
        match d.poll() {
            Ok(DispatchState::Active) => last_before = t,
            Ok(DispatchState::ShuttingDown) => {
                assert!(t - opened >= IDLE_MS);
                assert!(last_before - opened < IDLE_MS);
                break;
            }
            other => panic!("{other:?}"),
        }
    }

    // Terminal state is sticky.
    assert_eq!(d.poll(), Ok(DispatchState::ShuttingDown));
    assert_eq!(d.orchestrator().heading(), 0);
}

#[test]
fn store_and_ship_through_the_panel() {
    let (mut d, sim) = rig();
    start(&mut d, &sim);

    // Scenario 1: a Red block arrives on a fresh system.
    let t = now(&sim);
    sim.borrow_mut().arrivals.push_back((t, Colour::Red));
    poll_until(&mut d, |d| d.ledger().stored(Colour::Red) == 1);
    assert_eq!(
        *d.ledger().occupied(),
        [true, false, false, false, false, false]
    );
    assert_eq!(d.ledger().counters(), &[0, 1, 0, 0, 0, 0, 0]);

    // Scenario 2: ship it to zone Blue.
    press_ship(&sim, Button::Left, Button::Right);
    poll_until(&mut d, |d| d.ledger().shipped(Colour::Red) == 1);
    assert_eq!(*d.ledger().occupied(), [false; 6]);
    assert_eq!(d.ledger().counters(), &[0, 1, 0, 0, 1, 0, 0]);

    let console = d.orchestrator().console().clone();
    assert!(console.contains("store: shelf 0 (Red)"));
    assert!(console.contains("ship: shelf 0 -> zone Blue (Red)"));
    assert!(console.contains("SELECT A\r\nSHIPPING ZONE."));
}

#[test]
fn third_red_block_overflows() {
    let (mut d, sim) = rig();
    start(&mut d, &sim);

    let t = now(&sim);
    {
        let mut w = sim.borrow_mut();
        w.arrivals.push_back((t, Colour::Red));
        w.arrivals.push_back((t, Colour::Red));
        w.arrivals.push_back((t, Colour::Red));
    }
    poll_until(&mut d, |d| d.ledger().overflow() == 1);

    assert_eq!(
        *d.ledger().occupied(),
        [true, true, false, false, false, false]
    );
    assert_eq!(d.ledger().counters(), &[1, 2, 0, 0, 0, 0, 0]);
}

#[test]
fn yellow_block_is_ignored() {
    let (mut d, sim) = rig();
    start(&mut d, &sim);

    let t = now(&sim);
    sim.borrow_mut().arrivals.push_back((t, Colour::Yellow));
    poll_until(&mut d, |_| sim.borrow().arrivals.is_empty());
    d.poll().unwrap();

    assert_eq!(d.ledger().counters(), &[0; 7]);
    assert_eq!(*d.ledger().occupied(), [false; 6]);
}

#[test]
fn unmatched_ship_request_is_dropped_but_resets_idle() {
    let (mut d, sim) = rig();
    let opened = start(&mut d, &sim);

    // Scenario 4: nothing Blue in storage.
    let request_at = opened + 20_000;
    let frame = encode_ship(Colour::Blue, Colour::Red).unwrap();
    sim.borrow_mut().send_link(request_at, &frame);

    let shutdown_at = shutdown_time(&mut d, &sim);

    assert_eq!(d.ledger().counters(), &[0; 7]);
    assert!(shutdown_at >= request_at + IDLE_MS);
    assert!(d
        .orchestrator()
        .console()
        .contains("ship: no Blue block in storage"));
}

#[test]
fn stored_block_restarts_idle_window() {
    let (mut d, sim) = rig();
    let opened = start(&mut d, &sim);

    sim.borrow_mut()
        .arrivals
        .push_back((opened + 20_000, Colour::Blue));
    poll_until(&mut d, |d| d.ledger().stored(Colour::Blue) == 1);
    let done = now(&sim);
    assert!(done > opened + 20_000);

    let shutdown_at = shutdown_time(&mut d, &sim);
    assert!(shutdown_at > opened + IDLE_MS + 20_000);
    assert_idle_window_restarted(shutdown_at, done);
}

#[test]
fn panel_ship_request_restarts_idle_window() {
    let (mut d, sim) = rig();
    start(&mut d, &sim);

    let t = now(&sim);
    sim.borrow_mut().arrivals.push_back((t, Colour::Red));
    poll_until(&mut d, |d| d.ledger().stored(Colour::Red) == 1);
    let stored = now(&sim);

    // Most of the window goes by before the operator asks for the block.
    poll_until(&mut d, |_| now(&sim) >= stored + 20_000);
    press_ship(&sim, Button::Left, Button::Enter);
    poll_until(&mut d, |d| d.ledger().shipped(Colour::Red) == 1);
    let done = now(&sim);

    let shutdown_at = shutdown_time(&mut d, &sim);
    assert!(shutdown_at > stored + IDLE_MS);
    assert_idle_window_restarted(shutdown_at, done);
    assert!(d
        .orchestrator()
        .console()
        .contains("ship: shelf 0 -> zone Green (Red)"));
}

#[test]
fn host_link_request_ships_a_stored_block() {
    let (mut d, sim) = rig();
    start(&mut d, &sim);

    let t = now(&sim);
    sim.borrow_mut().arrivals.push_back((t, Colour::Green));
    poll_until(&mut d, |d| d.ledger().stored(Colour::Green) == 1);
    assert_eq!(
        *d.ledger().occupied(),
        [false, false, false, false, true, false]
    );

    let frame = encode_ship(Colour::Green, Colour::Red).unwrap();
    let t = now(&sim);
    sim.borrow_mut().send_link(t, &frame);
    poll_until(&mut d, |d| d.ledger().shipped(Colour::Green) == 1);

    assert_eq!(*d.ledger().occupied(), [false; 6]);
    assert!(d
        .orchestrator()
        .console()
        .contains("ship: shelf 4 -> zone Red (Green)"));
}

#[test]
fn run_parks_and_prints_the_report() {
    let (mut d, sim) = rig();
    sim.borrow_mut().presses.push_back((10, Button::Enter, 50));
    sim.borrow_mut().arrivals.push_back((5_000, Colour::Blue));

    let ledger = d.run().unwrap();

    assert_eq!(d.state(), DispatchState::ShuttingDown);
    assert_eq!(ledger.stored(Colour::Blue), 1);
    let expected = Report::from_ledger(&ledger).to_string();
    let console = d.orchestrator().console().clone();
    assert!(console.ends_with(&expected));
    assert!(console.contains("state: Active -> ShuttingDown\r\nshutdown\r\n"));
    assert!(sim.borrow().is_stopped());
}
