// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Operator panel: start prompt and shipping selection.
//!
//! Prompts go to the console that stands in for the robot's screen. Button reads spin until the
//! operator acts, and every choice waits for the buttons to be released so one press is never
//! read twice.

use core::fmt::Write;
use core::hint::spin_loop;

use crate::chassis::{Button, Panel};
use crate::colour::{Colour, Zone};

/// Shown while the robot waits at the receiving station.
pub fn prompt_idle<W: Write>(console: &mut W) {
    let _ = write!(console, "PRESS ENTER\r\nTO SHIP\r\n");
}

/// Block until Enter is pressed and released.
pub fn wait_for_start<P: Panel, W: Write>(panel: &mut P, console: &mut W) {
    let _ = write!(console, "PRESS ENTER\r\n");
    while !panel.is_pressed(Button::Enter) {
        spin_loop();
    }
    wait_release(panel, Button::Enter);
}

/// Ask the operator for a block colour and a shipping zone.
///
/// Left/Enter/Right pick Red/Green/Blue, and zones 1/2/3 for the zone menu.
pub fn select_shipping<P: Panel, W: Write>(panel: &mut P, console: &mut W) -> (Colour, Zone) {
    wait_release(panel, Button::Any);
    let _ = write!(
        console,
        "SELECT A\r\nCOLOURED BLOCK.\r\nLEFT: RED\r\nENTER: GREEN\r\nRIGHT: BLUE\r\n"
    );
    let colour = read_choice(panel);

    wait_release(panel, Button::Any);
    let _ = write!(
        console,
        "SELECT A\r\nSHIPPING ZONE.\r\nLEFT: ZONE 1\r\nENTER: ZONE 2\r\nRIGHT: ZONE 3\r\n"
    );
    let zone = read_choice(panel);

    prompt_idle(console);
    wait_release(panel, Button::Any);

    (colour, zone)
}

/// Spin until one of Left/Enter/Right is down and map it to a colour code.
fn read_choice<P: Panel>(panel: &mut P) -> Colour {
    loop {
        if panel.is_pressed(Button::Left) {
            return Colour::Red;
        }
        if panel.is_pressed(Button::Enter) {
            return Colour::Green;
        }
        if panel.is_pressed(Button::Right) {
            return Colour::Blue;
        }
        spin_loop();
    }
}

fn wait_release<P: Panel>(panel: &mut P, button: Button) {
    while panel.is_pressed(button) {
        spin_loop();
    }
}
