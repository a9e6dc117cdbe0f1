// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Three-button operator panel on plain GPIO inputs.

use embedded_hal::digital::v2::InputPin;

use super::ActiveLevel;
use crate::chassis::{Button, Panel};

pub struct Buttons<L, E, R> {
    left: L,
    enter: E,
    right: R,
    active: ActiveLevel,
}

impl<L, E, R> Buttons<L, E, R>
where
    L: InputPin,
    E: InputPin,
    R: InputPin,
{
    pub fn new(left: L, enter: E, right: R, active: ActiveLevel) -> Self {
        Self {
            left,
            enter,
            right,
            active,
        }
    }

    /// Buttons wired to ground with pull-ups.
    pub fn active_low(left: L, enter: E, right: R) -> Self {
        Self::new(left, enter, right, ActiveLevel::Low)
    }

    fn down<P: InputPin>(pin: &P, active: ActiveLevel) -> bool {
        let level = match active {
            ActiveLevel::High => pin.is_high(),
            ActiveLevel::Low => pin.is_low(),
        };
        level.unwrap_or(false)
    }

    pub fn free(self) -> (L, E, R) {
        (self.left, self.enter, self.right)
    }
}

impl<L, E, R> Panel for Buttons<L, E, R>
where
    L: InputPin,
    E: InputPin,
    R: InputPin,
{
    fn is_pressed(&mut self, button: Button) -> bool {
        let active = self.active;
        match button {
            Button::Left => Self::down(&self.left, active),
            Button::Enter => Self::down(&self.enter, active),
            Button::Right => Self::down(&self.right, active),
            Button::Any => {
                Self::down(&self.left, active)
                    || Self::down(&self.enter, active)
                    || Self::down(&self.right, active)
            }
        }
    }
}
