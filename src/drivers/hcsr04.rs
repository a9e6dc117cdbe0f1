// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! HC-SR04 ultrasonic ranger.
//!
//! A 10 µs trigger pulse starts a ping; the echo pin then stays high for the round-trip time.
//! Every failure to get an echo (no rising edge, echo too long, pin error) reads as `0`, which the
//! motion code treats as "no valid reading yet".

use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::drivers::Micros;

const TRIGGER_US: u32 = 10;
/// Wait this long for the echo to start.
const RISE_TIMEOUT_US: u32 = 5_000;
/// Longest echo we accept: ~4 m.
const ECHO_TIMEOUT_US: u32 = 23_200;
/// Round-trip microseconds per centimetre.
const US_PER_CM: u32 = 58;

pub struct Hcsr04<Trig, Echo> {
    trig: Trig,
    echo: Echo,
}

impl<Trig, Echo> Hcsr04<Trig, Echo>
where
    Trig: OutputPin,
    Echo: InputPin,
{
    pub fn new(mut trig: Trig, echo: Echo) -> Self {
        let _ = trig.set_low();
        Self { trig, echo }
    }

    /// Fire one ping and return the distance in cm, or `0` when no echo was measured.
    pub fn measure_cm<T: Micros>(&mut self, timebase: &mut T) -> u16 {
        if self.trig.set_high().is_err() {
            return 0;
        }
        let start = timebase.now_us();
        while timebase.now_us().wrapping_sub(start) < TRIGGER_US {}
        let _ = self.trig.set_low();

        let Some(rise) = self.wait_level(timebase, true, RISE_TIMEOUT_US) else {
            return 0;
        };
        let Some(fall) = self.wait_level(timebase, false, ECHO_TIMEOUT_US) else {
            return 0;
        };
        echo_to_cm(fall.wrapping_sub(rise))
    }

    /// Spin until the echo pin reads `high`; returns the timestamp or `None` on timeout.
    fn wait_level<T: Micros>(&mut self, timebase: &mut T, high: bool, timeout_us: u32) -> Option<u32> {
        let start = timebase.now_us();
        loop {
            let now = timebase.now_us();
            match self.echo.is_high() {
                Ok(level) if level == high => return Some(now),
                Ok(_) => {}
                Err(_) => return None,
            }
            if now.wrapping_sub(start) > timeout_us {
                return None;
            }
        }
    }

    pub fn free(self) -> (Trig, Echo) {
        (self.trig, self.echo)
    }
}

/// Convert an echo width to centimetres. Anything under 1 cm reads as 1 so it is never mistaken
/// for the no-echo sentinel.
pub fn echo_to_cm(echo_us: u32) -> u16 {
    (echo_us / US_PER_CM).clamp(1, u16::MAX as u32) as u16
}
