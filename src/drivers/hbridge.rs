// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! DRV8873 H-bridge driven in PWM mode.
//!
//! IN1 and IN2 each take a PWM channel:
//!
//! | Power | IN1 | IN2 |
//! | ----- | --- | --- |
//! | > 0 | duty | 0 |
//! | < 0 | 0 | duty |
//! | 0 | max | max (brake) |

use embedded_hal::PwmPin;

/// One motor on a DRV8873. Power is a signed percentage in [-100, 100].
pub struct HBridge<Pwm1, Pwm2> {
    in1: Pwm1,
    in2: Pwm2,
    power: i32,
    reversed: bool,
}

impl<Pwm1, Pwm2> HBridge<Pwm1, Pwm2>
where
    Pwm1: PwmPin<Duty = u16>,
    Pwm2: PwmPin<Duty = u16>,
{
    /// Create a driver and brake the motor. `reversed` flips the sign for motors mounted the
    /// other way round.
    pub fn new(mut in1: Pwm1, mut in2: Pwm2, reversed: bool) -> Self {
        in1.enable();
        in2.enable();
        let mut bridge = Self {
            in1,
            in2,
            power: 0,
            reversed,
        };
        bridge.brake();
        bridge
    }

    /// Set the motor power. Values outside [-100, 100] are clamped.
    pub fn set_power(&mut self, power: i32) {
        let power = power.clamp(-100, 100);
        self.power = power;

        let signed = if self.reversed { -power } else { power };
        let max_duty = self.in1.get_max_duty(); // Assuming IN1/IN2 have same resolution
        let duty = duty_for(signed.unsigned_abs(), max_duty);

        if signed > 0 {
            self.in1.set_duty(duty);
            self.in2.set_duty(0);
        } else if signed < 0 {
            self.in1.set_duty(0);
            self.in2.set_duty(duty);
        } else {
            self.brake();
        }
    }

    /// Last commanded power, before reversal.
    #[inline]
    pub fn power(&self) -> i32 {
        self.power
    }

    /// Brake (stops quickly by shorting motor terminals).
    pub fn brake(&mut self) {
        let max = self.in1.get_max_duty();
        self.in1.set_duty(max);
        self.in2.set_duty(max);
        self.power = 0;
    }

    pub fn free(self) -> (Pwm1, Pwm2) {
        (self.in1, self.in2)
    }
}

/// Duty cycle for a power percentage.
#[inline]
fn duty_for(percent: u32, max_duty: u16) -> u16 {
    ((percent.min(100) * max_duty as u32) / 100) as u16
}
