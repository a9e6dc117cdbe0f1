// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! The forklift chassis on a NUCLEO-F767ZI.
//!
//! Ties the motor bridges, encoders, gyro, ranger and line sensor together behind the
//! [`Chassis`](crate::chassis::Chassis) traits. Sensor buses and sonar pins stay generic so this
//! file does not have to spell out HAL pin types; see `main.rs` for the wiring.

use cortex_m::delay::Delay;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c::{Write, WriteRead};
use embedded_hal::digital::v2::{InputPin, OutputPin};
use stm32f7xx_hal::pac;

use crate::chassis::{Drivetrain, Lift, Sensors};
use crate::colour::Reading;
use crate::drivers::mpu6050::Integrator;
use crate::drivers::{HBridge, Hcsr04, Micros, Mpu6050, Tcs34725};
use crate::hw::encoder::Encoder;
use crate::hw::pwm::PwmChannel;
use crate::hw::timebase::FreeRunning;

/// Minimum time between sonar pings so a late echo is not read as the next one.
const PING_INTERVAL_US: u32 = 60_000;
/// Longest gap between gyro samples outside of heading reads.
const GYRO_PERIOD_US: u32 = 5_000;
/// Delays are sliced so the gyro keeps being sampled while the robot waits.
const DELAY_SLICE_MS: u32 = 5;

pub type LeftMotor = HBridge<PwmChannel<pac::TIM1, 1>, PwmChannel<pac::TIM1, 2>>;
pub type RightMotor = HBridge<PwmChannel<pac::TIM1, 3>, PwmChannel<pac::TIM1, 4>>;
pub type LiftMotor = HBridge<PwmChannel<pac::TIM8, 1>, PwmChannel<pac::TIM8, 2>>;

pub struct Motors {
    pub left: LeftMotor,
    pub right: RightMotor,
    pub lift: LiftMotor,
}

pub struct Board<LineBus, GyroBus, Trig, Echo> {
    motors: Motors,
    wheel: Encoder<pac::TIM3>,
    lift: Encoder<pac::TIM4>,
    gyro: Mpu6050<GyroBus>,
    yaw: Integrator,
    sonar: Hcsr04<Trig, Echo>,
    last_ping_us: u32,
    last_range: u16,
    line: Tcs34725<LineBus>,
    timebase: FreeRunning<pac::TIM2>,
    delay: Delay,
}

impl<LineBus, GyroBus, Trig, Echo, E1, E2> Board<LineBus, GyroBus, Trig, Echo>
where
    LineBus: Write<Error = E1> + WriteRead<Error = E1>,
    GyroBus: Write<Error = E2> + WriteRead<Error = E2>,
    Trig: OutputPin,
    Echo: InputPin,
{
    /// Assemble the board. Measures the gyro bias, so the robot must be at rest.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        motors: Motors,
        wheel: Encoder<pac::TIM3>,
        lift: Encoder<pac::TIM4>,
        mut gyro: Mpu6050<GyroBus>,
        sonar: Hcsr04<Trig, Echo>,
        line: Tcs34725<LineBus>,
        mut timebase: FreeRunning<pac::TIM2>,
        mut delay: Delay,
    ) -> Self {
        let bias = gyro.measure_bias(&mut delay, 256).unwrap_or(0);
        let now = timebase.now_us();
        Self {
            motors,
            wheel,
            lift,
            gyro,
            yaw: Integrator::new(bias, now),
            sonar,
            last_ping_us: now.wrapping_sub(PING_INTERVAL_US),
            last_range: 0,
            line,
            timebase,
            delay,
        }
    }

    /// Fold the current yaw rate into the heading.
    ///
    /// Each sample is applied to the whole gap since the previous one, so the gap has to stay
    /// short. Heading reads always sample; wheel reads and delays sample once `GYRO_PERIOD_US`
    /// has passed.
    fn sample_gyro(&mut self, force: bool) {
        let now = self.timebase.now_us();
        if !force && !self.yaw.is_due(now, GYRO_PERIOD_US) {
            return;
        }
        if let Ok(raw) = self.gyro.gyro_z_raw() {
            self.yaw.sample(raw, now);
        }
    }
}

impl<LineBus, GyroBus, Trig, Echo, E1, E2> Drivetrain for Board<LineBus, GyroBus, Trig, Echo>
where
    LineBus: Write<Error = E1> + WriteRead<Error = E1>,
    GyroBus: Write<Error = E2> + WriteRead<Error = E2>,
    Trig: OutputPin,
    Echo: InputPin,
{
    fn drive(&mut self, left: i32, right: i32) {
        self.motors.left.set_power(left);
        self.motors.right.set_power(right);
    }

    fn wheel_ticks(&mut self) -> i32 {
        self.sample_gyro(false);
        self.wheel.position()
    }

    fn reset_wheel_ticks(&mut self) {
        self.wheel.reset();
    }
}

impl<LineBus, GyroBus, Trig, Echo> Lift for Board<LineBus, GyroBus, Trig, Echo> {
    fn set_lift_power(&mut self, power: i32) {
        self.motors.lift.set_power(power);
    }

    fn lift_ticks(&mut self) -> i32 {
        self.lift.position()
    }

    fn reset_lift_ticks(&mut self) {
        self.lift.reset();
    }
}

impl<LineBus, GyroBus, Trig, Echo, E1, E2> Sensors for Board<LineBus, GyroBus, Trig, Echo>
where
    LineBus: Write<Error = E1> + WriteRead<Error = E1>,
    GyroBus: Write<Error = E2> + WriteRead<Error = E2>,
    Trig: OutputPin,
    Echo: InputPin,
{
    fn heading_deg(&mut self) -> i32 {
        self.sample_gyro(true);
        self.yaw.heading_deg()
    }

    fn range_cm(&mut self) -> u16 {
        let now = self.timebase.now_us();
        if now.wrapping_sub(self.last_ping_us) >= PING_INTERVAL_US {
            self.last_range = self.sonar.measure_cm(&mut self.timebase);
            self.last_ping_us = now;
        }
        self.last_range
    }

    fn line_colour(&mut self) -> Reading {
        self.line.reading()
    }
}

impl<LineBus, GyroBus, Trig, Echo, E1, E2> DelayMs<u32> for Board<LineBus, GyroBus, Trig, Echo>
where
    LineBus: Write<Error = E1> + WriteRead<Error = E1>,
    GyroBus: Write<Error = E2> + WriteRead<Error = E2>,
    Trig: OutputPin,
    Echo: InputPin,
{
    fn delay_ms(&mut self, ms: u32) {
        let mut left = ms;
        while left > 0 {
            let slice = left.min(DELAY_SLICE_MS);
            self.delay.delay_ms(slice);
            self.sample_gyro(false);
            left -= slice;
        }
    }
}
