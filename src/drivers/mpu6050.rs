// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! InvenSense MPU-6050 over I²C, used as a yaw gyro only.
//!
//! The Z rate is read on demand and integrated by [`Integrator`] using the time since the previous
//! sample. A sample stands in for the whole gap before it, so callers sample on every heading read
//! and also whenever [`Integrator::is_due`] says the gap is getting long.
//!
//! The chip reports counter-clockwise-positive yaw when mounted flat; headings are negated so they
//! grow clockwise.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c::{Write, WriteRead};

pub const ADDRESS: u8 = 0x68;

mod reg {
    pub const GYRO_CONFIG: u8 = 0x1B;
    pub const GYRO_ZOUT_H: u8 = 0x47;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const WHO_AM_I: u8 = 0x75;
}

const WHO_AM_I_VALUE: u8 = 0x68;
/// ±250 °/s full scale.
const FS_SEL_250: u8 = 0x00;
/// PLL with X gyro reference, sleep off.
const CLKSEL_PLL_X: u8 = 0x01;
/// LSB per °/s at ±250 °/s.
pub const LSB_PER_DPS: i64 = 131;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error<E> {
    I2c(E),
    UnexpectedId(u8),
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::I2c(e)
    }
}

/// Integrates raw Z-rate samples into a heading.
///
/// Angle is kept in units of `1 / (LSB_PER_DPS * 1e6)` degrees so no precision is lost between
/// samples.
#[derive(Copy, Clone, Debug, Default)]
pub struct Integrator {
    bias: i16,
    /// Sum of `rate * dt_us` in raw units.
    acc: i64,
    /// Timebase reading of the last sample.
    last_us: u32,
}

impl Integrator {
    pub fn new(bias: i16, now_us: u32) -> Self {
        Self {
            bias,
            acc: 0,
            last_us: now_us,
        }
    }

    #[inline]
    pub fn bias(&self) -> i16 {
        self.bias
    }

    /// Add one sample taken `dt_us` after the previous one.
    pub fn update(&mut self, raw: i16, dt_us: u32) {
        let rate = i64::from(raw) - i64::from(self.bias);
        self.acc += rate * i64::from(dt_us);
    }

    /// Add a sample taken at `now_us` on a wrapping microsecond timebase.
    pub fn sample(&mut self, raw: i16, now_us: u32) {
        self.update(raw, now_us.wrapping_sub(self.last_us));
        self.last_us = now_us;
    }

    /// At least `period_us` has passed since the last sample.
    #[inline]
    pub fn is_due(&self, now_us: u32, period_us: u32) -> bool {
        now_us.wrapping_sub(self.last_us) >= period_us
    }

    /// Heading in whole degrees, clockwise positive, rounded to nearest.
    pub fn heading_deg(&self) -> i32 {
        let scale = LSB_PER_DPS * 1_000_000;
        let ccw = self.acc;
        let half = if ccw >= 0 { scale / 2 } else { -scale / 2 };
        (-((ccw + half) / scale)) as i32
    }

    pub fn reset(&mut self) {
        self.acc = 0;
    }
}

pub struct Mpu6050<I2C> {
    i2c: I2C,
}

impl<I2C, E> Mpu6050<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    /// Wake the chip and select the ±250 °/s range.
    pub fn new(mut i2c: I2C) -> Result<Self, Error<E>> {
        let mut id = [0u8; 1];
        i2c.write_read(ADDRESS, &[reg::WHO_AM_I], &mut id)?;
        if id[0] != WHO_AM_I_VALUE {
            return Err(Error::UnexpectedId(id[0]));
        }

        i2c.write(ADDRESS, &[reg::PWR_MGMT_1, CLKSEL_PLL_X])?;
        i2c.write(ADDRESS, &[reg::GYRO_CONFIG, FS_SEL_250])?;
        Ok(Self { i2c })
    }

    /// Raw signed Z rate.
    pub fn gyro_z_raw(&mut self) -> Result<i16, E> {
        let mut buf = [0u8; 2];
        self.i2c.write_read(ADDRESS, &[reg::GYRO_ZOUT_H], &mut buf)?;
        Ok(i16::from_be_bytes(buf))
    }

    /// Average `samples` readings taken 2 ms apart with the robot at rest.
    pub fn measure_bias<D: DelayMs<u32>>(&mut self, delay: &mut D, samples: u16) -> Result<i16, E> {
        let mut sum: i32 = 0;
        for _ in 0..samples {
            sum += i32::from(self.gyro_z_raw()?);
            delay.delay_ms(2);
        }
        Ok((sum / i32::from(samples.max(1))) as i16)
    }

    pub fn free(self) -> I2C {
        self.i2c
    }
}
