// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Free-running 1 MHz timebases on the 32-bit timers.
//!
//! TIM2 serves the chassis (echo timing, gyro integration) and TIM5 the dispatcher clock, so the
//! two owners never share a peripheral.

use stm32f7xx_hal::pac;

use crate::chassis::Clock;
use crate::drivers::Micros;

pub struct FreeRunning<TIM> {
    tim: TIM,
}

impl<TIM> FreeRunning<TIM> {
    #[inline]
    pub fn free(self) -> TIM {
        self.tim
    }
}

macro_rules! free_running {
    ($TIM:ident, $ctor:ident, $en:ident) => {
        impl FreeRunning<pac::$TIM> {
            /// Start counting microseconds. `timer_hz` is the APB1 timer clock.
            pub fn $ctor(tim: pac::$TIM, timer_hz: u32) -> Self {
                let rcc = unsafe { &*pac::RCC::ptr() };
                rcc.apb1enr.modify(|_, w| w.$en().set_bit());

                tim.cr1.modify(|_, w| w.cen().clear_bit());
                tim.psc.write(|w| unsafe { w.bits(timer_hz / 1_000_000 - 1) });
                tim.arr.write(|w| unsafe { w.bits(0xFFFF_FFFF) });
                // Latch the prescaler.
                tim.egr.write(|w| w.ug().set_bit());
                tim.cnt.write(|w| unsafe { w.bits(0) });
                tim.cr1.modify(|_, w| w.cen().set_bit());

                Self { tim }
            }
        }

        impl Micros for FreeRunning<pac::$TIM> {
            #[inline]
            fn now_us(&mut self) -> u32 {
                self.tim.cnt.read().bits()
            }
        }
    };
}

free_running!(TIM2, tim2, tim2en);
free_running!(TIM5, tim5, tim5en);

/// Millisecond clock derived from a microsecond timebase.
///
/// Carries the sub-millisecond remainder between reads so the result wraps at `u32::MAX` ms rather
/// than at the microsecond counter's wrap. Must be read at least once per counter period (~71 min).
pub struct Millis<T> {
    timebase: T,
    last_us: u32,
    ms: u32,
}

impl<T: Micros> Millis<T> {
    pub fn new(mut timebase: T) -> Self {
        let last_us = timebase.now_us();
        Self {
            timebase,
            last_us,
            ms: 0,
        }
    }
}

impl<T: Micros> Clock for Millis<T> {
    fn now_ms(&mut self) -> u32 {
        let now = self.timebase.now_us();
        let whole = now.wrapping_sub(self.last_us) / 1_000;
        self.ms = self.ms.wrapping_add(whole);
        self.last_us = self.last_us.wrapping_add(whole * 1_000);
        self.ms
    }
}
