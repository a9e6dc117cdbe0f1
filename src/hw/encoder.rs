// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Quadrature encoder support via STM32F7 timers in encoder mode.
//!
//! TIM3 counts the reference drive wheel and TIM4 the lift motor. Both are 16-bit, so the count is
//! extended to an `i32` in software on every read. Reads must come at least once per 32768 counts,
//! which the control loops do by a wide margin.

use stm32f7xx_hal::pac;

pub struct Encoder<TIM> {
    tim: TIM,
    last: u16,
    position: i32,
}

impl<TIM> Encoder<TIM> {
    /// Consume the wrapper and return the underlying timer peripheral.
    #[inline]
    pub fn free(self) -> TIM {
        self.tim
    }
}

/// Accumulate the signed change between two 16-bit counter samples.
#[inline]
fn extend(position: i32, last: u16, raw: u16) -> i32 {
    position.wrapping_add(raw.wrapping_sub(last) as i16 as i32)
}

macro_rules! encoder_timer {
    ($TIM:ident, $ctor:ident, $en:ident) => {
        impl Encoder<pac::$TIM> {
            /// Configure the timer as a quadrature encoder counting on both edges of both inputs.
            pub fn $ctor(tim: pac::$TIM) -> Self {
                let rcc = unsafe { &*pac::RCC::ptr() };
                rcc.apb1enr.modify(|_, w| w.$en().set_bit());

                // Disable counter while configuring
                tim.cr1.modify(|_, w| w.cen().clear_bit());

                tim.arr.write(|w| unsafe { w.bits(0xFFFF) });

                // Slave mode: encoder mode 3 (count on both TI1 and TI2)
                tim.smcr.modify(|_, w| w.sms().bits(0b011));

                tim.ccmr1_input().modify(|_, w| w.cc1s().ti1().cc2s().ti2());

                tim.ccer.modify(|_, w| {
                    w.cc1p()
                        .clear_bit()
                        .cc2p()
                        .clear_bit()
                        .cc1e()
                        .set_bit()
                        .cc2e()
                        .set_bit()
                });

                tim.cnt.write(|w| unsafe { w.bits(0) });
                tim.cr1.modify(|_, w| w.cen().set_bit());

                Self {
                    tim,
                    last: 0,
                    position: 0,
                }
            }

            #[inline]
            pub fn raw(&self) -> u16 {
                self.tim.cnt.read().bits() as u16
            }

            /// Position in counts since the last reset.
            pub fn position(&mut self) -> i32 {
                let raw = self.raw();
                self.position = extend(self.position, self.last, raw);
                self.last = raw;
                self.position
            }

            pub fn reset(&mut self) {
                self.tim.cnt.write(|w| unsafe { w.bits(0) });
                self.last = 0;
                self.position = 0;
            }
        }
    };
}

encoder_timer!(TIM3, tim3, tim3en);
encoder_timer!(TIM4, tim4, tim4en);
