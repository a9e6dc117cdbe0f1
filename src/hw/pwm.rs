// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Edge-aligned PWM on the advanced-control timers via direct PAC register access.
//!
//! TIM1 CH1..CH4 drive the two wheel motors and TIM8 CH1..CH2 the lift motor. Each channel is a
//! zero-sized handle implementing `embedded_hal::PwmPin` so the H-bridge driver can own it.

use core::marker::PhantomData;
use core::ops::Deref;

use embedded_hal::PwmPin;
use stm32f7xx_hal::pac;

/// PWM carrier frequency.
pub const PWM_HZ: u32 = 20_000;

/// One output-compare channel `C` (1-based) of timer `TIM`.
pub struct PwmChannel<TIM, const C: u8> {
    _tim: PhantomData<TIM>,
}

/// CCMRx output-compare mode 1 with preload, shifted into place for the channel.
const fn oc_pwm1(c: u8) -> u32 {
    const OCXM_PWM1: u32 = 0b110 << 4;
    const OCXPE: u32 = 1 << 3;
    (OCXM_PWM1 | OCXPE) << (((c - 1) % 2) * 8)
}

macro_rules! pwm_timer {
    ($TIM:ident, $ctor:ident, $en:ident, [$($C:literal),+]) => {
        /// Configure the timer for `PWM_HZ` and hand out its channels. `timer_hz` is the APB2
        /// timer clock.
        pub fn $ctor(tim: pac::$TIM, timer_hz: u32) -> ($(PwmChannel<pac::$TIM, $C>,)+) {
            let rcc = unsafe { &*pac::RCC::ptr() };
            rcc.apb2enr.modify(|_, w| w.$en().set_bit());

            tim.cr1.modify(|_, w| w.cen().clear_bit());
            tim.psc.write(|w| unsafe { w.bits(0) });
            tim.arr.write(|w| unsafe { w.bits(timer_hz / PWM_HZ - 1) });

            $(
                if $C <= 2 {
                    tim.ccmr1_output().modify(|r, w| unsafe { w.bits(r.bits() | oc_pwm1($C)) });
                } else {
                    tim.ccmr2_output().modify(|r, w| unsafe { w.bits(r.bits() | oc_pwm1($C)) });
                }
            )+

            // Auto-reload preload, then latch everything.
            tim.cr1.modify(|_, w| w.arpe().set_bit());
            tim.egr.write(|w| w.ug().set_bit());
            // Advanced timers gate every output behind MOE.
            tim.bdtr.modify(|_, w| w.moe().set_bit());
            tim.cr1.modify(|_, w| w.cen().set_bit());

            ($(PwmChannel::<pac::$TIM, $C> { _tim: PhantomData },)+)
        }

        impl<const C: u8> PwmChannel<pac::$TIM, C> {
            #[inline]
            fn regs() -> &'static <pac::$TIM as Deref>::Target {
                unsafe { &*pac::$TIM::ptr() }
            }
        }

        impl<const C: u8> PwmPin for PwmChannel<pac::$TIM, C> {
            type Channel = ();
            type Time = ();
            type Duty = u16;

            fn disable(&mut self) {
                let tim = Self::regs();
                tim.ccer.modify(|r, w| unsafe { w.bits(r.bits() & !(1 << ((C - 1) * 4))) });
            }

            fn enable(&mut self) {
                let tim = Self::regs();
                tim.ccer.modify(|r, w| unsafe { w.bits(r.bits() | (1 << ((C - 1) * 4))) });
            }

            fn get_duty(&self) -> u16 {
                let tim = Self::regs();
                let bits = match C {
                    1 => tim.ccr1.read().bits(),
                    2 => tim.ccr2.read().bits(),
                    3 => tim.ccr3.read().bits(),
                    _ => tim.ccr4.read().bits(),
                };
                bits as u16
            }

            fn get_max_duty(&self) -> u16 {
                Self::regs().arr.read().bits() as u16 + 1
            }

            fn set_duty(&mut self, duty: u16) {
                let tim = Self::regs();
                let duty = duty as u32;
                match C {
                    1 => tim.ccr1.write(|w| unsafe { w.bits(duty) }),
                    2 => tim.ccr2.write(|w| unsafe { w.bits(duty) }),
                    3 => tim.ccr3.write(|w| unsafe { w.bits(duty) }),
                    _ => tim.ccr4.write(|w| unsafe { w.bits(duty) }),
                }
            }
        }
    };
}

pwm_timer!(TIM1, tim1, tim1en, [1, 2, 3, 4]);
pwm_timer!(TIM8, tim8, tim8en, [1, 2]);
