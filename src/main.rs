// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use core::fmt::Write;

use cortex_m::delay::Delay;
use cortex_m_rt::entry;
use panic_halt as _;

use hal::{
    i2c::{BlockingI2c, Mode},
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use forklift::drivers::{Buttons, HBridge, Hcsr04, Mpu6050, Tcs34725};
use forklift::hw::{pwm, Board, Console, Encoder, FreeRunning, Led, Millis, Motors};
use forklift::{Calibration, DispatchState, Dispatcher, Orchestrator};

/// I²C data timeout for every sensor bus.
const I2C_TIMEOUT_US: u32 = 10_000;

#[entry]
fn main() -> ! {
    // Peripherals
    let (Some(dp), Some(cp)) = (pac::Peripherals::take(), cortex_m::Peripherals::take()) else {
        park();
    };

    // Clocks
    let mut rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let apb1_timer_hz = clocks.timclk1().raw();
    let apb2_timer_hz = clocks.timclk2().raw();

    // GPIO
    let gpioa = dp.GPIOA.split();
    let gpiob = dp.GPIOB.split();
    let gpioc = dp.GPIOC.split();
    let gpiod = dp.GPIOD.split();
    let gpioe = dp.GPIOE.split();
    let gpiof = dp.GPIOF.split();
    let gpiog = dp.GPIOG.split();

    // Status LED (LD1, PB0)
    let mut status = Led::active_high(gpiob.pb0.into_push_pull_output());

    // USART3 via ST-LINK (PD8/PD9): console out, host link in
    let tx = gpiod.pd8.into_alternate::<7>();
    let rx = gpiod.pd9.into_alternate::<7>();
    let usart_cfg = Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART3, (tx, rx), &clocks, usart_cfg);
    let (mut console, link) = Console::new(serial);

    let cal = Calibration::DEFAULT;
    if let Err(e) = cal.validate() {
        let _ = write!(console, "calibration: {}\r\n", e);
        park();
    }

    // Motor PWM: TIM1 CH1..4 on PE9/PE11/PE13/PE14, TIM8 CH1..2 on PC6/PC7
    let _ = gpioe.pe9.into_alternate::<1>();
    let _ = gpioe.pe11.into_alternate::<1>();
    let _ = gpioe.pe13.into_alternate::<1>();
    let _ = gpioe.pe14.into_alternate::<1>();
    let _ = gpioc.pc6.into_alternate::<3>();
    let _ = gpioc.pc7.into_alternate::<3>();
    let (l1, l2, r1, r2) = pwm::tim1(dp.TIM1, apb2_timer_hz);
    let (f1, f2) = pwm::tim8(dp.TIM8, apb2_timer_hz);
    let motors = Motors {
        left: HBridge::new(l1, l2, false),
        // Mirrored on the chassis.
        right: HBridge::new(r1, r2, true),
        lift: HBridge::new(f1, f2, false),
    };

    // Encoders: wheel on TIM3 (PB4/PB5), lift on TIM4 (PD12/PD13)
    let _ = gpiob.pb4.into_alternate::<2>();
    let _ = gpiob.pb5.into_alternate::<2>();
    let _ = gpiod.pd12.into_alternate::<2>();
    let _ = gpiod.pd13.into_alternate::<2>();
    let wheel = Encoder::tim3(dp.TIM3);
    let lift = Encoder::tim4(dp.TIM4);

    // I2C1 (PB8/PB9): line sensor
    let scl = gpiob.pb8.into_alternate_open_drain::<4>();
    let sda = gpiob.pb9.into_alternate_open_drain::<4>();
    let i2c1 = BlockingI2c::i2c1(
        dp.I2C1,
        (scl, sda),
        Mode::standard(100.kHz()),
        &clocks,
        &mut rcc.apb1,
        I2C_TIMEOUT_US,
    );

    // I2C2 (PF1/PF0): block sensor at the forks
    let scl = gpiof.pf1.into_alternate_open_drain::<4>();
    let sda = gpiof.pf0.into_alternate_open_drain::<4>();
    let i2c2 = BlockingI2c::i2c2(
        dp.I2C2,
        (scl, sda),
        Mode::standard(100.kHz()),
        &clocks,
        &mut rcc.apb1,
        I2C_TIMEOUT_US,
    );

    // I2C3 (PA8/PC9): gyro
    let scl = gpioa.pa8.into_alternate_open_drain::<4>();
    let sda = gpioc.pc9.into_alternate_open_drain::<4>();
    let i2c3 = BlockingI2c::i2c3(
        dp.I2C3,
        (scl, sda),
        Mode::fast(400.kHz()),
        &clocks,
        &mut rcc.apb1,
        I2C_TIMEOUT_US,
    );

    let (line, block, gyro) = match (Tcs34725::new(i2c1), Tcs34725::new(i2c2), Mpu6050::new(i2c3)) {
        (Ok(line), Ok(block), Ok(gyro)) => (line, block, gyro),
        _ => {
            let _ = write!(console, "sensor init failed\r\n");
            park();
        }
    };

    // HC-SR04: trigger PG0, echo PG1
    let sonar = Hcsr04::new(
        gpiog.pg0.into_push_pull_output(),
        gpiog.pg1.into_floating_input(),
    );

    // Operator panel: PF13/PF14/PF15 to ground
    let panel = Buttons::active_low(
        gpiof.pf13.into_pull_up_input(),
        gpiof.pf14.into_pull_up_input(),
        gpiof.pf15.into_pull_up_input(),
    );

    let chassis_timebase = FreeRunning::tim2(dp.TIM2, apb1_timer_hz);
    let clock = Millis::new(FreeRunning::tim5(dp.TIM5, apb1_timer_hz));
    let delay = Delay::new(cp.SYST, clocks.sysclk().raw());

    let board = Board::new(
        motors,
        wheel,
        lift,
        gyro,
        sonar,
        line,
        chassis_timebase,
        delay,
    );

    let orchestrator = Orchestrator::new(board, cal, console);
    let mut dispatcher = Dispatcher::new(orchestrator, panel, block, clock, link);

    loop {
        match dispatcher.poll() {
            Ok(DispatchState::ShuttingDown) | Err(_) => break,
            Ok(state) => status.set(state == DispatchState::Active),
        }
    }
    status.set(false);

    park();
}

fn park() -> ! {
    loop {
        cortex_m::asm::nop();
    }
}
