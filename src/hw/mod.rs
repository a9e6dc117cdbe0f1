// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! MCU-level wrappers for the STM32F767. Only built with the `firmware` feature.

pub mod board;
pub mod encoder;
pub mod led;
pub mod pwm;
pub mod timebase;
pub mod usart;

pub use board::{Board, Motors};
pub use encoder::Encoder;
pub use led::Led;
pub use timebase::{FreeRunning, Millis};
pub use usart::Console;
