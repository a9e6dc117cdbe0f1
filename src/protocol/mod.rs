// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host-link protocol. Shipping requests can arrive as framed packets over the debug USART as
//! well as from the button panel.

pub mod messages;
pub mod parser;

pub use messages::Command;
pub use parser::Parser;
