// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Error types.

use core::fmt;

/// Rejected calibration table.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A motor speed or power must be in (0, 100].
    InvalidPower { name: &'static str, value: i32 },

    /// A poll interval or time window must be non-zero.
    ZeroDuration(&'static str),

    /// A distance or tick multiplier must be positive and finite.
    InvalidScale { name: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPower { name, value } => {
                write!(f, "{name}: power {value} outside 1..=100")
            }
            ConfigError::ZeroDuration(name) => write!(f, "{name}: duration must be non-zero"),
            ConfigError::InvalidScale { name, value } => {
                write!(f, "{name}: {value} is not a positive scale")
            }
        }
    }
}
