// SPDX-FileCopyrightText: 2023-2025 Nomadic Labs <contact@nomadic-labs.com>
// SPDX-FileCopyrightText: 2025 Functori <contact@functori.com>
//
// SPDX-License-Identifier: MIT

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, FromPrimitive)]
pub enum Level {
    Fatal = 0,
    Error,
    Info,
    Debug,
    Benchmarking,
}

impl TryFrom<u8> for Level {
    type Error = ();
    fn try_from(value: u8) -> Result<Self, ()> {
        FromPrimitive::from_u8(value).ok_or(())
    }
}

impl Default for Level {
    fn default() -> Self {
        if cfg!(feature = "debug") {
            Self::Debug
        } else if cfg!(feature = "benchmark") {
            Self::Benchmarking
        } else {
            Self::Info
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Level::Info => write!(f, "Info"),
            Level::Error => write!(f, "Error"),
            Level::Fatal => write!(f, "Fatal"),
            Level::Debug => write!(f, "Debug"),
            Level::Benchmarking => write!(f, "Benchmarking"),
        }
    }
}

pub trait Verbosity {
    fn verbosity(&self) -> Level;
}

/// Destination of the formatted log lines, usually the debug output of the
/// execution host.
pub trait DebugSink {
    fn write_debug(&self, msg: &str);
}

#[doc(hidden)]
#[macro_export]
macro_rules! debug_str {
    ($host: expr, $msg: expr) => {{
        use $crate::DebugSink as _;
        $host.write_debug($msg)
    }};
}

#[macro_export]
macro_rules! log {
    ($host: expr, $level: expr, $fmt: expr $(, $arg:expr)*)  => {{
        use $crate::Verbosity as _;
        if $host.verbosity() >= $level {
            let msg = format!("[{}] {}\n", $level, format_args!($fmt $(, $arg)*));
            $crate::debug_str!($host, &msg);
        }
    }};
}

// When the `tracing` feature is enabled, export the tracing attribute
#[cfg(feature = "tracing")]
pub mod tracing {
    pub use tracing::instrument;
}

// When the `tracing` feature is disabled, export a no-op attribute
#[cfg(not(feature = "tracing"))]
pub mod tracing {
    pub use nop_macros::nop as instrument;
}
