pub mod error;
pub mod settings;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::platform::ExternalSignals;

pub use error::ConfigError;

/// Values an upstream build configuration supplies ahead of this crate's defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShimConfig {
    /// Pre-set the Windows-family classification.
    pub windows: bool,
    /// A configure step ran and owns optional capability probing.
    pub configured: bool,
    /// Externally supplied fallback constants, keyed by name (`SEEK_SET`, ...).
    pub constants: BTreeMap<String, i32>,
}

impl ShimConfig {
    pub fn external_signals(&self) -> ExternalSignals {
        ExternalSignals {
            windows: self.windows,
            configured: self.configured,
        }
    }

    /// Define-if-absent lookup: the supplied value if present, else `default`.
    pub fn constant(&self, name: &str, default: i32) -> i32 {
        Setting::new(self.constants.get(name).copied(), default).resolve()
    }
}

/// Which layer produced a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Platform,
    External,
    Default,
}

/// A value with an optional external override and a compiled-in default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting<T> {
    external: Option<T>,
    default: T,
}

impl<T> Setting<T> {
    pub const fn new(external: Option<T>, default: T) -> Self {
        Self { external, default }
    }

    pub fn source(&self) -> Source {
        if self.external.is_some() {
            Source::External
        } else {
            Source::Default
        }
    }

    pub fn resolve(self) -> T {
        self.external.unwrap_or(self.default)
    }
}

/// Parses a decimal `i32` with an optional sign and surrounding ASCII
/// whitespace. Usable in constant context.
pub const fn parse_i32(text: &str) -> Option<i32> {
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut end = bytes.len();
    while start < end && bytes[start].is_ascii_whitespace() {
        start += 1;
    }
    while end > start && bytes[end - 1].is_ascii_whitespace() {
        end -= 1;
    }

    let mut negative = false;
    if start < end && (bytes[start] == b'-' || bytes[start] == b'+') {
        negative = bytes[start] == b'-';
        start += 1;
    }
    if start == end {
        return None;
    }

    // Accumulate negatively so i32::MIN parses.
    let mut value: i32 = 0;
    while start < end {
        let byte = bytes[start];
        if !byte.is_ascii_digit() {
            return None;
        }
        value = match value.checked_mul(10) {
            Some(v) => v,
            None => return None,
        };
        value = match value.checked_sub((byte - b'0') as i32) {
            Some(v) => v,
            None => return None,
        };
        start += 1;
    }

    if negative {
        Some(value)
    } else {
        value.checked_neg()
    }
}

/// Three-layer resolution in constant context: the platform's own value,
/// then a well-formed external value, then `default`.
pub const fn layered(platform: Option<i32>, external: Option<&str>, default: i32) -> i32 {
    if let Some(value) = platform {
        return value;
    }
    if let Some(text) = external {
        if let Some(value) = parse_i32(text) {
            return value;
        }
    }
    default
}

/// Source that [`layered`] would pick for the same inputs.
pub const fn layered_source(platform: Option<i32>, external: Option<&str>) -> Source {
    if platform.is_some() {
        return Source::Platform;
    }
    if let Some(text) = external {
        if parse_i32(text).is_some() {
            return Source::External;
        }
    }
    Source::Default
}
