//! Seek and lock constants, boolean constants, and typed views over them.
//!
//! Each seek/lock constant takes the platform's own numbering when the
//! platform has one (from `libc` on unix). Otherwise it takes a value
//! supplied through the matching `PLATFORM_SHIM_<NAME>` build environment
//! variable, and failing that the default below. A value the platform
//! defines is never replaced: native seek/lock calls expect their own
//! numbering.

use serde::Serialize;
use std::io::SeekFrom;

use crate::config::{layered, layered_source, Source};

pub const TRUE: i32 = 1;
pub const FALSE: i32 = 0;

/// Names of every constant that may be supplied externally.
pub const CONSTANT_NAMES: [&str; 6] = ["SEEK_SET", "SEEK_CUR", "SEEK_END", "F_UNLCK", "F_RDLCK", "F_WRLCK"];

#[cfg(unix)]
mod native {
    pub const SEEK_SET: Option<i32> = Some(libc::SEEK_SET as i32);
    pub const SEEK_CUR: Option<i32> = Some(libc::SEEK_CUR as i32);
    pub const SEEK_END: Option<i32> = Some(libc::SEEK_END as i32);
    pub const F_UNLCK: Option<i32> = Some(libc::F_UNLCK as i32);
    pub const F_RDLCK: Option<i32> = Some(libc::F_RDLCK as i32);
    pub const F_WRLCK: Option<i32> = Some(libc::F_WRLCK as i32);
}

#[cfg(not(unix))]
mod native {
    pub const SEEK_SET: Option<i32> = None;
    pub const SEEK_CUR: Option<i32> = None;
    pub const SEEK_END: Option<i32> = None;
    pub const F_UNLCK: Option<i32> = None;
    pub const F_RDLCK: Option<i32> = None;
    pub const F_WRLCK: Option<i32> = None;
}

/// One resolved define-if-absent constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FallbackConstant {
    pub name: &'static str,
    pub value: i32,
    pub default: i32,
    pub source: Source,
}

impl FallbackConstant {
    pub const fn resolve(
        name: &'static str,
        platform: Option<i32>,
        external: Option<&str>,
        default: i32,
    ) -> Self {
        Self {
            name,
            value: layered(platform, external, default),
            default,
            source: layered_source(platform, external),
        }
    }
}

macro_rules! fallback_constants {
    ($($name:ident = $default:expr),* $(,)?) => {
        $(
            pub const $name: i32 = entries::$name.value;
        )*

        mod entries {
            use super::{native, FallbackConstant};
            $(
                pub const $name: FallbackConstant = FallbackConstant::resolve(
                    stringify!($name),
                    native::$name,
                    option_env!(concat!("PLATFORM_SHIM_", stringify!($name))),
                    $default,
                );
            )*
        }

        /// Every fallback constant with the layer that supplied its value.
        pub static FALLBACK_CONSTANTS: [FallbackConstant; 6] = [$(entries::$name),*];
    };
}

fallback_constants! {
    SEEK_SET = 0,
    SEEK_CUR = 1,
    SEEK_END = 2,
    F_UNLCK = 0,
    F_RDLCK = 1,
    F_WRLCK = 2,
}

/// Looks up a resolved constant by name.
pub fn fallback_constant(name: &str) -> Option<&'static FallbackConstant> {
    FALLBACK_CONSTANTS.iter().find(|c| c.name == name)
}

/// Origin for a seek, in the platform's numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SeekWhence {
    Set,
    Current,
    End,
}

impl SeekWhence {
    pub const fn as_raw(self) -> i32 {
        match self {
            Self::Set => SEEK_SET,
            Self::Current => SEEK_CUR,
            Self::End => SEEK_END,
        }
    }

    pub fn from_raw(raw: i32) -> Option<Self> {
        [Self::Set, Self::Current, Self::End]
            .into_iter()
            .find(|whence| whence.as_raw() == raw)
    }

    /// `None` when seeking to a negative absolute position.
    pub fn to_seek_from(self, offset: i64) -> Option<SeekFrom> {
        match self {
            Self::Set => u64::try_from(offset).ok().map(SeekFrom::Start),
            Self::Current => Some(SeekFrom::Current(offset)),
            Self::End => Some(SeekFrom::End(offset)),
        }
    }
}

/// Advisory lock request, in the platform's numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LockMode {
    Unlock,
    Read,
    Write,
}

impl LockMode {
    pub const fn as_raw(self) -> i32 {
        match self {
            Self::Unlock => F_UNLCK,
            Self::Read => F_RDLCK,
            Self::Write => F_WRLCK,
        }
    }

    pub fn from_raw(raw: i32) -> Option<Self> {
        [Self::Unlock, Self::Read, Self::Write]
            .into_iter()
            .find(|mode| mode.as_raw() == raw)
    }
}
