//! Platform configuration and portability layer for the terminal game engine.
//!
//! The build script classifies the target once; everything exported here is
//! a compile-time constant or a pure function, so the rest of the engine can
//! be written against one stable surface:
//!
//! - [`platform`]: the Windows/Unix classification, the multi-user capability
//!   flag, path separator, optional capabilities and available facilities.
//! - [`constants`]: seek/lock constants that defer to the platform's own
//!   numbering, plus `TRUE`/`FALSE`.
//! - [`utils`]: generic numeric helpers, key-code conversions and the
//!   [`fallthrough!`] marker.
//! - [`config`]: layered override resolution for upstream build configuration.

pub mod config;
pub mod constants;
pub mod platform;
pub mod utils;

pub use constants::{
    LockMode, SeekWhence, FALSE, F_RDLCK, F_UNLCK, F_WRLCK, SEEK_CUR, SEEK_END, SEEK_SET, TRUE,
};
pub use platform::{
    Capabilities, FacilitySet, PlatformFlag, PlatformProfile, CAPABILITIES, FACILITIES,
    HAVE_USLEEP, PATH_SEP, SET_UID, WINDOWS,
};
pub use utils::keys::*;
pub use utils::numeric::{abs, max, min, ordered, sign};
