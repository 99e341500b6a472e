//! System facility aggregation.
//!
//! Decides which standard and OS facilities the rest of the engine may rely
//! on, given the resolved capabilities. A multi-user build on a toolchain
//! without the POSIX user/process headers is demoted to Windows-family here
//! instead of failing.

use bitflags::bitflags;
use serde::{Serialize, Serializer};

use super::resolve::{self, Capabilities, Toolchain};

bitflags! {
    /// Facilities available to the engine for one build.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FacilitySet: u32 {
        const CORE_IO = 1 << 0;
        const CHAR_CLASS = 1 << 1;
        const ERRORS = 1 << 2;
        const STD_LIB = 1 << 3;
        const TIME = 1 << 4;
        const MEMORY_STRING = 1 << 5;
        const FILE_CONTROL = 1 << 6;
        const VAR_ARGS = 1 << 7;
        /// Low-level handle I/O on Windows-family builds.
        const WINDOWS_IO = 1 << 8;
        /// uid/gid/pid types.
        const SYS_TYPES = 1 << 9;
        /// Wall-clock time with sub-second resolution (linux only).
        const SYS_TIME = 1 << 10;
        /// Millisecond timestamps used for seeding.
        const TIME_B = 1 << 11;
        const SYS_PARAM = 1 << 12;
        /// Advisory file locks for the score file.
        const FILE_LOCK = 1 << 13;
        /// Password database lookups for user names and `~user` expansion.
        const USER_DATABASE = 1 << 14;
        /// `getpid`, `kill`, `usleep` and friends.
        const UNISTD = 1 << 15;
        /// Permission masks (`umask`, `chmod`).
        const STAT = 1 << 16;
    }
}

impl FacilitySet {
    /// Facilities every build gets regardless of platform.
    pub const BASELINE: Self = Self::CORE_IO
        .union(Self::CHAR_CLASS)
        .union(Self::ERRORS)
        .union(Self::STD_LIB)
        .union(Self::TIME)
        .union(Self::MEMORY_STRING)
        .union(Self::FILE_CONTROL)
        .union(Self::VAR_ARGS);

    /// Facilities that only exist with a POSIX-compatible toolchain.
    pub const POSIX: Self = Self::SYS_PARAM
        .union(Self::FILE_LOCK)
        .union(Self::USER_DATABASE)
        .union(Self::UNISTD)
        .union(Self::STAT);

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.iter_names().map(|(name, _)| name)
    }
}

impl Serialize for FacilitySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names())
    }
}

/// Facility selection for capabilities as first derived, before any
/// toolchain reconciliation.
pub const fn facilities_for(
    capabilities: &Capabilities,
    toolchain: Toolchain,
    is_linux: bool,
) -> FacilitySet {
    let mut set = FacilitySet::BASELINE;
    if capabilities.is_windows() {
        set = set.union(FacilitySet::WINDOWS_IO);
    }
    if capabilities.multi_user {
        set = set.union(FacilitySet::SYS_TYPES).union(FacilitySet::TIME_B);
        if is_linux {
            set = set.union(FacilitySet::SYS_TIME);
        }
        if toolchain.is_posix_compatible() {
            set = set.union(FacilitySet::POSIX);
        }
    }
    set
}

/// Outcome of reconciling capabilities with the toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregation {
    pub facilities: FacilitySet,
    pub capabilities: Capabilities,
    pub demoted: bool,
}

/// Selects facilities and demotes contradicting builds.
///
/// The demotion only recognises MSVC; other toolchains without POSIX
/// headers are not detected.
pub fn aggregate(capabilities: Capabilities, toolchain: Toolchain, target_os: &str) -> Aggregation {
    let facilities = facilities_for(&capabilities, toolchain, target_os == "linux");
    let demoted = resolve::needs_demotion(&capabilities, toolchain);

    if demoted {
        tracing::warn!(
            "Multi-user target {:?} is built with the {} toolchain; demoting to Windows-family",
            target_os,
            toolchain.as_str()
        );
        return Aggregation {
            facilities,
            capabilities: resolve::demoted_capabilities(),
            demoted,
        };
    }

    tracing::debug!(?facilities, "Aggregated system facilities");
    Aggregation {
        facilities,
        capabilities,
        demoted,
    }
}

/// OS facilities re-exported for consumers, gated by the build's capabilities.
pub mod os {
    pub use std::fs;
    pub use std::io::{self, Read, Seek, SeekFrom, Write};
    pub use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    #[cfg(all(unix, shim_posix))]
    pub use libc::{
        c_int, flock, getgid, getpid, getpwnam, getpwuid, getuid, gid_t, kill, mode_t, passwd,
        pid_t, uid_t, umask, LOCK_EX, LOCK_NB, LOCK_SH, LOCK_UN,
    };

    #[cfg(all(unix, shim_have_usleep))]
    pub use libc::usleep;
}
