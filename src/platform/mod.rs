//! Platform classification and capability flags.
//!
//! Keep OS quirks here to avoid leaking them into the engine's core logic.
//! The build script resolves the target once; the constants below are the
//! compiled-in result and never change for the lifetime of a build.
//! Consumers should take a [`Capabilities`] value (usually [`CAPABILITIES`])
//! rather than testing `cfg!(windows)` themselves.

pub mod resolve;
pub mod system;

use serde::Serialize;

pub use resolve::{
    Capabilities, ExternalSignals, PathSeparator, PlatformFlag, Resolution, TargetSignals,
    Toolchain,
};
pub use system::{Aggregation, FacilitySet};

/// The build targets a Windows-family platform.
pub const WINDOWS: bool = cfg!(shim_windows);
/// Multi-user OS assumptions apply.
pub const SET_UID: bool = cfg!(shim_set_uid);
/// `usleep` may be assumed available.
pub const HAVE_USLEEP: bool = cfg!(shim_have_usleep);
/// The build was reclassified because its toolchain lacks POSIX headers.
pub const DEMOTED: bool = cfg!(shim_demoted);

pub const PLATFORM: PlatformFlag = PlatformFlag::from_windows(WINDOWS);
pub const PATH_SEPARATOR: PathSeparator = PathSeparator::select(PLATFORM);
pub const PATH_SEP: &str = PATH_SEPARATOR.as_str();

pub const TOOLCHAIN: Toolchain = if cfg!(target_env = "msvc") {
    Toolchain::Msvc
} else {
    Toolchain::Other
};

pub const CAPABILITIES: Capabilities = Capabilities {
    platform: PLATFORM,
    multi_user: SET_UID,
    path_separator: PATH_SEPARATOR,
    have_usleep: HAVE_USLEEP,
};

/// Facilities for this build. A demoted build keeps what it selected while
/// it was still multi-user.
pub const FACILITIES: FacilitySet = system::facilities_for(
    &if DEMOTED {
        resolve::derive_capabilities(PlatformFlag::UnixLike, ExternalSignals {
            windows: false,
            configured: true,
        })
    } else {
        CAPABILITIES
    },
    TOOLCHAIN,
    cfg!(target_os = "linux"),
);

const _: () = assert!(SET_UID != WINDOWS, "multi-user flag must negate the Windows flag");
const _: () = assert!(!HAVE_USLEEP || SET_UID, "usleep is only assumed on multi-user builds");

/// Serializable snapshot of a platform resolution, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformProfile {
    pub platform: &'static str,
    pub multi_user: bool,
    pub path_separator: &'static str,
    pub have_usleep: bool,
    pub toolchain: &'static str,
    pub demoted: bool,
    pub facilities: FacilitySet,
}

impl PlatformProfile {
    /// The profile this crate was compiled with.
    pub fn current() -> Self {
        Self::from_parts(CAPABILITIES, TOOLCHAIN, DEMOTED, FACILITIES)
    }

    /// Runs the full resolution for an arbitrary target, e.g. to report what a
    /// cross build would produce.
    pub fn resolve(signals: &TargetSignals, external: &ExternalSignals) -> Self {
        let platform = resolve::classify(signals, external);
        let capabilities = resolve::derive_capabilities(platform, *external);
        let toolchain = signals.toolchain();
        let aggregation = system::aggregate(capabilities, toolchain, &signals.os);

        tracing::debug!(
            "Resolved {:?} as {}",
            signals.os,
            aggregation.capabilities.platform.as_str()
        );
        Self::from_parts(
            aggregation.capabilities,
            toolchain,
            aggregation.demoted,
            aggregation.facilities,
        )
    }

    fn from_parts(
        capabilities: Capabilities,
        toolchain: Toolchain,
        demoted: bool,
        facilities: FacilitySet,
    ) -> Self {
        Self {
            platform: capabilities.platform.as_str(),
            multi_user: capabilities.multi_user,
            path_separator: capabilities.path_sep(),
            have_usleep: capabilities.have_usleep,
            toolchain: toolchain.as_str(),
            demoted,
            facilities,
        }
    }
}
