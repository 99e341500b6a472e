//! Target classification and capability derivation.
//!
//! This file is compiled twice: once as `platform::resolve` inside the
//! library and once by `build.rs`, which uses it to turn the cargo target
//! description into `cfg` flags. It must therefore depend on `std` only.

/// Prefix shared by every environment override this crate understands.
pub const ENV_PREFIX: &str = "PLATFORM_SHIM_";
/// Pre-sets the Windows-family classification.
pub const ENV_WINDOWS: &str = "PLATFORM_SHIM_WINDOWS";
/// Signals that an external configure step already probed capabilities.
pub const ENV_CONFIGURED: &str = "PLATFORM_SHIM_CONFIGURED";

/// The single build-wide platform decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformFlag {
    WindowsFamily,
    UnixLike,
}

impl PlatformFlag {
    pub const fn from_windows(windows: bool) -> Self {
        if windows {
            Self::WindowsFamily
        } else {
            Self::UnixLike
        }
    }

    pub const fn is_windows(self) -> bool {
        matches!(self, Self::WindowsFamily)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WindowsFamily => "windows-family",
            Self::UnixLike => "unix-like",
        }
    }
}

/// Path component separator for the classified platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathSeparator {
    Slash,
    Backslash,
}

impl PathSeparator {
    pub const DEFAULT: Self = Self::Slash;

    /// Starts from the default and overwrites it for Windows-family builds.
    pub const fn select(platform: PlatformFlag) -> Self {
        let mut separator = Self::DEFAULT;
        if platform.is_windows() {
            separator = Self::Backslash;
        }
        separator
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slash => "/",
            Self::Backslash => "\\",
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::Slash => '/',
            Self::Backslash => '\\',
        }
    }
}

/// Compiler families that matter for facility selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toolchain {
    /// The MSVC toolchain, which ships none of the POSIX user/process headers.
    Msvc,
    Other,
}

impl Toolchain {
    pub fn from_target_env(env: &str) -> Self {
        if env.trim().eq_ignore_ascii_case("msvc") {
            Self::Msvc
        } else {
            Self::Other
        }
    }

    pub const fn is_posix_compatible(self) -> bool {
        !matches!(self, Self::Msvc)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Msvc => "msvc",
            Self::Other => "other",
        }
    }
}

/// Identity of the compilation target, as reported by cargo or `std::env::consts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSignals {
    pub os: String,
    pub families: Vec<String>,
    pub env: String,
}

impl TargetSignals {
    /// Builds signals from cargo's `CARGO_CFG_TARGET_*` values. `family` may be
    /// a comma-separated list, as cargo reports it.
    pub fn from_cfg_values(os: &str, family: &str, env: &str) -> Self {
        Self {
            os: os.trim().to_string(),
            families: family
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect(),
            env: env.trim().to_string(),
        }
    }

    /// Signals describing the target this code was compiled for.
    pub fn compiled() -> Self {
        let env = if cfg!(target_env = "msvc") {
            "msvc"
        } else if cfg!(target_env = "gnu") {
            "gnu"
        } else if cfg!(target_env = "musl") {
            "musl"
        } else {
            ""
        };
        Self::from_cfg_values(std::env::consts::OS, std::env::consts::FAMILY, env)
    }

    pub fn is_windows_target(&self) -> bool {
        self.os == "windows" || self.has_family("windows")
    }

    pub fn has_family(&self, family: &str) -> bool {
        self.families.iter().any(|f| f == family)
    }

    pub fn toolchain(&self) -> Toolchain {
        Toolchain::from_target_env(&self.env)
    }
}

/// Values an external build configuration may have fixed before this layer runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ExternalSignals {
    /// The Windows-family flag was pre-set upstream.
    pub windows: bool,
    /// A configure step ran and owns optional capability detection.
    pub configured: bool,
}

/// The capability bundle handed to every consumer that needs OS-dependent behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    pub platform: PlatformFlag,
    /// Gates uid/gid use, pid seeding, `kill`, `umask`, tilde expansion and
    /// score-file locking.
    pub multi_user: bool,
    pub path_separator: PathSeparator,
    /// `usleep` may be assumed available.
    pub have_usleep: bool,
}

impl Capabilities {
    pub const fn is_windows(&self) -> bool {
        self.platform.is_windows()
    }

    pub const fn path_sep(&self) -> &'static str {
        self.path_separator.as_str()
    }
}

/// Classifies the target. An upstream pre-set is kept; it can only add the
/// Windows-family classification, never remove a detected one.
pub fn classify(signals: &TargetSignals, external: &ExternalSignals) -> PlatformFlag {
    let mut windows = external.windows;
    if !windows && signals.is_windows_target() {
        windows = true;
    }
    PlatformFlag::from_windows(windows)
}

pub const fn derive_capabilities(platform: PlatformFlag, external: ExternalSignals) -> Capabilities {
    let multi_user = !platform.is_windows();
    Capabilities {
        platform,
        multi_user,
        path_separator: PathSeparator::select(platform),
        have_usleep: multi_user && !external.configured,
    }
}

/// Capabilities after a multi-user build met a toolchain without POSIX headers.
pub const fn demoted_capabilities() -> Capabilities {
    derive_capabilities(PlatformFlag::WindowsFamily, ExternalSignals {
        windows: true,
        configured: false,
    })
}

/// Whether `capabilities` contradict `toolchain` and must be demoted.
pub const fn needs_demotion(capabilities: &Capabilities, toolchain: Toolchain) -> bool {
    capabilities.multi_user && !toolchain.is_posix_compatible()
}

/// Full build-time outcome: the capabilities as first derived and as finally
/// reconciled against the toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub initial: Capabilities,
    pub capabilities: Capabilities,
    pub toolchain: Toolchain,
    pub demoted: bool,
}

pub fn resolve(signals: &TargetSignals, external: &ExternalSignals) -> Resolution {
    let platform = classify(signals, external);
    let initial = derive_capabilities(platform, *external);
    let toolchain = signals.toolchain();
    let demoted = needs_demotion(&initial, toolchain);
    let capabilities = if demoted {
        demoted_capabilities()
    } else {
        initial
    };

    Resolution {
        initial,
        capabilities,
        toolchain,
        demoted,
    }
}

/// Interprets an override flag. Presence means "set", so only explicit
/// negatives clear it; `None` for anything unrecognised.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(os: &str, family: &str, env: &str) -> TargetSignals {
        TargetSignals::from_cfg_values(os, family, env)
    }

    #[test]
    fn test_classify_known_targets() {
        let none = ExternalSignals::default();
        let cases = [
            (target("linux", "unix", "gnu"), PlatformFlag::UnixLike),
            (target("macos", "unix", ""), PlatformFlag::UnixLike),
            (target("freebsd", "unix", ""), PlatformFlag::UnixLike),
            (target("windows", "windows", "msvc"), PlatformFlag::WindowsFamily),
            (target("windows", "windows", "gnu"), PlatformFlag::WindowsFamily),
            (target("unknown", "wasm", ""), PlatformFlag::UnixLike),
            (target("", "", ""), PlatformFlag::UnixLike),
        ];
        for (signals, expected) in cases {
            assert_eq!(classify(&signals, &none), expected, "{signals:?}");
        }
    }

    #[test]
    fn test_classify_respects_external_preset() {
        let preset = ExternalSignals {
            windows: true,
            configured: false,
        };
        assert_eq!(
            classify(&target("linux", "unix", "gnu"), &preset),
            PlatformFlag::WindowsFamily
        );
        assert_eq!(
            classify(&target("windows", "windows", "msvc"), &preset),
            PlatformFlag::WindowsFamily
        );
    }

    #[test]
    fn test_family_list_is_comma_separated() {
        let signals = target("unknown", "unix, wasm", "");
        assert!(signals.has_family("unix"));
        assert!(signals.has_family("wasm"));
        assert!(!signals.is_windows_target());
    }

    #[test]
    fn test_path_separator_follows_platform() {
        assert_eq!(PathSeparator::select(PlatformFlag::UnixLike).as_str(), "/");
        assert_eq!(PathSeparator::select(PlatformFlag::WindowsFamily).as_str(), "\\");
        assert_eq!(PathSeparator::DEFAULT, PathSeparator::Slash);
    }

    #[test]
    fn test_have_usleep_needs_multi_user_and_no_configure() {
        for platform in [PlatformFlag::UnixLike, PlatformFlag::WindowsFamily] {
            for configured in [false, true] {
                let caps = derive_capabilities(platform, ExternalSignals {
                    windows: false,
                    configured,
                });
                assert_eq!(caps.multi_user, !platform.is_windows());
                assert_eq!(caps.have_usleep, caps.multi_user && !configured);
            }
        }
    }

    #[test]
    fn test_msvc_on_multi_user_target_is_demoted() {
        let resolution = resolve(&target("uefi", "", "msvc"), &ExternalSignals::default());
        assert!(resolution.demoted);
        assert!(resolution.initial.multi_user);
        assert_eq!(resolution.capabilities.platform, PlatformFlag::WindowsFamily);
        assert!(!resolution.capabilities.multi_user);
        assert!(!resolution.capabilities.have_usleep);
        assert_eq!(resolution.capabilities.path_sep(), "\\");
    }

    #[test]
    fn test_windows_msvc_is_not_demoted() {
        let resolution = resolve(
            &target("windows", "windows", "msvc"),
            &ExternalSignals::default(),
        );
        assert!(!resolution.demoted);
        assert_eq!(resolution.initial, resolution.capabilities);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(""), Some(true));
        assert_eq!(parse_flag(" YES "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
