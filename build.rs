//! platform-shim build script.
//!
//! Resolves the platform classification for the *target* (not the host)
//! and publishes it as `cfg` flags, so every flag and constant in the
//! library is fixed at compile time.

#[allow(dead_code)]
#[path = "src/platform/resolve.rs"]
mod resolve;

use resolve::{ExternalSignals, TargetSignals};

const CFG_FLAGS: &[&str] = &[
    "shim_windows",
    "shim_set_uid",
    "shim_have_usleep",
    "shim_posix",
    "shim_demoted",
];

// Constant overrides are read by the library through `option_env!`; listing
// them here makes cargo rebuild when one changes.
const CONSTANT_OVERRIDES: &[&str] = &[
    "PLATFORM_SHIM_SEEK_SET",
    "PLATFORM_SHIM_SEEK_CUR",
    "PLATFORM_SHIM_SEEK_END",
    "PLATFORM_SHIM_F_UNLCK",
    "PLATFORM_SHIM_F_RDLCK",
    "PLATFORM_SHIM_F_WRLCK",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/platform/resolve.rs");
    println!("cargo:rerun-if-env-changed={}", resolve::ENV_WINDOWS);
    println!("cargo:rerun-if-env-changed={}", resolve::ENV_CONFIGURED);
    for key in CONSTANT_OVERRIDES {
        println!("cargo:rerun-if-env-changed={key}");
    }
    for flag in CFG_FLAGS {
        println!("cargo:rustc-check-cfg=cfg({flag})");
    }

    let signals = TargetSignals::from_cfg_values(
        &cargo_env("CARGO_CFG_TARGET_OS"),
        &cargo_env("CARGO_CFG_TARGET_FAMILY"),
        &cargo_env("CARGO_CFG_TARGET_ENV"),
    );
    let external = ExternalSignals {
        windows: override_flag(resolve::ENV_WINDOWS),
        configured: override_flag(resolve::ENV_CONFIGURED),
    };
    let resolution = resolve::resolve(&signals, &external);
    let capabilities = resolution.capabilities;

    if resolution.demoted {
        println!(
            "cargo:warning=multi-user target {:?} uses the {} toolchain; \
             building as Windows-family without POSIX facilities",
            signals.os,
            resolution.toolchain.as_str()
        );
        println!("cargo:rustc-cfg=shim_demoted");
    }
    if capabilities.is_windows() {
        println!("cargo:rustc-cfg=shim_windows");
    }
    if capabilities.multi_user {
        println!("cargo:rustc-cfg=shim_set_uid");
        if signals.has_family("unix") {
            println!("cargo:rustc-cfg=shim_posix");
        }
    }
    if capabilities.have_usleep {
        println!("cargo:rustc-cfg=shim_have_usleep");
    }
}

fn cargo_env(key: &str) -> String {
    std::env::var(key).unwrap_or_default()
}

/// An unset variable means "absent"; a malformed one is reported and ignored.
fn override_flag(key: &str) -> bool {
    let Ok(value) = std::env::var(key) else {
        return false;
    };
    match resolve::parse_flag(&value) {
        Some(flag) => flag,
        None => {
            println!("cargo:warning=ignoring {key}={value:?}: expected a boolean flag");
            false
        }
    }
}
