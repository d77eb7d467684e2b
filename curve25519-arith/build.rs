//! This selects the curve25519_arith_bits and curve25519_arith_backend cfgs

#![deny(clippy::unwrap_used, dead_code)]

use rustc_version::{version_meta, Channel};

#[derive(PartialEq, Debug)]
enum ArithBits {
    Arith32,
    Arith64,
}

#[derive(PartialEq, Debug)]
enum ArithBackend {
    Serial,
    Parallel,
}

fn main() {
    println!("cargo:rustc-check-cfg=cfg(curve25519_arith_bits, values(\"32\", \"64\"))");
    println!("cargo:rustc-check-cfg=cfg(curve25519_arith_backend, values(\"serial\", \"parallel\"))");
    println!("cargo:rustc-check-cfg=cfg(curve25519_arith_diagnostics, values(\"build\"))");
    println!("cargo:rustc-check-cfg=cfg(nightly)");
    println!("cargo:rerun-if-env-changed=CURVE25519_ARITH_BUILD_DIAGNOSTICS");

    let target_arch = match std::env::var("CARGO_CFG_TARGET_ARCH") {
        Ok(arch) => arch,
        _ => "".to_string(),
    };

    let bits = match std::env::var("CARGO_CFG_CURVE25519_ARITH_BITS").as_deref() {
        Ok("32") => ArithBits::Arith32,
        Ok("64") => ArithBits::Arith64,
        _ => deterministic::determine_bits(&target_arch),
    };

    let backend = match std::env::var("CARGO_CFG_CURVE25519_ARITH_BACKEND").as_deref() {
        Ok("parallel") => ArithBackend::Parallel,
        _ => ArithBackend::Serial,
    };

    match bits {
        ArithBits::Arith64 => println!("cargo:rustc-cfg=curve25519_arith_bits=\"64\""),
        ArithBits::Arith32 => println!("cargo:rustc-cfg=curve25519_arith_bits=\"32\""),
    }

    match backend {
        ArithBackend::Serial => println!("cargo:rustc-cfg=curve25519_arith_backend=\"serial\""),
        ArithBackend::Parallel => {
            println!("cargo:rustc-cfg=curve25519_arith_backend=\"parallel\"")
        }
    }

    if let Ok(Channel::Nightly) = version_meta().map(|meta| meta.channel) {
        println!("cargo:rustc-cfg=nightly");
    }

    if std::env::var("CURVE25519_ARITH_BUILD_DIAGNOSTICS").is_ok() {
        println!(
            "cargo:warning=curve25519-arith: bits {:?}, backend {:?}, target_arch {:?}",
            bits, backend, target_arch
        );
    }
}

// Deterministic cfg(curve25519_arith_bits) when this is not explicitly set.
mod deterministic {

    use super::*;

    // Custom Rust non-cargo build tooling needs to set CARGO_CFG_TARGET_POINTER_WIDTH
    static ERR_MSG_NO_POINTER_WIDTH: &str =
        "Standard Cargo TARGET_POINTER_WIDTH environment variable is not set.";

    // When either non-32 or 64 TARGET_POINTER_WIDTH detected
    static INFO_MSG_UNKNOWN_POINTER_WIDTH: &str = "Unknown TARGET_POINTER_WIDTH detected.";

    // Warning when the curve25519_arith_bits cannot be determined
    fn determine_bits_warning(cause: &str) {
        println!("cargo:warning=\"Defaulting to curve25519_arith_bits=32: {cause}\"");
    }

    // Determine the curve25519_arith_bits based on Rust standard TARGET triplet
    pub(super) fn determine_bits(target_arch: &str) -> ArithBits {
        let target_pointer_width = match std::env::var("CARGO_CFG_TARGET_POINTER_WIDTH") {
            Ok(pw) => pw,
            Err(_) => {
                determine_bits_warning(ERR_MSG_NO_POINTER_WIDTH);
                return ArithBits::Arith32;
            }
        };

        #[allow(clippy::match_single_binding)]
        match &target_arch {
            // 64-bit limb products overflow on 32-bit arm
            &"arm" => ArithBits::Arith32,

            _ => match target_pointer_width.as_ref() {
                "64" => ArithBits::Arith64,
                "32" => ArithBits::Arith32,
                _ => {
                    determine_bits_warning(INFO_MSG_UNKNOWN_POINTER_WIDTH);
                    ArithBits::Arith32
                }
            },
        }
    }
}
