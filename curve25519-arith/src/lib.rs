// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg, doc_cfg_hide))]
#![cfg_attr(docsrs, doc(cfg_hide(docsrs)))]
#![doc = include_str!("../README.md")]
#![warn(
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

#[cfg(feature = "alloc")]
#[allow(unused_imports)]
#[macro_use]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

#[cfg(feature = "digest")]
pub use digest;

// Operator forwarding macros, needed by every module below.
#[macro_use]
pub(crate) mod macros;

// Public API.

// Integers modulo the prime group order ℓ
pub mod scalar;

// The `u`-line of the Montgomery form
pub mod montgomery;

// The twisted Edwards form and its encoding
pub mod edwards;

// The prime-order Ristretto group
pub mod ristretto;

// Basepoints, torsion points and curve parameters
pub mod constants;

// Traits shared by the point types
pub mod traits;

// Decoding errors
pub mod errors;

// Crate internals.

// GF(2^255 - 19)
pub(crate) mod field;

// Point models and multiplication algorithms
pub(crate) mod backend;

// Constant-time table lookups
pub(crate) mod window;

// Fixed-width tuple (de)serialization
#[cfg(feature = "serde")]
pub(crate) mod serde_fixed;

pub use crate::{
    edwards::EdwardsPoint, errors::Error, montgomery::MontgomeryPoint, ristretto::RistrettoPoint,
    scalar::Scalar,
};

#[cfg(curve25519_arith_diagnostics = "build")]
mod diagnostics;
