// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Errors which may occur when decoding points and scalars from their
//! wire formats.
//!
//! Arithmetic on values that already exist never fails; only the
//! boundary between bytes and group elements does.

use core::fmt;
use core::fmt::Display;

/// Decoding errors.
///
/// This error may arise due to:
///
/// * Being given bytes with a length different to what was expected.
///
/// * Bytes which are not the encoding of any point in the group being
///   decoded into (no square root exists, or the Ristretto encoding is
///   non-canonical or negative).
///
/// * A Montgomery `u`-coordinate which has no Edwards image, because it
///   lies on the quadratic twist.
///
/// * A scalar encoding which is not reduced modulo \\( \ell \\).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// An error in the length of bytes handed to a constructor.
    ///
    /// `name` is the type which returned the error and `length` the
    /// size in bytes its constructor expects.
    BytesLength {
        /// Name of the type being decoded.
        name: &'static str,
        /// Expected input length in bytes.
        length: usize,
    },
    /// The bytes do not encode a point of the requested group.
    PointDecompression,
    /// The Montgomery `u`-coordinate has no Edwards counterpart.
    PointOnTwist,
    /// The scalar encoding is not the canonical representative mod \\( \ell \\).
    NonCanonicalScalar,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::BytesLength { name: n, length: l } => {
                write!(f, "{} must be {} bytes in length", n, l)
            }
            Error::PointDecompression => write!(f, "Cannot decompress point"),
            Error::PointOnTwist => write!(f, "Montgomery point lies on the twist"),
            Error::NonCanonicalScalar => write!(f, "Scalar is not reduced modulo the group order"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod test {
    use super::Error;
    use std::string::ToString;

    #[test]
    fn display_names_the_type_and_length() {
        let err = Error::BytesLength {
            name: "CompressedRistretto",
            length: 32,
        };
        assert_eq!(
            err.to_string(),
            "CompressedRistretto must be 32 bytes in length"
        );
    }
}
