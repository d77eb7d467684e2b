// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Serde glue shared by every 32-byte wire type.
//!
//! Values are written as a fixed-length tuple of 32 `u8`s, so binary
//! formats such as bincode emit exactly the wire encoding with no length
//! prefix.  Decoders read the tuple back and hand the bytes to the
//! type's own validating constructor.

use core::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserializer, Serializer};

pub(crate) fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut tuple = serializer.serialize_tuple(32)?;
    for byte in bytes {
        tuple.serialize_element(byte)?;
    }
    tuple.end()
}

pub(crate) fn deserialize<'de, D>(deserializer: D, what: &'static str) -> Result<[u8; 32], D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_tuple(32, FixedBytes { what })
}

struct FixedBytes {
    what: &'static str,
}

impl<'de> Visitor<'de> for FixedBytes {
    type Value = [u8; 32];

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "32 bytes encoding {}", self.what)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<[u8; 32], A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut bytes = [0u8; 32];
        for (read, slot) in bytes.iter_mut().enumerate() {
            *slot = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(read, &self))?;
        }
        Ok(bytes)
    }
}
