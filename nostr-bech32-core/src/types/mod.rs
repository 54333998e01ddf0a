// Copyright (c) 2022-2023 Yuki Kishimoto
// Distributed under the MIT software license

pub mod keys;
pub mod pointer;

pub use self::keys::{PublicKey, SecretKey};
pub use self::pointer::{Coordinate, EventPointer, ProfilePointer};
use crate::util::hex;

/// Length of keys and event ids
pub const KEY_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Hex(#[from] hex::Error),
    #[error("Expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },
}

pub(crate) fn to_array(slice: &[u8]) -> Result<[u8; KEY_LENGTH], Error> {
    slice.try_into().map_err(|_| Error::InvalidLength {
        expected: KEY_LENGTH,
        found: slice.len(),
    })
}

/// Hex (de)serialization and parsing shared by the public 32-byte types
macro_rules! impl_public_bytes {
    ($name:ident) => {
        impl $name {
            pub fn from_slice(slice: &[u8]) -> Result<Self, $crate::types::Error> {
                Ok(Self($crate::types::to_array(slice)?))
            }

            pub fn from_hex<S>(hex: S) -> Result<Self, $crate::types::Error>
            where
                S: AsRef<str>,
            {
                Ok(Self($crate::util::hex::decode_to_array(hex.as_ref())?))
            }

            pub fn to_hex(&self) -> String {
                $crate::util::hex::encode(self.0)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let hex: String = ::serde::Deserialize::deserialize(deserializer)?;
                Self::from_hex(hex).map_err(::serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use impl_public_bytes;

/// Event id (sha256 of the serialized event)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId([u8; KEY_LENGTH]);

impl EventId {
    pub const fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

impl_public_bytes!(EventId);
