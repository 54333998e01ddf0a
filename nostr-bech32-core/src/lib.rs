// Copyright (c) 2022-2023 Yuki Kishimoto
// Distributed under the MIT software license

#![doc = include_str!("../README.md")]

#[cfg(feature = "secp256k1")]
pub use secp256k1;

pub mod bech32;
pub mod error;
pub mod fields;
pub mod nostr;
pub mod types;
pub mod util;

pub use self::error::{Error, Result};
pub use self::fields::{decode_identifier, encode_identifier, Fields};
pub use self::nostr::nip19::{self, Identifier, IdentifierKind};
pub use self::nostr::{FromBech32, ToBech32};
pub use self::types::{Coordinate, EventId, EventPointer, ProfilePointer, PublicKey, SecretKey};
