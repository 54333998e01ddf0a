// Copyright (c) 2022-2023 Yuki Kishimoto
// Distributed under the MIT software license

//! NIP19
//!
//! <https://github.com/nostr-protocol/nips/blob/master/19.md>

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod schema;

use self::schema::{Schema, TlvFields};
use super::{tlv, FromBech32, ToBech32};
use crate::bech32::segwit::{self, Protocol, SEGWIT_MAX_LENGTH};
use crate::bech32::{self, Variant};
use crate::types::{Coordinate, EventId, EventPointer, ProfilePointer, PublicKey, SecretKey};

/// Maximum length of an encoded identifier
pub const MAX_ENCODING_LENGTH: usize = 256;
/// Relay hints kept per identifier
pub const MAX_RELAYS: usize = 10;

pub const PREFIX_BECH32_NOTE: &str = "note";
pub const PREFIX_BECH32_PUBLIC_KEY: &str = "npub";
pub const PREFIX_BECH32_SECRET_KEY: &str = "nsec";
pub const PREFIX_BECH32_PROFILE: &str = "nprofile";
pub const PREFIX_BECH32_EVENT: &str = "nevent";
pub const PREFIX_BECH32_RELAY: &str = "nrelay";
pub const PREFIX_BECH32_COORDINATE: &str = "naddr";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Bech32(#[from] bech32::Error),
    #[error(transparent)]
    Segwit(#[from] segwit::Error),
    #[error(transparent)]
    Tlv(#[from] tlv::Error),
    #[error("Identifiers must use the bech32 checksum, not bech32m")]
    WrongChecksumVariant,
    #[error("Unrecognized prefix: {0}")]
    UnrecognizedPrefix(String),
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Malformed {field}: {reason}")]
    MalformedField { field: &'static str, reason: String },
    #[error("Too many relays: {0}")]
    TooManyRelays(usize),
    #[error("Expected {expected}, found {found}")]
    UnexpectedKind {
        expected: IdentifierKind,
        found: IdentifierKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    Note,
    Npub,
    Nsec,
    Nprofile,
    Nevent,
    Nrelay,
    Naddr,
}

impl IdentifierKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Note => PREFIX_BECH32_NOTE,
            Self::Npub => PREFIX_BECH32_PUBLIC_KEY,
            Self::Nsec => PREFIX_BECH32_SECRET_KEY,
            Self::Nprofile => PREFIX_BECH32_PROFILE,
            Self::Nevent => PREFIX_BECH32_EVENT,
            Self::Nrelay => PREFIX_BECH32_RELAY,
            Self::Naddr => PREFIX_BECH32_COORDINATE,
        }
    }

    /// Note, npub and nsec carry a raw 32-byte payload
    pub fn is_bare(&self) -> bool {
        matches!(self, Self::Note | Self::Npub | Self::Nsec)
    }

    fn schema(&self) -> Option<&'static Schema> {
        match self {
            Self::Nprofile => Some(&schema::NPROFILE),
            Self::Nevent => Some(&schema::NEVENT),
            Self::Naddr => Some(&schema::NADDR),
            Self::Nrelay => Some(&schema::NRELAY),
            Self::Note | Self::Npub | Self::Nsec => None,
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

impl FromStr for IdentifierKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PREFIX_BECH32_NOTE => Ok(Self::Note),
            PREFIX_BECH32_PUBLIC_KEY => Ok(Self::Npub),
            PREFIX_BECH32_SECRET_KEY => Ok(Self::Nsec),
            PREFIX_BECH32_PROFILE => Ok(Self::Nprofile),
            PREFIX_BECH32_EVENT => Ok(Self::Nevent),
            PREFIX_BECH32_RELAY => Ok(Self::Nrelay),
            PREFIX_BECH32_COORDINATE => Ok(Self::Naddr),
            other => Err(Error::UnrecognizedPrefix(other.to_string())),
        }
    }
}

/// A decoded nostr identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Note(EventId),
    Npub(PublicKey),
    Nsec(SecretKey),
    Nprofile(ProfilePointer),
    Nevent(EventPointer),
    Naddr(Coordinate),
    Nrelay(String),
}

impl Identifier {
    pub fn kind(&self) -> IdentifierKind {
        match self {
            Self::Note(..) => IdentifierKind::Note,
            Self::Npub(..) => IdentifierKind::Npub,
            Self::Nsec(..) => IdentifierKind::Nsec,
            Self::Nprofile(..) => IdentifierKind::Nprofile,
            Self::Nevent(..) => IdentifierKind::Nevent,
            Self::Naddr(..) => IdentifierKind::Naddr,
            Self::Nrelay(..) => IdentifierKind::Nrelay,
        }
    }

    fn bare_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Note(id) => Some(id.as_bytes()),
            Self::Npub(pk) => Some(pk.as_bytes()),
            Self::Nsec(sk) => Some(sk.as_bytes()),
            _ => None,
        }
    }

    fn to_tlv_fields(&self) -> Option<TlvFields> {
        match self {
            Self::Nprofile(p) => Some(TlvFields {
                special: p.public_key.as_bytes().to_vec(),
                relays: p.relays.clone(),
                ..Default::default()
            }),
            Self::Nevent(e) => Some(TlvFields {
                special: e.id.as_bytes().to_vec(),
                relays: e.relays.clone(),
                author: e.author,
                kind: e.kind,
            }),
            Self::Naddr(c) => Some(TlvFields {
                special: c.identifier.as_bytes().to_vec(),
                relays: c.relays.clone(),
                author: Some(c.public_key),
                kind: Some(c.kind),
            }),
            Self::Nrelay(url) => Some(TlvFields {
                special: url.as_bytes().to_vec(),
                ..Default::default()
            }),
            Self::Note(..) | Self::Npub(..) | Self::Nsec(..) => None,
        }
    }

    fn from_tlv_fields(kind: IdentifierKind, fields: TlvFields) -> Result<Self, Error> {
        Ok(match kind {
            IdentifierKind::Nprofile => Self::Nprofile(ProfilePointer {
                public_key: PublicKey::from_bytes(fields.special_key("pubkey")?),
                relays: fields.relays,
            }),
            IdentifierKind::Nevent => Self::Nevent(EventPointer {
                id: EventId::from_bytes(fields.special_key("id")?),
                author: fields.author,
                kind: fields.kind,
                relays: fields.relays,
            }),
            IdentifierKind::Naddr => Self::Naddr(Coordinate {
                kind: fields.required_kind()?,
                public_key: fields.required_author()?,
                identifier: fields.special_text("identifier")?,
                relays: fields.relays,
            }),
            IdentifierKind::Nrelay => Self::Nrelay(fields.special_text("relay")?),
            IdentifierKind::Note | IdentifierKind::Npub | IdentifierKind::Nsec => {
                return Err(Error::UnrecognizedPrefix(kind.to_string()))
            }
        })
    }

    fn from_bare_bytes(kind: IdentifierKind, data: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; 32] = data.try_into().map_err(|_| Error::MalformedField {
            field: kind.prefix(),
            reason: format!("expected 32 bytes, found {}", data.len()),
        })?;
        Ok(match kind {
            IdentifierKind::Note => Self::Note(EventId::from_bytes(bytes)),
            IdentifierKind::Npub => Self::Npub(PublicKey::from_bytes(bytes)),
            IdentifierKind::Nsec => Self::Nsec(SecretKey::from_bytes(bytes)),
            _ => return Err(Error::UnrecognizedPrefix(kind.to_string())),
        })
    }
}

/// Encode an identifier as a bech32 string
pub fn encode(identifier: &Identifier) -> Result<String, Error> {
    let kind: IdentifierKind = identifier.kind();
    let hrp: &str = kind.prefix();

    if let Some(bytes) = identifier.bare_bytes() {
        return Ok(segwit::encode(hrp, 0, bytes, Protocol::Nostr)?);
    }

    let (schema, fields) = match (kind.schema(), identifier.to_tlv_fields()) {
        (Some(schema), Some(fields)) => (schema, fields),
        _ => return Err(Error::UnrecognizedPrefix(hrp.to_string())),
    };
    let buf: Vec<u8> = schema.encode(&fields)?;
    let words: Vec<u8> = bech32::convert_bits(&buf, 8, 5, true)?;
    Ok(bech32::encode(
        hrp,
        &words,
        Variant::Bech32,
        MAX_ENCODING_LENGTH,
    )?)
}

/// Decode any of the seven identifier kinds
pub fn decode(s: &str) -> Result<Identifier, Error> {
    let (hrp, words, variant) = bech32::decode(s, MAX_ENCODING_LENGTH)?;
    if variant != Variant::Bech32 {
        return Err(Error::WrongChecksumVariant);
    }

    let data: Vec<u8> = bech32::convert_bits(&words, 5, 8, false)?;
    let kind: IdentifierKind = IdentifierKind::from_str(&hrp)?;
    if kind.is_bare() && s.len() > SEGWIT_MAX_LENGTH {
        return Err(Error::Bech32(bech32::Error::LengthExceeded {
            len: s.len(),
            max: SEGWIT_MAX_LENGTH,
        }));
    }
    log::trace!("Decoding {kind} with {} bytes of payload", data.len());

    match kind.schema() {
        Some(schema) => Identifier::from_tlv_fields(kind, schema.decode(&data)?),
        None => Identifier::from_bare_bytes(kind, &data),
    }
}

macro_rules! impl_bech32 {
    ($ty:ty, $variant:ident) => {
        impl ToBech32 for $ty {
            type Err = Error;

            fn to_bech32(&self) -> Result<String, Self::Err> {
                encode(&Identifier::$variant(self.clone()))
            }
        }

        impl FromBech32 for $ty {
            type Err = Error;

            fn from_bech32<S>(s: S) -> Result<Self, Self::Err>
            where
                S: AsRef<str>,
            {
                match decode(s.as_ref())? {
                    Identifier::$variant(value) => Ok(value),
                    other => Err(Error::UnexpectedKind {
                        expected: IdentifierKind::$variant,
                        found: other.kind(),
                    }),
                }
            }
        }
    };
}

impl_bech32!(EventId, Note);
impl_bech32!(PublicKey, Npub);
impl_bech32!(SecretKey, Nsec);
impl_bech32!(ProfilePointer, Nprofile);
impl_bech32!(EventPointer, Nevent);
impl_bech32!(Coordinate, Naddr);

impl ToBech32 for Identifier {
    type Err = Error;

    fn to_bech32(&self) -> Result<String, Self::Err> {
        encode(self)
    }
}

impl FromBech32 for Identifier {
    type Err = Error;

    fn from_bech32<S>(s: S) -> Result<Self, Self::Err>
    where
        S: AsRef<str>,
    {
        decode(s.as_ref())
    }
}
