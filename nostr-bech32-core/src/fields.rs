// Copyright (c) 2022-2023 Yuki Kishimoto
// Distributed under the MIT software license

//! Hex-string view of an identifier
//!
//! Useful for callers that keep ids and keys as hex (JSON, CLI arguments)
//! and don't want to deal with the typed pointers.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::nostr::nip19::{self, Error as Nip19Error, Identifier, IdentifierKind};
use crate::types::{Coordinate, EventId, EventPointer, ProfilePointer, PublicKey, SecretKey};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fields {
    /// Event id, public key or secret key, depending on the kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<u32>,
    /// `d` tag for naddr, relay url for nrelay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relays: Vec<String>,
}

impl Fields {
    pub fn note<S>(id: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            hex: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn nevent<S>(id: S, author: Option<S>, kind: Option<u32>, relays: Vec<String>) -> Self
    where
        S: Into<String>,
    {
        Self {
            hex: Some(id.into()),
            author: author.map(|a| a.into()),
            kind,
            relays,
            ..Default::default()
        }
    }

    /// Coordinate of an addressable event. The identifier is the value of
    /// the first `d` tag, or empty when the event has none.
    pub fn naddr_from_tags<S>(
        kind: u32,
        public_key: S,
        tags: &[Vec<String>],
        relays: Vec<String>,
    ) -> Self
    where
        S: Into<String>,
    {
        let identifier: String = tags
            .iter()
            .find(|tag| tag.len() >= 2 && tag[0] == "d")
            .map(|tag| tag[1].clone())
            .unwrap_or_default();
        Self {
            author: Some(public_key.into()),
            kind: Some(kind),
            identifier: Some(identifier),
            relays,
            ..Default::default()
        }
    }

    fn required_hex(&self) -> Result<&str> {
        Ok(self.hex.as_deref().ok_or(Nip19Error::MissingField("hex"))?)
    }

    fn required_author(&self) -> Result<PublicKey> {
        let author: &str = self
            .author
            .as_deref()
            .ok_or(Nip19Error::MissingField("author"))?;
        Ok(PublicKey::from_hex(author)?)
    }

    /// Build the typed identifier of `kind` from these fields
    pub fn to_identifier(&self, kind: IdentifierKind) -> Result<Identifier> {
        Ok(match kind {
            IdentifierKind::Note => Identifier::Note(EventId::from_hex(self.required_hex()?)?),
            IdentifierKind::Npub => Identifier::Npub(PublicKey::from_hex(self.required_hex()?)?),
            IdentifierKind::Nsec => Identifier::Nsec(SecretKey::from_hex(self.required_hex()?)?),
            IdentifierKind::Nprofile => {
                let public_key = PublicKey::from_hex(self.required_hex()?)?;
                Identifier::Nprofile(ProfilePointer::new(public_key).relays(self.relays.clone()))
            }
            IdentifierKind::Nevent => {
                let mut pointer = EventPointer::new(EventId::from_hex(self.required_hex()?)?)
                    .relays(self.relays.clone());
                if self.author.is_some() {
                    pointer.author = Some(self.required_author()?);
                }
                pointer.kind = self.kind;
                Identifier::Nevent(pointer)
            }
            IdentifierKind::Naddr => {
                let kind: u32 = self.kind.ok_or(Nip19Error::MissingField("kind"))?;
                let identifier: &str = self.identifier.as_deref().unwrap_or_default();
                let coordinate = Coordinate::new(kind, self.required_author()?, identifier)
                    .relays(self.relays.clone());
                Identifier::Naddr(coordinate)
            }
            IdentifierKind::Nrelay => {
                let url: &str = self
                    .identifier
                    .as_deref()
                    .ok_or(Nip19Error::MissingField("relay"))?;
                Identifier::Nrelay(url.to_string())
            }
        })
    }
}

impl From<&Identifier> for Fields {
    fn from(identifier: &Identifier) -> Self {
        match identifier {
            Identifier::Note(id) => Self::note(id.to_hex()),
            Identifier::Npub(pk) => Self {
                hex: Some(pk.to_hex()),
                ..Default::default()
            },
            Identifier::Nsec(sk) => Self {
                hex: Some(sk.to_secret_hex()),
                ..Default::default()
            },
            Identifier::Nprofile(p) => Self {
                hex: Some(p.public_key.to_hex()),
                relays: p.relays.clone(),
                ..Default::default()
            },
            Identifier::Nevent(e) => Self {
                hex: Some(e.id.to_hex()),
                author: e.author.map(|a| a.to_hex()),
                kind: e.kind,
                relays: e.relays.clone(),
                ..Default::default()
            },
            Identifier::Naddr(c) => Self {
                author: Some(c.public_key.to_hex()),
                kind: Some(c.kind),
                identifier: Some(c.identifier.clone()),
                relays: c.relays.clone(),
                ..Default::default()
            },
            Identifier::Nrelay(url) => Self {
                identifier: Some(url.clone()),
                ..Default::default()
            },
        }
    }
}

/// Encode `fields` as an identifier of `kind`
pub fn encode_identifier(kind: IdentifierKind, fields: &Fields) -> Result<String> {
    let identifier: Identifier = fields.to_identifier(kind)?;
    Ok(nip19::encode(&identifier)?)
}

/// Decode any identifier into its kind and hex fields
pub fn decode_identifier(s: &str) -> Result<(IdentifierKind, Fields)> {
    let identifier: Identifier = nip19::decode(s)?;
    Ok((identifier.kind(), Fields::from(&identifier)))
}
