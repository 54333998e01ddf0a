// Copyright (c) 2022-2023 Yuki Kishimoto
// Distributed under the MIT software license

//! Per-entity TLV layout and the generic routine that reads and writes it

use super::{Error, MAX_RELAYS};
use crate::nostr::tlv::{self, TlvRecord, TlvType};
use crate::types::{PublicKey, KEY_LENGTH};

const KIND_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    /// Zero or more, capped at [`MAX_RELAYS`]
    Repeated,
    /// Never written, skipped when read
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Special {
    /// Exactly [`KEY_LENGTH`] bytes
    Key(&'static str),
    /// UTF-8 text
    Text(&'static str),
}

impl Special {
    fn name(&self) -> &'static str {
        match self {
            Self::Key(name) | Self::Text(name) => name,
        }
    }
}

/// Which TLV records an entity carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub special: Special,
    pub relay: Presence,
    pub author: Presence,
    pub kind: Presence,
}

pub const NPROFILE: Schema = Schema {
    special: Special::Key("pubkey"),
    relay: Presence::Repeated,
    author: Presence::Ignored,
    kind: Presence::Ignored,
};

pub const NEVENT: Schema = Schema {
    special: Special::Key("id"),
    relay: Presence::Repeated,
    author: Presence::Optional,
    kind: Presence::Optional,
};

pub const NADDR: Schema = Schema {
    special: Special::Text("identifier"),
    relay: Presence::Repeated,
    author: Presence::Required,
    kind: Presence::Required,
};

pub const NRELAY: Schema = Schema {
    special: Special::Text("relay"),
    relay: Presence::Ignored,
    author: Presence::Ignored,
    kind: Presence::Ignored,
};

/// Field values of a TLV entity, independent of its kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlvFields {
    pub special: Vec<u8>,
    pub relays: Vec<String>,
    pub author: Option<PublicKey>,
    pub kind: Option<u32>,
}

impl TlvFields {
    pub fn special_text(&self, field: &'static str) -> Result<String, Error> {
        utf8(&self.special, field)
    }

    pub fn special_key(&self, field: &'static str) -> Result<[u8; KEY_LENGTH], Error> {
        fixed(&self.special, field)
    }

    pub fn required_author(&self) -> Result<PublicKey, Error> {
        self.author.ok_or(Error::MissingField("author"))
    }

    pub fn required_kind(&self) -> Result<u32, Error> {
        self.kind.ok_or(Error::MissingField("kind"))
    }
}

fn fixed<const N: usize>(value: &[u8], field: &'static str) -> Result<[u8; N], Error> {
    value.try_into().map_err(|_| Error::MalformedField {
        field,
        reason: format!("expected {N} bytes, found {}", value.len()),
    })
}

fn utf8(value: &[u8], field: &'static str) -> Result<String, Error> {
    core::str::from_utf8(value)
        .map(String::from)
        .map_err(|_| Error::MalformedField {
            field,
            reason: String::from("invalid utf-8"),
        })
}

impl Schema {
    /// Check `fields` against the schema, then write records in the order
    /// SPECIAL, RELAY*, AUTHOR, KIND
    pub fn encode(&self, fields: &TlvFields) -> Result<Vec<u8>, Error> {
        if let Special::Key(name) = self.special {
            if fields.special.len() != KEY_LENGTH {
                return Err(Error::MalformedField {
                    field: name,
                    reason: format!("expected {KEY_LENGTH} bytes, found {}", fields.special.len()),
                });
            }
        }
        if self.author == Presence::Required && fields.author.is_none() {
            return Err(Error::MissingField("author"));
        }
        if self.kind == Presence::Required && fields.kind.is_none() {
            return Err(Error::MissingField("kind"));
        }
        if self.relay == Presence::Repeated && fields.relays.len() > MAX_RELAYS {
            return Err(Error::TooManyRelays(fields.relays.len()));
        }

        let kind_bytes: Option<[u8; KIND_LENGTH]> = fields.kind.map(u32::to_be_bytes);

        let mut records: Vec<TlvRecord<'_>> = Vec::with_capacity(3 + fields.relays.len());
        records.push(TlvRecord::new(TlvType::Special, &fields.special));

        if self.relay != Presence::Ignored {
            for relay in fields.relays.iter() {
                records.push(TlvRecord::new(TlvType::Relay, relay.as_bytes()));
            }
        }

        if self.author != Presence::Ignored {
            if let Some(author) = &fields.author {
                records.push(TlvRecord::new(TlvType::Author, author.as_bytes()));
            }
        }

        if self.kind != Presence::Ignored {
            if let Some(kind) = &kind_bytes {
                records.push(TlvRecord::new(TlvType::Kind, kind));
            }
        }

        Ok(tlv::encode_all(&records)?)
    }

    /// Parse `buf` and pull out the fields the schema asks for
    pub fn decode(&self, buf: &[u8]) -> Result<TlvFields, Error> {
        let records: Vec<TlvRecord<'_>> = tlv::parse_all(buf)?;

        let special: &TlvRecord<'_> = tlv::find_first(&records, TlvType::Special)
            .ok_or(Error::MissingField(self.special.name()))?;
        match self.special {
            Special::Key(name) => {
                fixed::<KEY_LENGTH>(special.value, name)?;
            }
            Special::Text(name) => {
                utf8(special.value, name)?;
            }
        }

        let mut fields = TlvFields {
            special: special.value.to_vec(),
            ..Default::default()
        };

        if self.relay != Presence::Ignored {
            let mut relays = tlv::find_all(&records, TlvType::Relay);
            for record in relays.by_ref().take(MAX_RELAYS) {
                fields.relays.push(utf8(record.value, "relay")?);
            }
            let dropped: usize = relays.count();
            if dropped > 0 {
                log::debug!("Keeping {MAX_RELAYS} relay hints, dropped {dropped}");
            }
        }

        if self.author != Presence::Ignored {
            match tlv::find_first(&records, TlvType::Author) {
                Some(record) => {
                    let bytes: [u8; KEY_LENGTH] = fixed(record.value, "author")?;
                    fields.author = Some(PublicKey::from_bytes(bytes));
                }
                None if self.author == Presence::Required => {
                    return Err(Error::MissingField("author"))
                }
                None => (),
            }
        }

        if self.kind != Presence::Ignored {
            match tlv::find_first(&records, TlvType::Kind) {
                Some(record) => {
                    let bytes: [u8; KIND_LENGTH] = fixed(record.value, "kind")?;
                    fields.kind = Some(u32::from_be_bytes(bytes));
                }
                None if self.kind == Presence::Required => return Err(Error::MissingField("kind")),
                None => (),
            }
        }

        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_on_encode() {
        let fields = TlvFields {
            special: b"article".to_vec(),
            author: Some(PublicKey::from_bytes([1u8; 32])),
            ..Default::default()
        };
        assert_eq!(NADDR.encode(&fields).unwrap_err(), Error::MissingField("kind"));

        let fields = TlvFields {
            special: b"article".to_vec(),
            kind: Some(30023),
            ..Default::default()
        };
        assert_eq!(NADDR.encode(&fields).unwrap_err(), Error::MissingField("author"));
    }

    #[test]
    fn test_ignored_fields_not_written() {
        let fields = TlvFields {
            special: vec![3u8; 32],
            relays: vec![String::from("wss://a")],
            author: Some(PublicKey::from_bytes([1u8; 32])),
            kind: Some(1),
        };
        let buf: Vec<u8> = NPROFILE.encode(&fields).unwrap();
        // special + one relay, no author or kind
        assert_eq!(buf.len(), 2 + 32 + 2 + 7);

        let decoded: TlvFields = NPROFILE.decode(&buf).unwrap();
        assert_eq!(decoded.author, None);
        assert_eq!(decoded.kind, None);
        assert_eq!(decoded.relays, vec![String::from("wss://a")]);
    }

    #[test]
    fn test_special_key_length() {
        let fields = TlvFields {
            special: vec![3u8; 31],
            ..Default::default()
        };
        assert_eq!(
            NEVENT.encode(&fields).unwrap_err(),
            Error::MalformedField {
                field: "id",
                reason: String::from("expected 32 bytes, found 31")
            }
        );
        assert_eq!(
            NEVENT.decode(&[0, 31]).unwrap_err(),
            Error::Tlv(tlv::Error::Truncated {
                offset: 0,
                length: 31,
                remaining: 0
            })
        );

        let mut buf = vec![0, 31];
        buf.extend_from_slice(&[3u8; 31]);
        assert_eq!(
            NEVENT.decode(&buf).unwrap_err(),
            Error::MalformedField {
                field: "id",
                reason: String::from("expected 32 bytes, found 31")
            }
        );
    }

    #[test]
    fn test_missing_special() {
        // only a relay record
        let buf: Vec<u8> = vec![1, 1, b'a'];
        assert_eq!(
            NPROFILE.decode(&buf).unwrap_err(),
            Error::MissingField("pubkey")
        );
    }

    #[test]
    fn test_malformed_kind() {
        let mut buf: Vec<u8> = vec![0, 32];
        buf.extend_from_slice(&[0u8; 32]);
        buf.extend_from_slice(&[3, 2, 0, 1]);
        assert_eq!(
            NEVENT.decode(&buf).unwrap_err(),
            Error::MalformedField {
                field: "kind",
                reason: String::from("expected 4 bytes, found 2")
            }
        );
    }

    #[test]
    fn test_malformed_relay() {
        let mut buf: Vec<u8> = vec![0, 32];
        buf.extend_from_slice(&[0u8; 32]);
        buf.extend_from_slice(&[1, 2, 0xff, 0xfe]);
        assert_eq!(
            NPROFILE.decode(&buf).unwrap_err(),
            Error::MalformedField {
                field: "relay",
                reason: String::from("invalid utf-8")
            }
        );
    }

    #[test]
    fn test_malformed_identifier() {
        let mut buf: Vec<u8> = vec![0, 2, 0xc3, 0x28, 2, 32];
        buf.extend_from_slice(&[1u8; 32]);
        buf.extend_from_slice(&[3, 4, 0, 0, 0x75, 0x37]);
        assert_eq!(
            NADDR.decode(&buf).unwrap_err(),
            Error::MalformedField {
                field: "identifier",
                reason: String::from("invalid utf-8")
            }
        );
    }

    #[test]
    fn test_malformed_author() {
        let mut buf: Vec<u8> = vec![0, 32];
        buf.extend_from_slice(&[0u8; 32]);
        buf.extend_from_slice(&[2, 33]);
        buf.extend_from_slice(&[1u8; 33]);
        let err = Error::MalformedField {
            field: "author",
            reason: String::from("expected 32 bytes, found 33"),
        };
        assert_eq!(NEVENT.decode(&buf).unwrap_err(), err);

        let mut buf: Vec<u8> = vec![0, 1, b'd', 2, 33];
        buf.extend_from_slice(&[1u8; 33]);
        buf.extend_from_slice(&[3, 4, 0, 0, 0, 1]);
        assert_eq!(NADDR.decode(&buf).unwrap_err(), err);
    }

    #[test]
    fn test_relay_cap() {
        let mut buf: Vec<u8> = vec![0, 32];
        buf.extend_from_slice(&[0u8; 32]);
        for i in 0..12u8 {
            buf.extend_from_slice(&[1, 1, b'a' + i]);
        }
        let fields: TlvFields = NPROFILE.decode(&buf).unwrap();
        assert_eq!(fields.relays.len(), MAX_RELAYS);
        assert_eq!(fields.relays[0], "a");
        assert_eq!(fields.relays[9], "j");
    }
}
