// Copyright (c) 2022-2023 Yuki Kishimoto
// Distributed under the MIT software license

//! Type-Length-Value records carried by `nprofile`, `nevent`, `naddr` and `nrelay`

/// Records read from a single buffer, anything after is ignored
pub const MAX_TLVS: usize = 16;

const HEADER_LENGTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Unknown TLV type: {0}")]
    UnknownType(u8),
    #[error("Truncated TLV at offset {offset}: length {length}, {remaining} bytes remaining")]
    Truncated {
        offset: usize,
        length: usize,
        remaining: usize,
    },
    #[error("Empty TLV sequence")]
    Empty,
    #[error("TLV value too long: {0} bytes")]
    ValueTooLong(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TlvType {
    /// Primary payload: event id, pubkey, `d` tag or relay url depending on the entity
    Special = 0,
    Relay = 1,
    Author = 2,
    Kind = 3,
}

impl TlvType {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for TlvType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Special),
            1 => Ok(Self::Relay),
            2 => Ok(Self::Author),
            3 => Ok(Self::Kind),
            t => Err(Error::UnknownType(t)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvRecord<'a> {
    pub ty: TlvType,
    pub value: &'a [u8],
}

impl<'a> TlvRecord<'a> {
    pub fn new(ty: TlvType, value: &'a [u8]) -> Self {
        Self { ty, value }
    }
}

/// Parse every record in `buf`, up to [`MAX_TLVS`]
pub fn parse_all(buf: &[u8]) -> Result<Vec<TlvRecord<'_>>, Error> {
    let mut records: Vec<TlvRecord<'_>> = Vec::new();
    let mut offset: usize = 0;

    while offset < buf.len() && records.len() < MAX_TLVS {
        let ty: TlvType = TlvType::try_from(buf[offset])?;

        let length: usize = match buf.get(offset + 1) {
            Some(len) => *len as usize,
            None => {
                return Err(Error::Truncated {
                    offset,
                    length: 0,
                    remaining: 0,
                })
            }
        };

        let start: usize = offset + HEADER_LENGTH;
        let remaining: usize = buf.len() - start;
        let value: &[u8] = buf.get(start..start + length).ok_or(Error::Truncated {
            offset,
            length,
            remaining,
        })?;

        records.push(TlvRecord::new(ty, value));
        offset = start + length;
    }

    if offset < buf.len() {
        log::debug!(
            "TLV limit of {MAX_TLVS} records reached, ignoring {} trailing bytes",
            buf.len() - offset
        );
    }

    if records.is_empty() {
        return Err(Error::Empty);
    }

    Ok(records)
}

/// First record of type `ty`
pub fn find_first<'r, 'a>(records: &'r [TlvRecord<'a>], ty: TlvType) -> Option<&'r TlvRecord<'a>> {
    records.iter().find(|r| r.ty == ty)
}

/// Every record of type `ty`, in buffer order
pub fn find_all<'r, 'a>(
    records: &'r [TlvRecord<'a>],
    ty: TlvType,
) -> impl Iterator<Item = &'r TlvRecord<'a>> + 'r {
    records.iter().filter(move |r| r.ty == ty)
}

/// Concatenate records in the given order
pub fn encode_all(records: &[TlvRecord<'_>]) -> Result<Vec<u8>, Error> {
    let size: usize = records
        .iter()
        .map(|r| HEADER_LENGTH + r.value.len())
        .sum();
    let mut buf: Vec<u8> = Vec::with_capacity(size);

    for record in records.iter() {
        let length: u8 = u8::try_from(record.value.len())
            .map_err(|_| Error::ValueTooLong(record.value.len()))?;
        buf.push(record.ty.as_u8());
        buf.push(length);
        buf.extend_from_slice(record.value);
    }

    Ok(buf)
}
