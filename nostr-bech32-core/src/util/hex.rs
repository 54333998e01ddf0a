// Copyright (c) 2022-2023 Yuki Kishimoto
// Distributed under the MIT software license

//! Hex

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An invalid character was found
    #[error("Invalid character {c} at position {index}")]
    InvalidHexCharacter { c: char, index: usize },
    /// A hex string's length needs to be even, as two digits correspond to
    /// one byte.
    #[error("Odd number of digits")]
    OddLength,
    /// Decoded to the wrong number of bytes
    #[error("Expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },
}

const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

/// Lower-case hex
pub fn encode<T>(data: T) -> String
where
    T: AsRef<[u8]>,
{
    let bytes: &[u8] = data.as_ref();
    let mut hex: String = String::with_capacity(2 * bytes.len());
    for b in bytes.iter() {
        hex.push(HEX_CHARS[(b >> 4) as usize] as char);
        hex.push(HEX_CHARS[(b & 0x0f) as usize] as char);
    }
    hex
}

const fn val(c: u8, idx: usize) -> Result<u8, Error> {
    match c {
        b'A'..=b'F' => Ok(c - b'A' + 10),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'0'..=b'9' => Ok(c - b'0'),
        _ => Err(Error::InvalidHexCharacter {
            c: c as char,
            index: idx,
        }),
    }
}

pub fn decode<T>(hex: T) -> Result<Vec<u8>, Error>
where
    T: AsRef<[u8]>,
{
    let hex: &[u8] = hex.as_ref();
    if hex.len() % 2 != 0 {
        return Err(Error::OddLength);
    }
    hex.chunks(2)
        .enumerate()
        .map(|(i, pair)| Ok(val(pair[0], 2 * i)? << 4 | val(pair[1], 2 * i + 1)?))
        .collect()
}

/// Decode into a fixed-size array, such as a 32-byte key or event id
pub fn decode_to_array<T, const N: usize>(hex: T) -> Result<[u8; N], Error>
where
    T: AsRef<[u8]>,
{
    let bytes: Vec<u8> = decode(hex)?;
    bytes.try_into().map_err(|bytes: Vec<u8>| Error::InvalidLength {
        expected: N,
        found: bytes.len(),
    })
}
