// Copyright (c) 2022-2023 Yuki Kishimoto
// Distributed under the MIT software license

//! Segwit-style framing
//!
//! A witness version word followed by a bit-converted program. Nostr keys
//! and ids reuse the bit packing but leave the version word out.

use super::{Error as Bech32Error, Variant};

/// Maximum length of a segwit-style string
pub const SEGWIT_MAX_LENGTH: usize = 90;
pub const MAX_WITNESS_VERSION: u8 = 16;

const MIN_PROGRAM_LENGTH: usize = 2;
const MAX_PROGRAM_LENGTH: usize = 40;
const MAX_DATA_LENGTH: usize = 65;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Bech32(#[from] Bech32Error),
    #[error("Invalid witness version: {0}")]
    InvalidVersion(u8),
    #[error("Invalid program length: {0}")]
    InvalidProgramLength(usize),
    #[error("Invalid data length: {0}")]
    InvalidDataLength(usize),
    #[error("Human-readable part mismatch: expected {expected}, found {found}")]
    HrpMismatch { expected: String, found: String },
    #[error("Checksum variant does not match witness version")]
    EncodingKindMismatch,
}

/// Whether the version word is part of the data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Bitcoin,
    /// Bare program, no version word. Always behaves as version 0.
    Nostr,
}

fn variant_for(version: u8) -> Variant {
    if version == 0 {
        Variant::Bech32
    } else {
        Variant::Bech32m
    }
}

fn check_program(version: u8, program: &[u8]) -> Result<(), Error> {
    let len: usize = program.len();
    if !(MIN_PROGRAM_LENGTH..=MAX_PROGRAM_LENGTH).contains(&len) {
        return Err(Error::InvalidProgramLength(len));
    }
    if version == 0 && len != 20 && len != 32 {
        return Err(Error::InvalidProgramLength(len));
    }
    Ok(())
}

pub fn encode(hrp: &str, version: u8, program: &[u8], protocol: Protocol) -> Result<String, Error> {
    let version: u8 = match protocol {
        Protocol::Bitcoin => version,
        Protocol::Nostr => 0,
    };

    if version > MAX_WITNESS_VERSION {
        return Err(Error::InvalidVersion(version));
    }
    check_program(version, program)?;

    let mut words: Vec<u8> = Vec::with_capacity(1 + (program.len() * 8 + 4) / 5);
    if protocol == Protocol::Bitcoin {
        words.push(version);
    }
    words.extend(super::convert_bits(program, 8, 5, true)?);

    Ok(super::encode(
        hrp,
        &words,
        variant_for(version),
        SEGWIT_MAX_LENGTH,
    )?)
}

/// Decode `address`, which must carry the human-readable part `hrp`.
///
/// Returns the witness version (always 0 for [`Protocol::Nostr`]) and the program.
pub fn decode(hrp: &str, address: &str, protocol: Protocol) -> Result<(u8, Vec<u8>), Error> {
    let (found, words, variant) = super::decode(address, SEGWIT_MAX_LENGTH)?;

    if !found.eq_ignore_ascii_case(hrp) {
        return Err(Error::HrpMismatch {
            expected: hrp.to_string(),
            found,
        });
    }

    if words.is_empty() || words.len() > MAX_DATA_LENGTH {
        return Err(Error::InvalidDataLength(words.len()));
    }

    let (version, data): (u8, &[u8]) = match protocol {
        Protocol::Bitcoin => (words[0], &words[1..]),
        Protocol::Nostr => (0, &words),
    };

    if version > MAX_WITNESS_VERSION {
        return Err(Error::InvalidVersion(version));
    }
    if variant != variant_for(version) {
        return Err(Error::EncodingKindMismatch);
    }

    let program: Vec<u8> = super::convert_bits(data, 5, 8, false)?;
    check_program(version, &program)?;

    Ok((version, program))
}
