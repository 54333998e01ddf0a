// Copyright (c) 2022-2023 Yuki Kishimoto
// Distributed under the MIT software license

//! Bech32 and Bech32m
//!
//! <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>
//! <https://github.com/bitcoin/bips/blob/master/bip-0350.mediawiki>

pub mod segwit;

/// Separator between the human-readable part and the data part
pub const SEPARATOR: char = '1';
/// Number of symbols in the checksum
pub const CHECKSUM_LENGTH: usize = 6;
/// Shortest string `decode` accepts
pub const MIN_LENGTH: usize = 8;

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

#[rustfmt::skip]
const CHARSET_REV: [i8; 128] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    15, -1, 10, 17, 21, 20, 26, 30,  7,  5, -1, -1, -1, -1, -1, -1,
    -1, 29, -1, 24, 13, 25,  9,  8, 23, -1, 18, 22, 31, 27, 19, -1,
     1,  0,  3, 16, 11, 28, 12, 14,  6,  4,  2, -1, -1, -1, -1, -1,
    -1, 29, -1, 24, 13, 25,  9,  8, 23, -1, 18, 22, 31, 27, 19, -1,
     1,  0,  3, 16, 11, 28, 12, 14,  6,  4,  2, -1, -1, -1, -1, -1,
];

const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid character: {0:?}")]
    InvalidCharacter(char),
    #[error("Mixed-case string")]
    MixedCase,
    #[error("Invalid checksum")]
    InvalidChecksum,
    #[error("Length {len} exceeds maximum of {max}")]
    LengthExceeded { len: usize, max: usize },
    #[error("Non-canonical padding")]
    NonCanonicalPadding,
    #[error("Invalid word: {0}")]
    InvalidWord(u8),
    #[error("Missing separator")]
    MissingSeparator,
    #[error("Input too short ({0} chars)")]
    TooShort(usize),
    #[error("Empty human-readable part")]
    EmptyHrp,
    #[error("Invalid bit widths: {from} to {to}")]
    InvalidWidth { from: u32, to: u32 },
}

/// Checksum flavour, told apart by the constant XORed into the residue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// BIP173
    Bech32,
    /// BIP350
    Bech32m,
}

impl Variant {
    pub const fn constant(&self) -> u32 {
        match self {
            Self::Bech32 => 1,
            Self::Bech32m => 0x2bc830a3,
        }
    }

    fn from_residue(residue: u32) -> Option<Self> {
        if residue == Self::Bech32.constant() {
            Some(Self::Bech32)
        } else if residue == Self::Bech32m.constant() {
            Some(Self::Bech32m)
        } else {
            None
        }
    }
}

#[inline]
fn polymod_step(chk: u32) -> u32 {
    let b: u32 = chk >> 25;
    let mut chk: u32 = (chk & 0x1ffffff) << 5;
    for (i, g) in GENERATOR.iter().enumerate() {
        if (b >> i) & 1 == 1 {
            chk ^= g;
        }
    }
    chk
}

/// Checksum state after the expanded human-readable part.
/// `hrp` must already be lower-case.
fn hrp_checksum(hrp: &[u8]) -> u32 {
    let mut chk: u32 = 1;
    for c in hrp.iter() {
        chk = polymod_step(chk) ^ (*c as u32 >> 5);
    }
    chk = polymod_step(chk);
    for c in hrp.iter() {
        chk = polymod_step(chk) ^ (*c as u32 & 0x1f);
    }
    chk
}

/// Encode `words` (5-bit values) under `hrp`
pub fn encode(hrp: &str, words: &[u8], variant: Variant, max_len: usize) -> Result<String, Error> {
    if hrp.is_empty() {
        return Err(Error::EmptyHrp);
    }

    for c in hrp.chars() {
        if !(33..=126).contains(&(c as u32)) {
            return Err(Error::InvalidCharacter(c));
        }
        // data symbols are always lower-case
        if c.is_ascii_uppercase() {
            return Err(Error::MixedCase);
        }
    }

    let len: usize = hrp.len() + 1 + words.len() + CHECKSUM_LENGTH;
    if len > max_len {
        return Err(Error::LengthExceeded { len, max: max_len });
    }

    let mut chk: u32 = hrp_checksum(hrp.as_bytes());
    let mut output: String = String::with_capacity(len);
    output.push_str(hrp);
    output.push(SEPARATOR);

    for w in words.iter() {
        if *w >> 5 != 0 {
            return Err(Error::InvalidWord(*w));
        }
        chk = polymod_step(chk) ^ *w as u32;
        output.push(CHARSET[*w as usize] as char);
    }

    for _ in 0..CHECKSUM_LENGTH {
        chk = polymod_step(chk);
    }
    chk ^= variant.constant();

    for i in 0..CHECKSUM_LENGTH {
        let w: u32 = (chk >> ((5 - i) * 5)) & 0x1f;
        output.push(CHARSET[w as usize] as char);
    }

    Ok(output)
}

/// Decode a bech32 string into its lower-case human-readable part,
/// its data words (checksum stripped) and the checksum variant
pub fn decode(input: &str, max_len: usize) -> Result<(String, Vec<u8>, Variant), Error> {
    let len: usize = input.len();
    if len > max_len {
        return Err(Error::LengthExceeded { len, max: max_len });
    }
    if len < MIN_LENGTH {
        return Err(Error::TooShort(len));
    }
    if let Some(c) = input.chars().find(|c| !c.is_ascii()) {
        return Err(Error::InvalidCharacter(c));
    }

    let pos: usize = input.rfind(SEPARATOR).ok_or(Error::MissingSeparator)?;
    if pos == 0 {
        return Err(Error::EmptyHrp);
    }
    let (raw_hrp, rest) = input.split_at(pos);
    let raw_data: &[u8] = &rest.as_bytes()[1..];
    if raw_data.len() < CHECKSUM_LENGTH {
        return Err(Error::TooShort(len));
    }

    let mut has_lower: bool = false;
    let mut has_upper: bool = false;

    let mut hrp: Vec<u8> = Vec::with_capacity(raw_hrp.len());
    for b in raw_hrp.bytes() {
        if !(33..=126).contains(&b) {
            return Err(Error::InvalidCharacter(b as char));
        }
        if b.is_ascii_lowercase() {
            has_lower = true;
        } else if b.is_ascii_uppercase() {
            has_upper = true;
        }
        hrp.push(b.to_ascii_lowercase());
    }

    let mut chk: u32 = hrp_checksum(&hrp);
    let mut words: Vec<u8> = Vec::with_capacity(raw_data.len());
    for b in raw_data.iter() {
        let v: i8 = CHARSET_REV[*b as usize];
        if v == -1 {
            return Err(Error::InvalidCharacter(*b as char));
        }
        if b.is_ascii_lowercase() {
            has_lower = true;
        } else if b.is_ascii_uppercase() {
            has_upper = true;
        }
        chk = polymod_step(chk) ^ v as u32;
        words.push(v as u8);
    }

    if has_lower && has_upper {
        return Err(Error::MixedCase);
    }

    let variant: Variant = Variant::from_residue(chk).ok_or(Error::InvalidChecksum)?;
    words.truncate(words.len() - CHECKSUM_LENGTH);

    // Only ASCII in [33, 126] was pushed
    let hrp: String = hrp.into_iter().map(char::from).collect();

    Ok((hrp, words, variant))
}

/// Regroup a stream of `from`-bit values into `to`-bit values.
///
/// With `pad` a trailing partial group is zero-filled and emitted.
/// Without it, leftover bits must be fewer than `from` and all zero.
pub fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, Error> {
    if !(1..=8).contains(&from) || !(1..=8).contains(&to) {
        return Err(Error::InvalidWidth { from, to });
    }

    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let maxv: u32 = (1 << to) - 1;
    let max_acc: u32 = (1 << (from + to - 1)) - 1;
    let mut out: Vec<u8> = Vec::with_capacity(data.len() * from as usize / to as usize + 1);

    for value in data.iter() {
        let v: u32 = *value as u32;
        if v >> from != 0 {
            return Err(Error::InvalidWord(*value));
        }
        acc = ((acc << from) | v) & max_acc;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & maxv) as u8);
        }
    }

    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & maxv) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & maxv) != 0 {
        return Err(Error::NonCanonicalPadding);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_checksums() {
        for s in [
            "A12UEL5L",
            "a12uel5l",
            "an83characterlonghumanreadablepartthatcontainsthenumber1andtheexcludedcharactersbio1tt5tgs",
            "abcdef1qpzry9x8gf2tvdw0s3jn54khce6mua7lmqqqxw",
            "split1checkupstagehandshakeupstreamerranterredcaperred2y9e3w",
        ] {
            let (_, _, variant) = decode(s, 90).unwrap();
            assert_eq!(variant, Variant::Bech32, "{s}");
        }

        for s in [
            "A1LQFN3A",
            "a1lqfn3a",
            "abcdef1l7aum6echk45nj3s0wdvt2fg8x9yrzpqzd3ryx",
            "split1checkupstagehandshakeupstreamerranterredcaperredlc445v",
        ] {
            let (_, _, variant) = decode(s, 90).unwrap();
            assert_eq!(variant, Variant::Bech32m, "{s}");
        }
    }

    #[test]
    fn test_decode_lowercases_hrp() {
        let (hrp, words, _) = decode("A12UEL5L", 90).unwrap();
        assert_eq!(hrp, "a");
        assert!(words.is_empty());
    }

    #[test]
    fn test_invalid_strings() {
        assert_eq!(decode("pzry9x0s0muk", 90).unwrap_err(), Error::MissingSeparator);
        assert_eq!(decode("1pzry9x0s0muk", 90).unwrap_err(), Error::EmptyHrp);
        assert_eq!(decode("x1b4n0q5v", 90).unwrap_err(), Error::InvalidCharacter('b'));
        assert_eq!(decode("li1dgmt3", 90).unwrap_err(), Error::TooShort(8));
        assert_eq!(decode("a1b2", 90).unwrap_err(), Error::TooShort(4));
        assert_eq!(
            decode("A1G7SGD8", 90).unwrap_err(),
            Error::InvalidChecksum
        );
        assert_eq!(
            decode("\u{7f}1axkwrx", 90).unwrap_err(),
            Error::InvalidCharacter('\u{7f}')
        );
        assert_eq!(
            decode("de1lg7wt\u{ff}", 90).unwrap_err(),
            Error::InvalidCharacter('\u{ff}')
        );
    }

    #[test]
    fn test_mixed_case() {
        assert_eq!(decode("A12uEL5L", 90).unwrap_err(), Error::MixedCase);
        assert_eq!(decode("a12UEL5L", 90).unwrap_err(), Error::MixedCase);
    }

    #[test]
    fn test_length_limit() {
        let s = "an84characterslonghumanreadablepartthatcontainsthenumber1andtheexcludedcharactersbio1569pvx";
        assert_eq!(
            decode(s, 90).unwrap_err(),
            Error::LengthExceeded { len: 91, max: 90 }
        );

        let words = vec![0u8; 100];
        assert_eq!(
            encode("abc", &words, Variant::Bech32, 90).unwrap_err(),
            Error::LengthExceeded { len: 110, max: 90 }
        );
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode("a", &[], Variant::Bech32, 90).unwrap(), "a12uel5l");
        assert_eq!(encode("a", &[], Variant::Bech32m, 90).unwrap(), "a1lqfn3a");

        let (hrp, words, variant) =
            decode("abcdef1qpzry9x8gf2tvdw0s3jn54khce6mua7lmqqqxw", 90).unwrap();
        assert_eq!(words, (0..32).collect::<Vec<u8>>());
        assert_eq!(
            encode(&hrp, &words, variant, 90).unwrap(),
            "abcdef1qpzry9x8gf2tvdw0s3jn54khce6mua7lmqqqxw"
        );
    }

    #[test]
    fn test_encode_rejects_bad_input() {
        assert_eq!(encode("", &[], Variant::Bech32, 90).unwrap_err(), Error::EmptyHrp);
        assert_eq!(
            encode("Npub", &[], Variant::Bech32, 90).unwrap_err(),
            Error::MixedCase
        );
        assert_eq!(
            encode("a b", &[], Variant::Bech32, 90).unwrap_err(),
            Error::InvalidCharacter(' ')
        );
        assert_eq!(
            encode("a", &[1, 32], Variant::Bech32, 90).unwrap_err(),
            Error::InvalidWord(32)
        );
    }

    #[test]
    fn test_single_substitution_detected() {
        let valid = "abcdef1qpzry9x8gf2tvdw0s3jn54khce6mua7lmqqqxw";
        let sep: usize = valid.rfind('1').unwrap();
        for i in (sep + 1)..valid.len() {
            let original = valid.as_bytes()[i];
            for c in CHARSET.iter().filter(|c| **c != original) {
                let mut bytes = valid.as_bytes().to_vec();
                bytes[i] = *c;
                let s = String::from_utf8(bytes).unwrap();
                assert_eq!(decode(&s, 90).unwrap_err(), Error::InvalidChecksum);
            }
        }
    }

    #[test]
    fn test_convert_bits() {
        let data: Vec<u8> = vec![0xff];
        let words = convert_bits(&data, 8, 5, true).unwrap();
        assert_eq!(words, vec![31, 28]);
        assert_eq!(convert_bits(&words, 5, 8, false).unwrap(), data);

        // 0xff needs 2 words with 2 bits of padding
        assert_eq!(
            convert_bits(&[31, 29], 5, 8, false).unwrap_err(),
            Error::NonCanonicalPadding
        );

        // a whole superfluous word
        assert_eq!(
            convert_bits(&[31, 28, 0], 5, 8, false).unwrap_err(),
            Error::NonCanonicalPadding
        );

        assert_eq!(
            convert_bits(&[32], 5, 8, true).unwrap_err(),
            Error::InvalidWord(32)
        );
    }

    #[test]
    fn test_convert_bits_unpadded_multiple() {
        // 40 bits fit exactly into 8 words of 5 bits
        let data: Vec<u8> = vec![0x01, 0x23, 0x45, 0x67, 0x89];
        let words = convert_bits(&data, 8, 5, false).unwrap();
        assert_eq!(words.len(), 8);
        assert_eq!(convert_bits(&words, 5, 8, false).unwrap(), data);

        // 8 bits do not, and the leftover is non-zero
        assert_eq!(
            convert_bits(&[0x01], 8, 5, false).unwrap_err(),
            Error::NonCanonicalPadding
        );
    }

    #[test]
    fn test_convert_bits_widths() {
        assert_eq!(
            convert_bits(&[1], 8, 0, true).unwrap_err(),
            Error::InvalidWidth { from: 8, to: 0 }
        );
        assert_eq!(
            convert_bits(&[1], 8, 16, true).unwrap_err(),
            Error::InvalidWidth { from: 8, to: 16 }
        );
        assert_eq!(
            convert_bits(&[1], 0, 5, false).unwrap_err(),
            Error::InvalidWidth { from: 0, to: 5 }
        );
    }

    #[test]
    fn test_matches_reference_crate() {
        use ::bech32::ToBase32;

        let data: Vec<u8> = (0u8..=63).collect();
        let words: Vec<u8> = convert_bits(&data, 8, 5, true).unwrap();
        let reference: Vec<u8> = data.to_base32().into_iter().map(|w| w.to_u8()).collect();
        assert_eq!(words, reference);

        assert_eq!(
            encode("test", &words, Variant::Bech32m, 256).unwrap(),
            ::bech32::encode("test", data.to_base32(), ::bech32::Variant::Bech32m).unwrap()
        );
    }
}
