// Copyright (c) 2022-2023 Yuki Kishimoto
// Distributed under the MIT software license

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

use super::{to_array, Error, KEY_LENGTH};
use crate::util::hex;

/// X-only public key, as used by nostr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; KEY_LENGTH]);

impl PublicKey {
    pub const fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

super::impl_public_bytes!(PublicKey);

/// Private key. Never printed by `Debug` and zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; KEY_LENGTH]);

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<sensitive>")
    }
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl SecretKey {
    pub const fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self, Error> {
        Ok(Self(to_array(slice)?))
    }

    pub fn from_hex<S>(hex: S) -> Result<Self, Error>
    where
        S: AsRef<str>,
    {
        Ok(Self(hex::decode_to_array(hex.as_ref())?))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }

    /// Hex of the secret bytes. Handle with care.
    pub fn to_secret_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Serialize for SecretKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_secret_hex())
    }
}

impl<'de> Deserialize<'de> for SecretKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex: String = String::deserialize(deserializer)?;
        Self::from_hex(hex).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "secp256k1")]
mod secp {
    use secp256k1::XOnlyPublicKey;

    use super::{PublicKey, SecretKey};

    impl From<XOnlyPublicKey> for PublicKey {
        fn from(pk: XOnlyPublicKey) -> Self {
            Self(pk.serialize())
        }
    }

    impl TryFrom<&PublicKey> for XOnlyPublicKey {
        type Error = secp256k1::Error;

        /// Fails when the bytes are not the x coordinate of a curve point
        fn try_from(pk: &PublicKey) -> Result<Self, Self::Error> {
            XOnlyPublicKey::from_slice(pk.as_bytes())
        }
    }

    impl From<secp256k1::SecretKey> for SecretKey {
        fn from(sk: secp256k1::SecretKey) -> Self {
            Self(sk.secret_bytes())
        }
    }

    impl TryFrom<&SecretKey> for secp256k1::SecretKey {
        type Error = secp256k1::Error;

        fn try_from(sk: &SecretKey) -> Result<Self, Self::Error> {
            secp256k1::SecretKey::from_slice(sk.as_bytes())
        }
    }
}
