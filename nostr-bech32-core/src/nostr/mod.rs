// Copyright (c) 2022-2023 Yuki Kishimoto
// Distributed under the MIT software license

pub mod nip19;
pub mod tlv;

pub use self::nip19::{Identifier, IdentifierKind};

pub trait ToBech32 {
    type Err;
    fn to_bech32(&self) -> Result<String, Self::Err>;
}

pub trait FromBech32: Sized {
    type Err;
    fn from_bech32<S>(s: S) -> Result<Self, Self::Err>
    where
        S: AsRef<str>;
}

#[cfg(feature = "secp256k1")]
mod secp {
    use secp256k1::XOnlyPublicKey;

    use super::{FromBech32, ToBech32};
    use crate::error::Error;
    use crate::types::{PublicKey, SecretKey};

    impl ToBech32 for XOnlyPublicKey {
        type Err = Error;

        fn to_bech32(&self) -> Result<String, Self::Err> {
            Ok(PublicKey::from(*self).to_bech32()?)
        }
    }

    impl FromBech32 for XOnlyPublicKey {
        type Err = Error;

        fn from_bech32<S>(s: S) -> Result<Self, Self::Err>
        where
            S: AsRef<str>,
        {
            let pk = PublicKey::from_bech32(s)?;
            Ok(XOnlyPublicKey::try_from(&pk)?)
        }
    }

    impl ToBech32 for secp256k1::SecretKey {
        type Err = Error;

        fn to_bech32(&self) -> Result<String, Self::Err> {
            Ok(SecretKey::from(*self).to_bech32()?)
        }
    }

    impl FromBech32 for secp256k1::SecretKey {
        type Err = Error;

        fn from_bech32<S>(s: S) -> Result<Self, Self::Err>
        where
            S: AsRef<str>,
        {
            let sk = SecretKey::from_bech32(s)?;
            Ok(secp256k1::SecretKey::try_from(&sk)?)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_xonly_npub() {
            let npub = "npub180cvv07tjdrrgpa0j7j7tmnyl2yr6yr7l8j4s3evf6u64th6gkwsyjh6w6";
            let pk = XOnlyPublicKey::from_bech32(npub).unwrap();
            assert_eq!(pk.to_bech32().unwrap(), npub);
        }

        #[test]
        fn test_secp_nsec() {
            let nsec = "nsec1vl029mgpspedva04g90vltkh6fvh240zqtv9k0t9af8935ke9laqsnlfe5";
            let sk = secp256k1::SecretKey::from_bech32(nsec).unwrap();
            assert_eq!(sk.to_bech32().unwrap(), nsec);
        }
    }
}
