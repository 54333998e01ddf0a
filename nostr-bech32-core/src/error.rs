// Copyright (c) 2022-2023 Yuki Kishimoto
// Distributed under the MIT software license

use crate::nostr::nip19;
use crate::types;
use crate::util::hex;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// NIP19 error
    #[error(transparent)]
    Nip19(#[from] nip19::Error),
    /// Hex error
    #[error(transparent)]
    Hex(#[from] hex::Error),
    /// Key or id error
    #[error(transparent)]
    Types(#[from] types::Error),
    /// Secp256k1 error
    #[cfg(feature = "secp256k1")]
    #[error(transparent)]
    Secp256k1(#[from] secp256k1::Error),
}
