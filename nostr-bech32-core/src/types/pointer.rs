// Copyright (c) 2022-2023 Yuki Kishimoto
// Distributed under the MIT software license

//! Profile, event and coordinate pointers with relay hints

use serde::{Deserialize, Serialize};

use super::{EventId, PublicKey};

/// Public key plus relays where the profile may be found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePointer {
    pub public_key: PublicKey,
    pub relays: Vec<String>,
}

impl ProfilePointer {
    pub fn new(public_key: PublicKey) -> Self {
        Self {
            public_key,
            relays: Vec::new(),
        }
    }

    pub fn relays<I, S>(mut self, relays: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relays = relays.into_iter().map(|r| r.into()).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPointer {
    pub id: EventId,
    pub author: Option<PublicKey>,
    /// Encoded only when `Some`
    pub kind: Option<u32>,
    pub relays: Vec<String>,
}

impl EventPointer {
    pub fn new(id: EventId) -> Self {
        Self {
            id,
            author: None,
            kind: None,
            relays: Vec::new(),
        }
    }

    pub fn author(mut self, author: PublicKey) -> Self {
        self.author = Some(author);
        self
    }

    pub fn kind(mut self, kind: u32) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn relays<I, S>(mut self, relays: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relays = relays.into_iter().map(|r| r.into()).collect();
        self
    }
}

/// Addressable event coordinate: `<kind>:<pubkey>:<d tag>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub kind: u32,
    pub public_key: PublicKey,
    /// Value of the `d` tag, may be empty
    pub identifier: String,
    pub relays: Vec<String>,
}

impl Coordinate {
    pub fn new<S>(kind: u32, public_key: PublicKey, identifier: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            kind,
            public_key,
            identifier: identifier.into(),
            relays: Vec::new(),
        }
    }

    pub fn relays<I, S>(mut self, relays: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relays = relays.into_iter().map(|r| r.into()).collect();
        self
    }
}
