// Copyright (c) 2022-2023 Yuki Kishimoto
// Distributed under the MIT software license

use nostr_bech32_core::{Fields, IdentifierKind};
use prettytable::{row, Table};
use serde::Serialize;

#[derive(Serialize)]
struct Decoded<'a> {
    /// `kind` is taken by the event kind
    #[serde(rename = "type")]
    kind: IdentifierKind,
    #[serde(flatten)]
    fields: &'a Fields,
}

/// Pretty JSON with the identifier kind next to its fields
pub fn to_json(kind: IdentifierKind, fields: &Fields) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Decoded { kind, fields })
}

pub trait Print {
    fn print(&self);
}

impl Print for (IdentifierKind, Fields) {
    fn print(&self) {
        let (kind, fields) = self;
        let mut table = Table::new();

        table.add_row(row!["Kind", kind]);

        let label: &str = match kind {
            IdentifierKind::Note | IdentifierKind::Nevent => "Event ID",
            IdentifierKind::Nsec => "Secret key",
            _ => "Public key",
        };
        if let Some(hex) = &fields.hex {
            table.add_row(row![label, hex]);
        }
        if let Some(author) = &fields.author {
            table.add_row(row!["Author", author]);
        }
        if let Some(k) = fields.kind {
            table.add_row(row!["Event kind", k]);
        }
        if let Some(identifier) = &fields.identifier {
            let label: &str = match kind {
                IdentifierKind::Nrelay => "Relay",
                _ => "Identifier",
            };
            table.add_row(row![label, identifier]);
        }
        for (index, relay) in fields.relays.iter().enumerate() {
            table.add_row(row![format!("Relay #{}", index + 1), relay]);
        }

        table.printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX: &str = "3bf0c63fcb93463407af97a5e5ee64fa883d107ef9e558472c4eb9aaaefa459d";

    #[test]
    fn test_json_includes_kind() {
        let fields = Fields::note(HEX);
        let note: serde_json::Value =
            serde_json::from_str(&to_json(IdentifierKind::Note, &fields).unwrap()).unwrap();
        let npub: serde_json::Value =
            serde_json::from_str(&to_json(IdentifierKind::Npub, &fields).unwrap()).unwrap();
        assert_eq!(note["type"], "note");
        assert_eq!(npub["type"], "npub");
        assert_eq!(note["hex"], HEX);
        assert_ne!(note, npub);

        let fields = Fields::nevent(HEX, None, Some(1), Vec::new());
        let nevent: serde_json::Value =
            serde_json::from_str(&to_json(IdentifierKind::Nevent, &fields).unwrap()).unwrap();
        assert_eq!(nevent["type"], "nevent");
        assert_eq!(nevent["kind"], 1);
    }
}
