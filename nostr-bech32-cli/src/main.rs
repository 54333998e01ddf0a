// Copyright (c) 2022-2023 Yuki Kishimoto
// Distributed under the MIT software license

#![doc = include_str!("../../README.md")]

use clap::Parser;
use nostr_bech32_core::{decode_identifier, encode_identifier, Fields, IdentifierKind};

mod cli;
mod util;

use self::cli::{Cli, Command, EncodeCommand};
use self::util::Print;

type Result<T, E = Box<dyn std::error::Error>> = std::result::Result<T, E>;

fn main() -> Result<()> {
    env_logger::init();

    let args = Cli::parse();

    match args.command {
        Command::Encode { identifier } => {
            let (kind, fields) = encode_args(identifier);
            log::debug!("Encoding {kind}");
            println!("{}", encode_identifier(kind, &fields)?);
            Ok(())
        }
        Command::Decode { bech32, json } => {
            let decoded = decode_identifier(&bech32)?;
            log::debug!("Decoded {}", decoded.0);
            if json {
                println!("{}", util::to_json(decoded.0, &decoded.1)?);
            } else {
                decoded.print();
            }
            Ok(())
        }
    }
}

fn encode_args(command: EncodeCommand) -> (IdentifierKind, Fields) {
    match command {
        EncodeCommand::Note { id } => (IdentifierKind::Note, Fields::note(id)),
        EncodeCommand::Npub { public_key } => (
            IdentifierKind::Npub,
            Fields {
                hex: Some(public_key),
                ..Default::default()
            },
        ),
        EncodeCommand::Nsec { secret_key } => (
            IdentifierKind::Nsec,
            Fields {
                hex: Some(secret_key),
                ..Default::default()
            },
        ),
        EncodeCommand::Nprofile { public_key, relays } => (
            IdentifierKind::Nprofile,
            Fields {
                hex: Some(public_key),
                relays,
                ..Default::default()
            },
        ),
        EncodeCommand::Nevent {
            id,
            author,
            kind,
            relays,
        } => (
            IdentifierKind::Nevent,
            Fields::nevent(id, author, kind, relays),
        ),
        EncodeCommand::Naddr {
            identifier,
            author,
            kind,
            relays,
        } => (
            IdentifierKind::Naddr,
            Fields {
                author: Some(author),
                kind: Some(kind),
                identifier: Some(identifier),
                relays,
                ..Default::default()
            },
        ),
        EncodeCommand::Nrelay { url } => (
            IdentifierKind::Nrelay,
            Fields {
                identifier: Some(url),
                ..Default::default()
            },
        ),
    }
}
