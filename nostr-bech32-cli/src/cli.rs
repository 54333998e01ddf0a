// Copyright (c) 2022-2023 Yuki Kishimoto
// Distributed under the MIT software license

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "nostr-bech32")]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode an identifier
    #[command(arg_required_else_help = true)]
    Encode {
        #[command(subcommand)]
        identifier: EncodeCommand,
    },
    /// Decode any NIP19 identifier
    #[command(arg_required_else_help = true)]
    Decode {
        /// Bech32 string
        #[arg(required = true)]
        bech32: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum EncodeCommand {
    /// Event id
    Note {
        /// Event id (hex)
        #[arg(required = true)]
        id: String,
    },
    /// Public key
    Npub {
        /// Public key (hex)
        #[arg(required = true)]
        public_key: String,
    },
    /// Secret key
    Nsec {
        /// Secret key (hex)
        #[arg(required = true)]
        secret_key: String,
    },
    /// Profile with relay hints
    Nprofile {
        /// Public key (hex)
        #[arg(required = true)]
        public_key: String,
        /// Relay url
        #[arg(short, long = "relay")]
        relays: Vec<String>,
    },
    /// Event with relay hints
    Nevent {
        /// Event id (hex)
        #[arg(required = true)]
        id: String,
        /// Author public key (hex)
        #[arg(long)]
        author: Option<String>,
        /// Event kind
        #[arg(long)]
        kind: Option<u32>,
        /// Relay url
        #[arg(short, long = "relay")]
        relays: Vec<String>,
    },
    /// Addressable event coordinate
    Naddr {
        /// Value of the `d` tag
        #[arg(long, default_value = "")]
        identifier: String,
        /// Author public key (hex)
        #[arg(long, required = true)]
        author: String,
        /// Event kind
        #[arg(long, required = true)]
        kind: u32,
        /// Relay url
        #[arg(short, long = "relay")]
        relays: Vec<String>,
    },
    /// Relay url
    Nrelay {
        #[arg(required = true)]
        url: String,
    },
}
