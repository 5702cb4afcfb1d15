//! Command line interface for the `rdpframe` binary.
//!
//! Kept free of crate imports so the build script can include it to render
//! the man page.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Wire format selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// TPKT-framed X.224.
    Tpkt,
    /// Fast-path output PDUs.
    FastPath,
    /// Mixed TPKT and fast-path, as sent by an RDP server.
    Rdp,
    /// RAIL static virtual channel orders.
    Rail,
    /// Payloads behind a plain integer length prefix.
    LengthPrefixed,
}

/// Command line arguments for the `rdpframe` binary.
#[derive(Debug, Parser)]
#[command(
    name = "rdpframe",
    version,
    about = "Split a captured RDP byte stream into PDUs"
)]
pub struct Cli {
    /// Wire format of the capture.
    #[arg(short, long, value_enum, default_value_t = Format::Rdp)]
    pub format: Format,

    /// Prefix width in bytes for `length-prefixed` captures: 1, 2, 4, or 8.
    #[arg(long, default_value_t = 4)]
    pub prefix_width: usize,

    /// Read `length-prefixed` prefixes as little-endian.
    #[arg(long)]
    pub little_endian: bool,

    /// Reject PDUs longer than this many bytes.
    #[arg(short, long)]
    pub max_pdu_length: Option<usize>,

    /// Capture file to read; standard input when omitted.
    pub file: Option<PathBuf>,
}
