//! `rdpframe` binary: splits a captured byte stream into PDUs.
//!
//! Prints one `offset length` line per PDU and exits non-zero if the stream
//! is malformed or ends inside a PDU.

mod cli;

use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;
use futures::StreamExt;
use rdpframe::{
    HintConfig,
    HintDecoder,
    PduHint,
    WireFormat,
    frame::Endianness,
};
use tokio::io::AsyncRead;
use tokio_util::codec::FramedRead;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Format};

fn hint_config(cli: &Cli) -> HintConfig {
    let format = match cli.format {
        Format::Tpkt => WireFormat::Tpkt,
        Format::FastPath => WireFormat::FastPath,
        Format::Rdp => WireFormat::Rdp,
        Format::Rail => WireFormat::RailOrder,
        Format::LengthPrefixed => WireFormat::LengthPrefixed {
            width: cli.prefix_width,
            endianness: if cli.little_endian {
                Endianness::Little
            } else {
                Endianness::Big
            },
        },
    };
    let config = HintConfig::new(format);
    match cli.max_pdu_length {
        Some(max) => config.with_max_pdu_length(max),
        None => config,
    }
}

async fn open(cli: &Cli) -> io::Result<Box<dyn AsyncRead + Unpin + Send>> {
    Ok(match &cli.file {
        Some(path) => Box::new(tokio::fs::File::open(path).await?),
        None => Box::new(tokio::io::stdin()),
    })
}

/// Frame `reader` with `hint`, writing one `offset length` line per PDU.
///
/// Returns the number of PDUs framed. Fails on the first framing error or if
/// the stream ends inside a PDU; lines already written stay written.
async fn frame_stream<R, W>(reader: R, hint: Box<dyn PduHint>, out: &mut W) -> io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut frames = FramedRead::new(reader, HintDecoder::new(hint));
    let mut offset = 0usize;
    while let Some(pdu) = frames.next().await {
        let pdu = pdu?;
        writeln!(out, "{offset} {}", pdu.len())?;
        offset += pdu.len();
    }
    Ok(frames.decoder().decoded_count())
}

async fn run<W: Write>(cli: &Cli, out: &mut W) -> io::Result<u64> {
    let hint = hint_config(cli).build_hint()?;
    frame_stream(open(cli).await?, hint, out).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Diagnostics go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli, &mut io::stdout().lock()).await {
        Ok(count) => {
            tracing::info!(pdus = count, "stream framed");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("rdpframe: {err}");
            ExitCode::FAILURE
        }
    }
}
