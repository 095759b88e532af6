use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use wireprims_codec::Endian;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod bits;
pub mod envinfo;
pub mod packfloat;
pub mod unpack;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a payload with a struct format string.
    Unpack(UnpackArgs),
    /// Decode named bit fields out of a 32-bit value.
    Bits(BitsArgs),
    /// Encode a float as raw bytes.
    Packfloat(PackfloatArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Print build and environment diagnostics.
    Envinfo(EnvinfoArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Unpack(args) => unpack::run(args, format),
        Command::Bits(args) => bits::run(args, format),
        Command::Packfloat(args) => packfloat::run(args, format),
        Command::Version(args) => version::run(args),
        Command::Envinfo(args) => envinfo::run(args, format),
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum EndianArg {
    Native,
    Little,
    Big,
}

impl From<EndianArg> for Endian {
    fn from(arg: EndianArg) -> Self {
        match arg {
            EndianArg::Native => Endian::native(),
            EndianArg::Little => Endian::Little,
            EndianArg::Big => Endian::Big,
        }
    }
}

#[derive(Args, Debug)]
pub struct UnpackArgs {
    /// Hex-encoded payload (whitespace and 0x prefix allowed).
    pub payload: Option<String>,
    /// Struct format string, e.g. "u1 <u2 c0 f4 z".
    #[arg(long, short = 'f')]
    pub fmt: String,
    /// Read the raw payload from a file instead.
    #[arg(long, conflicts_with = "payload", value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// Starting byte order.
    #[arg(long, default_value = "native")]
    pub endian: EndianArg,
    /// Skip this many payload bytes before decoding.
    #[arg(long, default_value = "0")]
    pub offset: usize,
}

#[derive(Args, Debug)]
pub struct BitsArgs {
    /// The 32-bit value: decimal, 0x-prefixed hex, or 0b-prefixed binary.
    pub value: String,
    /// Bit layout, e.g. "ready busy channel:4 _:2 count:8".
    pub layout: String,
}

#[derive(Args, Debug)]
pub struct PackfloatArgs {
    /// The value to encode.
    pub value: f64,
    /// Encoded width in bytes (4 or 8).
    #[arg(long, short = 'w', default_value = "4")]
    pub width: usize,
    /// Byte order of the encoding.
    #[arg(long, default_value = "native")]
    pub endian: EndianArg,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct EnvinfoArgs {}
