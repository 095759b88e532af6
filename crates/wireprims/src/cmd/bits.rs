use wireprims_codec::unpack_bits;

use crate::cmd::BitsArgs;
use crate::exit::{codec_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_bits, OutputFormat};

pub fn run(args: BitsArgs, format: OutputFormat) -> CliResult<i32> {
    let value = parse_u32(&args.value)?;
    let fields =
        unpack_bits(value, &args.layout).map_err(|err| codec_error("bits failed", err))?;
    print_bits(value, &fields, format);
    Ok(SUCCESS)
}

fn parse_u32(text: &str) -> CliResult<u32> {
    let parsed = if let Some(rest) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u32::from_str_radix(rest, 16)
    } else if let Some(rest) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        u32::from_str_radix(rest, 2)
    } else {
        text.parse()
    };
    parsed.map_err(|err| CliError::new(USAGE, format!("bad value {text:?}: {err}")))
}
