use std::fs;

use wireprims_codec::unpack_as;

use crate::cmd::UnpackArgs;
use crate::exit::{codec_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{print_record, OutputFormat};

pub fn run(args: UnpackArgs, format: OutputFormat) -> CliResult<i32> {
    let payload = resolve_payload(&args)?;
    if args.offset > payload.len() {
        return Err(CliError::new(
            USAGE,
            format!(
                "--offset {} is past the end of the {}-byte payload",
                args.offset,
                payload.len()
            ),
        ));
    }
    let window = &payload[args.offset..];

    match unpack_as(window, &args.fmt, args.endian.into()) {
        Ok(Some(record)) => {
            print_record(&record, format);
            Ok(SUCCESS)
        }
        Ok(None) => Err(CliError::new(
            DATA_INVALID,
            format!(
                "payload too short for format {:?} ({} bytes available)",
                args.fmt,
                window.len()
            ),
        )),
        Err(err) => Err(codec_error("unpack failed", err)),
    }
}

fn resolve_payload(args: &UnpackArgs) -> CliResult<Vec<u8>> {
    if let Some(file) = &args.file {
        return fs::read(file).map_err(|err| io_error("cannot read payload file", err));
    }
    let Some(text) = &args.payload else {
        return Err(CliError::new(USAGE, "provide a hex payload or --file"));
    };
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let cleaned = cleaned.strip_prefix("0x").unwrap_or(&cleaned);
    hex::decode(cleaned)
        .map_err(|err| CliError::new(DATA_INVALID, format!("payload is not valid hex: {err}")))
}
