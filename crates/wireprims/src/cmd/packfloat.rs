use wireprims_codec::pack_float;

use crate::cmd::PackfloatArgs;
use crate::exit::{codec_error, CliResult, SUCCESS};
use crate::output::{print_packed, OutputFormat};

pub fn run(args: PackfloatArgs, format: OutputFormat) -> CliResult<i32> {
    let packed = pack_float(args.value, args.width, args.endian.into())
        .map_err(|err| codec_error("packfloat failed", err))?;
    print_packed(&packed, format);
    Ok(SUCCESS)
}
