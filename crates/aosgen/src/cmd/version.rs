use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    println!("aosgen {}", env!("CARGO_PKG_VERSION"));
    if !args.extended {
        return Ok(SUCCESS);
    }

    println!("target: {}", option_env!("AOSGEN_BUILD_TARGET").unwrap_or("unknown"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "default_chunk_size: {}",
        aosgen_frame::DEFAULT_CHUNK_SIZE.get()
    );
    println!("checksum: crc32 (ieee 802.3), big-endian trailer");

    Ok(SUCCESS)
}
