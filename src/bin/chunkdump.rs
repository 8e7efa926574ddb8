//! Prints the contents of a region file.
//!
//! ```text
//! chunkdump <region.mca>                      list the chunks present in the region
//! chunkdump <region.mca> <chunk_x> <chunk_z>  decode and print one chunk
//! ```
//! Set `RUST_LOG=debug` to see where each chunk was found.

use std::process::ExitCode;

use mcchunk::{
	McResult,
	RegionFile,
	region::region_of,
};

fn usage() -> ExitCode {
	eprintln!("usage: chunkdump <region.mca> [<chunk_x> <chunk_z>]");
	ExitCode::from(2)
}

fn list_chunks(region: &RegionFile) -> McResult<()> {
	let header = region.header()?;
	let mut count = 0;
	for coord in header.present_chunks() {
		let sector = header.sectors[coord];
		let timestamp = header.timestamps[coord];
		println!("{coord}: {sector}, last written {timestamp}");
		count += 1;
	}
	println!("{count} chunks");
	Ok(())
}

fn dump_chunk(region: &RegionFile, chunk_x: i32, chunk_z: i32) -> McResult<()> {
	let root = region.read_chunk(chunk_x, chunk_z)?;
	log::info!("chunk ({chunk_x}, {chunk_z}) root is a {}", root.id());
	println!("{root:#}");
	Ok(())
}

fn main() -> ExitCode {
	env_logger::init();
	let args: Vec<String> = std::env::args().skip(1).collect();
	let (path, coords) = match args.as_slice() {
		[path] => (path, None),
		[path, x, z] => match (x.parse::<i32>(), z.parse::<i32>()) {
			(Ok(x), Ok(z)) => (path, Some((x, z))),
			_ => return usage(),
		},
		_ => return usage(),
	};
	let region = match RegionFile::open(path) {
		Ok(region) => region,
		Err(err) => {
			eprintln!("{path}: {err}");
			return ExitCode::FAILURE;
		}
	};
	let result = match coords {
		Some((x, z)) => dump_chunk(&region, x, z).map_err(|err| {
			let (region_x, region_z) = region_of(x, z);
			format!("chunk ({x}, {z}) in region ({region_x}, {region_z}): {err}")
		}),
		None => list_chunks(&region).map_err(|err| err.to_string()),
	};
	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(message) => {
			eprintln!("{path}: {message}");
			ExitCode::FAILURE
		}
	}
}
