//! Locating and extracting chunks inside a region archive.
//!
//! A region file starts with an 8KiB header made of two tables of 1024
//! big-endian `u32` entries. The first table holds a packed sector offset and
//! sector count for each chunk, the second holds the Unix timestamp of the
//! chunk's last write. Both tables are indexed by the same slot, which comes
//! from the chunk's coordinates within the region.

pub mod coord;
pub mod sector;
pub mod timestamp;
pub mod header;
pub mod compressionscheme;
pub mod chunk;
pub mod regionfile;

use byteorder::{BigEndian, ByteOrder};

use crate::{McError, McResult};

use self::sector::ChunkLocator;

/// Chunk bodies are aligned to 4KiB sectors.
pub const SECTOR_SIZE: u64 = 4096;
/// Byte size of each of the two header tables.
pub const TABLE_SIZE: usize = 4096;
/// Byte size of the whole region header.
pub const HEADER_SIZE: usize = TABLE_SIZE * 2;
/// A region is 32x32 chunks.
pub const CHUNKS_PER_REGION: usize = 1024;
/// The width (and depth) of a region in chunks.
pub const REGION_WIDTH: i32 = 32;

/// Tests if a value is a multiple of 4096.
pub const fn is_multiple_of_4096(n: u64) -> bool {
	(n & 4095) == 0
}

/// Counts the number of 4KiB sectors required to accomodate `size` bytes.
pub const fn required_sectors(size: u32) -> u32 {
	let sub = size.overflowing_shr(12).0;
	// true => 1 | false => 0
	let overflow = !is_multiple_of_4096(size as u64) as u32;
	sub + overflow
}

/// `n` modulo `m`, always in `[0, m)` even when `n` is negative.
/// `floor_mod(-22, 32) == 10`
pub const fn floor_mod(n: i32, m: i32) -> i32 {
	n.rem_euclid(m)
}

/// The coordinates of the region that contains the given chunk.
pub const fn region_of(chunk_x: i32, chunk_z: i32) -> (i32, i32) {
	(chunk_x.div_euclid(REGION_WIDTH), chunk_z.div_euclid(REGION_WIDTH))
}

/// The conventional file name of the region at the given region coordinates.
pub fn region_file_name(region_x: i32, region_z: i32) -> String {
	format!("r.{region_x}.{region_z}.mca")
}

/// The byte offset of a chunk's entry within the first header table.
/// Always a multiple of 4 in `[0, 4092]`.
pub const fn header_slot_offset(chunk_x: i32, chunk_z: i32) -> u32 {
	let x = floor_mod(chunk_x, REGION_WIDTH) as u32;
	let z = floor_mod(chunk_z, REGION_WIDTH) as u32;
	4 * (x + z * REGION_WIDTH as u32)
}

fn read_header_entry(buffer: &[u8], offset: usize) -> McResult<u32> {
	match buffer.get(offset..offset + 4) {
		Some(bytes) => Ok(BigEndian::read_u32(bytes)),
		None => Err(McError::bounds(offset, 4, buffer.len().saturating_sub(offset))),
	}
}

/// Finds where a chunk's body lives in a region buffer.
/// Fails with [McError::ChunkAbsent] if the chunk has never been written.
pub fn locate(chunk_x: i32, chunk_z: i32, buffer: &[u8]) -> McResult<ChunkLocator> {
	let offset = header_slot_offset(chunk_x, chunk_z) as usize;
	let locator = ChunkLocator::from(read_header_entry(buffer, offset)?);
	if locator.is_absent() {
		return Err(McError::ChunkAbsent {
			x: chunk_x,
			z: chunk_z,
		});
	}
	Ok(locator)
}

/// Reads the last-write Unix timestamp of a chunk.
/// The timestamp table uses the same slot as the sector table, one table
/// (4096 bytes) further into the file.
pub fn timestamp_of(chunk_x: i32, chunk_z: i32, buffer: &[u8]) -> McResult<u32> {
	let offset = header_slot_offset(chunk_x, chunk_z) as usize + TABLE_SIZE;
	read_header_entry(buffer, offset)
}

#[cfg(test)]
pub(crate) mod testutil {
	use std::io::Write;

	use flate2::{
		write::ZlibEncoder,
		Compression,
	};

	use crate::nbt::{encode_root, tag::NamedTag};

	use super::*;

	/// Builds a region file in memory. Each chunk gets its own run of
	/// sectors directly after the header, in the order given.
	pub struct RegionBuilder {
		buffer: Vec<u8>,
	}

	impl RegionBuilder {
		pub fn new() -> Self {
			Self {
				buffer: vec![0u8; HEADER_SIZE],
			}
		}

		/// Appends an already framed chunk body (length, scheme, payload)
		/// and points the header entry for `(x, z)` at it.
		pub fn raw_chunk(mut self, x: i32, z: i32, body: &[u8], timestamp: u32) -> Self {
			let sector_offset = (self.buffer.len() / SECTOR_SIZE as usize) as u32;
			let sector_count = required_sectors(body.len() as u32);
			self.buffer.extend_from_slice(body);
			let padded = (sector_offset + sector_count) as usize * SECTOR_SIZE as usize;
			self.buffer.resize(padded, 0);
			let slot = header_slot_offset(x, z) as usize;
			let entry = (sector_offset << 8) | sector_count;
			self.buffer[slot..slot + 4].copy_from_slice(&entry.to_be_bytes());
			self.buffer[slot + TABLE_SIZE..slot + TABLE_SIZE + 4].copy_from_slice(&timestamp.to_be_bytes());
			self
		}

		/// Frames and appends a zlib compressed NBT document.
		pub fn chunk(self, x: i32, z: i32, root: &NamedTag, timestamp: u32) -> Self {
			let nbt = encode_root(root).unwrap();
			let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
			encoder.write_all(&nbt).unwrap();
			let compressed = encoder.finish().unwrap();
			self.raw_chunk(x, z, &frame(2, &compressed), timestamp)
		}

		pub fn build(self) -> Vec<u8> {
			self.buffer
		}
	}

	/// `[length][scheme][payload]`
	pub fn frame(scheme: u8, payload: &[u8]) -> Vec<u8> {
		let mut body = Vec::with_capacity(payload.len() + 5);
		body.extend_from_slice(&(payload.len() as i32 + 1).to_be_bytes());
		body.push(scheme);
		body.extend_from_slice(payload);
		body
	}
}

#[cfg(test)]
mod tests {
	use rand::Rng;

	use super::*;
	use super::testutil::*;
	use crate::compound;
	use crate::nbt::tag::NamedTag;

	#[test]
	fn floor_mod_is_never_negative() {
		assert_eq!(floor_mod(-22, 32), 10);
		assert_eq!(floor_mod(-32, 32), 0);
		assert_eq!(floor_mod(-1, 32), 31);
		assert_eq!(floor_mod(79, 32), 15);
		assert_eq!(floor_mod(i32::MIN, 32), 0);
		assert_eq!(floor_mod(i32::MAX, 32), 31);
	}

	#[test]
	fn region_of_floors() {
		assert_eq!(region_of(0, 0), (0, 0));
		assert_eq!(region_of(31, 32), (0, 1));
		assert_eq!(region_of(-1, -32), (-1, -1));
		assert_eq!(region_of(-22, 79), (-1, 2));
		assert_eq!(region_file_name(-1, 2), "r.-1.2.mca");
	}

	#[test]
	fn slot_offset_examples() {
		assert_eq!(header_slot_offset(0, 0), 0);
		assert_eq!(header_slot_offset(31, 31), 4092);
		assert_eq!(header_slot_offset(32, 0), 0);
		// Local coordinates (10, 15) are slot 490.
		assert_eq!(header_slot_offset(-22, 79), 1960);
	}

	#[test]
	fn slot_offset_in_range() {
		let mut rng = rand::thread_rng();
		for _ in 0..10_000 {
			let x: i32 = rng.gen();
			let z: i32 = rng.gen();
			let offset = header_slot_offset(x, z);
			assert!(offset <= 4092, "({x}, {z}) => {offset}");
			assert_eq!(offset % 4, 0);
			// Chunks 32 apart share a slot.
			assert_eq!(offset, header_slot_offset(x.wrapping_add(32), z.wrapping_sub(32)));
		}
	}

	#[test]
	fn absent_chunk() {
		let buffer = RegionBuilder::new().build();
		assert!(matches!(
			locate(-22, 79, &buffer),
			Err(McError::ChunkAbsent { x: -22, z: 79 })
		));
		assert_eq!(timestamp_of(-22, 79, &buffer).unwrap(), 0);
	}

	#[test]
	fn locate_reads_sector_entry() {
		let root = NamedTag::new("", compound! { ("xPos", -22i32) });
		let buffer = RegionBuilder::new()
			.chunk(0, 0, &root, 1)
			.chunk(-22, 79, &root, 1_700_000_000)
			.build();
		let locator = locate(-22, 79, &buffer).unwrap();
		assert_eq!(locator.sector_offset(), 3);
		assert_eq!(locator.sector_count(), 1);
		assert_eq!(locator.offset(), 3 * 4096);
		assert_eq!(locator.size(), 4096);
		assert_eq!(timestamp_of(-22, 79, &buffer).unwrap(), 1_700_000_000);
		assert_eq!(timestamp_of(0, 0, &buffer).unwrap(), 1);
	}

	#[test]
	fn timestamp_uses_same_slot() {
		let mut buffer = vec![0u8; HEADER_SIZE];
		// Slot 1's timestamp, and the bytes a +4100 shift from slot 0 would read.
		buffer[4100..4104].copy_from_slice(&7u32.to_be_bytes());
		assert_eq!(timestamp_of(0, 0, &buffer).unwrap(), 0);
		assert_eq!(timestamp_of(1, 0, &buffer).unwrap(), 7);
	}

	#[test]
	fn short_header_is_bounds_error() {
		let buffer = [0u8; 100];
		assert!(matches!(
			locate(31, 31, &buffer),
			Err(McError::BoundsError { offset: 4092, needed: 4, remaining: 0 })
		));
	}
}
