use std::path::Path;

use crate::{
	McError, McResult,
	nbt::{
		decode::{DecodeOptions, NbtDecoder},
		tag::NamedTag,
	},
};

use super::{
	HEADER_SIZE,
	chunk::CompressedChunk,
	coord::*,
	header::*,
	sector::*,
	timestamp::*,
};

/// A read-only view of a whole region file held in memory.
/// The buffer is never modified, so a [RegionFile] can be shared between
/// threads and read from concurrently.
pub struct RegionFile<B: AsRef<[u8]> = Vec<u8>> {
	data: B,
	options: DecodeOptions,
}

impl RegionFile<Vec<u8>> {
	/// Reads an entire region file from disk.
	pub fn open<P: AsRef<Path>>(path: P) -> McResult<Self> {
		let path = path.as_ref();
		let data = std::fs::read(path)?;
		log::debug!("read {} bytes from {}", data.len(), path.display());
		Self::new(data)
	}
}

impl<B: AsRef<[u8]>> RegionFile<B> {
	/// Wraps a region buffer. The buffer must at least hold the 8KiB header.
	pub fn new(data: B) -> McResult<Self> {
		if data.as_ref().len() < HEADER_SIZE {
			return Err(McError::InvalidRegionFile);
		}
		Ok(Self {
			data,
			options: DecodeOptions::default(),
		})
	}

	/// Sets the options used when decoding chunk NBT.
	pub fn with_options(mut self, options: DecodeOptions) -> Self {
		self.options = options;
		self
	}

	pub fn bytes(&self) -> &[u8] {
		self.data.as_ref()
	}

	/// Parses both header tables.
	pub fn header(&self) -> McResult<RegionHeader> {
		RegionHeader::from_bytes(self.bytes())
	}

	/// See [super::locate].
	pub fn locate(&self, chunk_x: i32, chunk_z: i32) -> McResult<ChunkLocator> {
		super::locate(chunk_x, chunk_z, self.bytes())
	}

	/// The last time the chunk was written. Zero for chunks that never were.
	pub fn timestamp(&self, chunk_x: i32, chunk_z: i32) -> McResult<Timestamp> {
		super::timestamp_of(chunk_x, chunk_z, self.bytes()).map(Timestamp::from)
	}

	/// The slots of every chunk present in this region, in table order.
	pub fn chunks(&self) -> McResult<Vec<RegionCoord>> {
		Ok(self.header()?.present_chunks().collect())
	}

	/// Locate and inflate a chunk, returning its raw NBT bytes.
	pub fn read_chunk_bytes(&self, chunk_x: i32, chunk_z: i32) -> McResult<Vec<u8>> {
		let locator = self.locate(chunk_x, chunk_z)?;
		let chunk = CompressedChunk::read_at(self.bytes(), locator.offset())?;
		if chunk.framed_size() > locator.size() {
			log::warn!(
				"chunk ({chunk_x}, {chunk_z}) is {} bytes but only {} sectors are allotted to it",
				chunk.framed_size(),
				locator.sector_count(),
			);
		}
		let data = chunk.decompress()?;
		log::debug!(
			"chunk ({chunk_x}, {chunk_z}) at {locator}: {} compressed, {} inflated",
			chunk.payload.len(),
			data.len(),
		);
		Ok(data)
	}

	/// Locate, inflate, and decode a chunk.
	pub fn read_chunk(&self, chunk_x: i32, chunk_z: i32) -> McResult<NamedTag> {
		let data = self.read_chunk_bytes(chunk_x, chunk_z)?;
		NbtDecoder::with_options(&data, self.options).decode_root()
	}
}
