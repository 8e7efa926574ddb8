use std::ops::BitOr;

use super::SECTOR_SIZE;

/// Where a chunk's body sits in the region file, as stored in the sector table.
/// Offset and size are packed together.
/// |Offset:3|Size:1|
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct ChunkLocator(u32);

impl ChunkLocator {
	/// Provide offset and size in 4KiB sectors.
	/// Only the low 24 bits of `offset` are kept.
	pub fn new(offset: u32, size: u8) -> Self {
		Self(offset.overflowing_shl(8).0.bitor(size as u32))
	}

	/// Creates a new empty ChunkLocator.
	pub const fn empty() -> Self {
		Self(0)
	}

	/// The 4KiB sector offset.
	/// Multiply this by `4096` to get the byte offset.
	pub fn sector_offset(&self) -> u32 {
		self.0.overflowing_shr(8).0
	}

	/// The 4KiB sector count.
	/// Multiply this by `4096` to get the sector size.
	pub fn sector_count(&self) -> u8 {
		(self.0 & 0xFF) as u8
	}

	/// The offset in bytes that this chunk begins
	/// at in the region file.
	pub fn offset(&self) -> u64 {
		self.sector_offset() as u64 * SECTOR_SIZE
	}

	/// The offset in bytes that the sectors allotted to this chunk end at.
	pub fn end_offset(&self) -> u64 {
		self.offset() + self.size()
	}

	/// The size in bytes allotted to this chunk.
	pub fn size(&self) -> u64 {
		self.sector_count() as u64 * SECTOR_SIZE
	}

	/// A zero sector offset means the chunk was never written.
	/// Sector 0 is the header, so it can never hold chunk data.
	pub fn is_absent(&self) -> bool {
		self.sector_offset() == 0
	}
}

impl From<u32> for ChunkLocator {
	fn from(value: u32) -> Self {
		Self(value)
	}
}

impl From<ChunkLocator> for u32 {
	fn from(value: ChunkLocator) -> Self {
		value.0
	}
}

impl std::fmt::Display for ChunkLocator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "sector {} (x{})", self.sector_offset(), self.sector_count())
	}
}
