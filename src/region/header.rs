use byteorder::{BigEndian, ByteOrder};

use crate::{McError, McResult};

use super::{
	CHUNKS_PER_REGION,
	HEADER_SIZE,
	TABLE_SIZE,
	coord::*,
	sector::*,
	timestamp::*,
};

use std::ops::Index;

/// This trait defines the offset in a file where
/// a table can be found for a specific type.
/// It is meant to be implemented for [ChunkLocator] and [Timestamp].
pub trait RegionTableItem: From<u32> + Copy {
	/// The offset in the file that this type's table begins.
	const OFFSET: usize;
}

impl RegionTableItem for ChunkLocator {
	const OFFSET: usize = 0;
}

impl RegionTableItem for Timestamp {
	const OFFSET: usize = TABLE_SIZE;
}

/// A table of 1024 elements that contain information related to
/// a Minecraft chunk within a Region file.
#[derive(Debug, Clone)]
pub struct RegionTable<T: RegionTableItem>(Box<[T; CHUNKS_PER_REGION]>);

/// A table of 1024 [ChunkLocator] elements for each potential chunk in
/// a 32x32 chunk region file.
pub type SectorTable = RegionTable<ChunkLocator>;

/// A table of 1024 [Timestamp] elements for each potential chunk in a
/// 32x32 chunk region file.
pub type TimestampTable = RegionTable<Timestamp>;

/// The header at the beginning of every region file.
#[derive(Debug, Clone)]
pub struct RegionHeader {
	/// Where each chunk's body is in the file.
	pub sectors: SectorTable,
	/// The last modification time of each chunk.
	pub timestamps: TimestampTable,
}

impl<T: RegionTableItem> RegionTable<T> {
	pub const OFFSET: usize = T::OFFSET;

	/// Reads the table out of a region buffer.
	pub fn from_bytes(buffer: &[u8]) -> McResult<Self> {
		let end = Self::OFFSET + TABLE_SIZE;
		let Some(bytes) = buffer.get(Self::OFFSET..end) else {
			return Err(McError::bounds(
				Self::OFFSET,
				TABLE_SIZE,
				buffer.len().saturating_sub(Self::OFFSET),
			));
		};
		let mut table = Box::new([T::from(0); CHUNKS_PER_REGION]);
		for (item, entry) in table.iter_mut().zip(bytes.chunks_exact(4)) {
			*item = T::from(BigEndian::read_u32(entry));
		}
		Ok(Self(table))
	}
}

impl<C: Into<RegionCoord>, T: RegionTableItem> Index<C> for RegionTable<T> {
	type Output = T;

	fn index(&self, index: C) -> &Self::Output {
		let coord: RegionCoord = index.into();
		&self.0[coord.index()]
	}
}

impl RegionHeader {
	/// Parses both tables from the first 8KiB of a region buffer.
	pub fn from_bytes(buffer: &[u8]) -> McResult<Self> {
		if buffer.len() < HEADER_SIZE {
			return Err(McError::InvalidRegionFile);
		}
		Ok(Self {
			sectors: SectorTable::from_bytes(buffer)?,
			timestamps: TimestampTable::from_bytes(buffer)?,
		})
	}

	/// The slots of every chunk present in the region, in table order.
	pub fn present_chunks(&self) -> impl Iterator<Item = RegionCoord> + '_ {
		RegionCoord::all().filter(|coord| !self.sectors[*coord].is_absent())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::region::testutil::*;

	#[test]
	fn reads_both_tables() {
		let buffer = RegionBuilder::new()
			.raw_chunk(3, 4, &frame(2, &[0; 10]), 99)
			.raw_chunk(-1, -1, &frame(2, &[0; 5000]), 100)
			.build();
		let header = RegionHeader::from_bytes(&buffer).unwrap();
		assert_eq!(header.sectors[(3i32, 4i32)], ChunkLocator::new(2, 1));
		assert_eq!(header.sectors[(31i32, 31i32)], ChunkLocator::new(3, 2));
		assert_eq!(header.timestamps[(3i32, 4i32)], Timestamp::from(99u32));
		assert_eq!(header.timestamps[(-1i32, -1i32)], Timestamp::from(100u32));
		let present: Vec<RegionCoord> = header.present_chunks().collect();
		assert_eq!(present, [RegionCoord::new(3, 4), RegionCoord::new(31, 31)]);
	}

	#[test]
	fn rejects_short_buffer() {
		assert!(matches!(
			RegionHeader::from_bytes(&[0u8; 8191]),
			Err(McError::InvalidRegionFile)
		));
		assert!(matches!(
			TimestampTable::from_bytes(&[0u8; 5000]),
			Err(McError::BoundsError { offset: 4096, needed: 4096, remaining: 904 })
		));
	}
}
