use crate::for_each_int_type;

use super::TABLE_SIZE;

/// A region file contains up to 1024 chunks, which is 32x32 chunks.
/// This struct represents a chunk coordinate within a region file.
/// The coordinate can be an absolute coordinate and it will be
/// normalized to relative coordinates.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct RegionCoord(u16);

impl RegionCoord {
	/// Create a new RegionCoord.
	/// The x and z will be mathematically transformed into relative coordinates.
	/// So if the coordinate given to `new()` is `(32, 32)`, the result will be
	/// `(0, 0)`.
	pub fn new(x: u16, z: u16) -> Self {
		let xmod = x & 31;
		let zmod = z & 31;
		Self(xmod | zmod.overflowing_shl(5).0)
	}

	/// Every slot in a region, in table order.
	pub fn all() -> impl Iterator<Item = RegionCoord> {
		(0..super::CHUNKS_PER_REGION as u16).map(RegionCoord)
	}

	/// The slot index in `[0, 1024)`.
	pub fn index(&self) -> usize {
		self.0 as usize
	}

	pub fn x(&self) -> i32 {
		(self.0 & 31) as i32
	}

	pub fn z(&self) -> i32 {
		(self.0.overflowing_shr(5).0 & 31) as i32
	}

	pub fn tuple<T>(self) -> (T, T)
	where
	(T, T): From<Self> {
		self.into()
	}

	/// The byte offset of this chunk's entry in the sector table.
	pub fn sector_table_offset(&self) -> usize {
		self.index() * 4
	}

	/// The byte offset of this chunk's entry in the timestamp table.
	pub fn timestamp_table_offset(&self) -> usize {
		self.sector_table_offset() + TABLE_SIZE
	}
}

// Casting to u16 keeps the low 16 bits of the two's complement value, so
// masking with 31 afterwards is a floor modulo for negative inputs too.
macro_rules! __regioncoord_impl {
	($type:ty) => {

		impl From<($type, $type)> for RegionCoord {
			fn from(value: ($type, $type)) -> Self {
				Self::new(value.0 as u16, value.1 as u16)
			}
		}

		impl From<RegionCoord> for ($type, $type) {
			fn from(value: RegionCoord) -> Self {
				(value.x() as $type, value.z() as $type)
			}
		}
	};
}

for_each_int_type!(__regioncoord_impl);

impl<T: Into<RegionCoord> + Copy> From<&T> for RegionCoord {
	fn from(value: &T) -> Self {
		T::into(*value)
	}
}

impl std::fmt::Display for RegionCoord {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "({}, {})", self.x(), self.z())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::region::{floor_mod, header_slot_offset};

	#[test]
	fn normalizes_negative_coordinates() {
		let coord = RegionCoord::from((-22i32, 79i32));
		assert_eq!(coord.tuple::<i32>(), (10, 15));
		assert_eq!(coord.index(), 490);
		assert_eq!(coord.to_string(), "(10, 15)");
		for x in -100i32..100 {
			for z in [-65i32, -33, -1, 0, 31, 64] {
				let coord = RegionCoord::from((x, z));
				assert_eq!(coord.x(), floor_mod(x, 32));
				assert_eq!(coord.z(), floor_mod(z, 32));
				assert_eq!(coord.sector_table_offset(), header_slot_offset(x, z) as usize);
			}
		}
	}

	#[test]
	fn all_slots_in_order() {
		let slots: Vec<RegionCoord> = RegionCoord::all().collect();
		assert_eq!(slots.len(), 1024);
		assert_eq!(slots[33], RegionCoord::new(1, 1));
		assert_eq!(slots[1023].timestamp_table_offset(), 4092 + 4096);
	}
}
