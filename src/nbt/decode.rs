//! Cursor-based NBT decoding over an immutable buffer.
//!
//! The decoder never copies the input. It keeps a single offset into the
//! buffer and advances it by exactly the number of bytes each tag occupies,
//! so that sibling and parent tags resume reading at the right place.

use byteorder::{BigEndian, ByteOrder};

use crate::{
	McError, McResult,
	nbt::{
		Map,
		tag::*,
	},
};

/// The nesting limit used when none is given. Matches the limit Minecraft
/// itself enforces when reading NBT.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Settings that control how much the decoder is willing to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
	/// The maximum number of nested List/Compound payloads.
	pub max_depth: usize,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}
}

impl DecodeOptions {
	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}
}

/// Reads NBT tags from a byte buffer.
/// Every read is bounds checked against the buffer. Any failure aborts the
/// decode; no partially built tag is ever returned.
pub struct NbtDecoder<'a> {
	buffer: &'a [u8],
	position: usize,
	options: DecodeOptions,
}

impl<'a> NbtDecoder<'a> {
	pub fn new(buffer: &'a [u8]) -> Self {
		Self::with_options(buffer, DecodeOptions::default())
	}

	pub fn with_options(buffer: &'a [u8], options: DecodeOptions) -> Self {
		Self {
			buffer,
			position: 0,
			options,
		}
	}

	/// The offset of the next unread byte.
	pub fn position(&self) -> usize {
		self.position
	}

	/// The number of bytes that have not been read yet.
	pub fn remaining(&self) -> usize {
		self.buffer.len() - self.position
	}

	/// Reads a named root tag: a type id, a name, then the payload for that type.
	/// Any tag type may be at the root, not just Compound. A root End
	/// still carries a name and has an empty payload.
	pub fn decode_root(&mut self) -> McResult<NamedTag> {
		let id = self.read_tag_id()?;
		let name = self.read_string()?;
		let tag = self.read_payload(id, 0)?;
		Ok(NamedTag {
			name,
			tag,
		})
	}

	/// Reads the payload of a tag whose type id is already known.
	pub fn decode_payload(&mut self, id: TagID) -> McResult<Tag> {
		self.read_payload(id, 0)
	}

	fn read_payload(&mut self, id: TagID, depth: usize) -> McResult<Tag> {
		Ok(match id {
			TagID::End => Tag::End,
			TagID::Byte => Tag::Byte(self.read_i8()?),
			TagID::Short => Tag::Short(BigEndian::read_i16(self.take(2)?)),
			TagID::Int => Tag::Int(BigEndian::read_i32(self.take(4)?)),
			TagID::Long => Tag::Long(BigEndian::read_i64(self.take(8)?)),
			TagID::Float => Tag::Float(BigEndian::read_f32(self.take(4)?)),
			TagID::Double => Tag::Double(BigEndian::read_f64(self.take(8)?)),
			TagID::ByteArray => Tag::ByteArray(self.read_byte_array()?),
			TagID::String => Tag::String(self.read_string()?),
			TagID::List => Tag::List(self.read_list(depth)?),
			TagID::Compound => Tag::Compound(self.read_compound(depth)?),
			TagID::IntArray => Tag::IntArray(self.read_int_array()?),
			TagID::LongArray => Tag::LongArray(self.read_long_array()?),
		})
	}

	/// Returns the depth of a new List/Compound nested under `depth`.
	fn enter(&self, depth: usize) -> McResult<usize> {
		let depth = depth + 1;
		if depth > self.options.max_depth {
			return Err(McError::DepthLimitExceeded(self.options.max_depth));
		}
		Ok(depth)
	}

	fn take(&mut self, count: usize) -> McResult<&'a [u8]> {
		let remaining = self.remaining();
		if count > remaining {
			return Err(McError::bounds(self.position, count, remaining));
		}
		let start = self.position;
		self.position += count;
		Ok(&self.buffer[start..self.position])
	}

	/// Takes the bytes for `count` elements of `width` bytes each in one
	/// bounds check, so a bogus count fails before anything is allocated.
	fn take_elements(&mut self, count: usize, width: usize) -> McResult<&'a [u8]> {
		match count.checked_mul(width) {
			Some(needed) => self.take(needed),
			None => Err(McError::bounds(self.position, usize::MAX, self.remaining())),
		}
	}

	fn read_u8(&mut self) -> McResult<u8> {
		Ok(self.take(1)?[0])
	}

	fn read_i8(&mut self) -> McResult<i8> {
		Ok(self.read_u8()? as i8)
	}

	fn read_tag_id(&mut self) -> McResult<TagID> {
		TagID::try_from(self.read_u8()?)
	}

	/// Reads a signed 32-bit length prefix.
	fn read_count(&mut self) -> McResult<usize> {
		let count = BigEndian::read_i32(self.take(4)?);
		usize::try_from(count).map_err(|_| McError::NegativeLength(count))
	}

	fn read_string(&mut self) -> McResult<String> {
		let length = BigEndian::read_u16(self.take(2)?) as usize;
		let bytes = self.take(length)?;
		Ok(std::str::from_utf8(bytes)?.to_owned())
	}

	fn read_byte_array(&mut self) -> McResult<Vec<u8>> {
		let count = self.read_count()?;
		Ok(self.take(count)?.to_vec())
	}

	fn read_int_array(&mut self) -> McResult<Vec<i32>> {
		let count = self.read_count()?;
		let bytes = self.take_elements(count, 4)?;
		Ok(bytes.chunks_exact(4).map(BigEndian::read_i32).collect())
	}

	fn read_long_array(&mut self) -> McResult<Vec<i64>> {
		let count = self.read_count()?;
		let bytes = self.take_elements(count, 8)?;
		Ok(bytes.chunks_exact(8).map(BigEndian::read_i64).collect())
	}

	fn read_list(&mut self, depth: usize) -> McResult<ListTag> {
		let depth = self.enter(depth)?;
		let element = self.read_tag_id()?;
		let count = self.read_count()?;
		macro_rules! fixed {
			($variant:ident, $width:literal, $read:path) => {
				ListTag::$variant(
					self.take_elements(count, $width)?
						.chunks_exact($width)
						.map($read)
						.collect()
				)
			};
		}
		macro_rules! each {
			($variant:ident, $read:expr) => {
				{
					// Every element occupies at least one byte, so the capacity
					// can't usefully exceed what is left in the buffer.
					let mut items = Vec::with_capacity(count.min(self.remaining()));
					for _ in 0..count {
						items.push($read);
					}
					ListTag::$variant(items)
				}
			};
		}
		Ok(match element {
			TagID::End => {
				if count != 0 {
					return Err(McError::EndTagMarker);
				}
				ListTag::End
			}
			TagID::Byte => ListTag::Byte(
				self.take(count)?.iter().map(|&byte| byte as i8).collect()
			),
			TagID::Short => fixed!(Short, 2, BigEndian::read_i16),
			TagID::Int => fixed!(Int, 4, BigEndian::read_i32),
			TagID::Long => fixed!(Long, 8, BigEndian::read_i64),
			TagID::Float => fixed!(Float, 4, BigEndian::read_f32),
			TagID::Double => fixed!(Double, 8, BigEndian::read_f64),
			TagID::ByteArray => each!(ByteArray, self.read_byte_array()?),
			TagID::String => each!(String, self.read_string()?),
			TagID::List => each!(List, self.read_list(depth)?),
			TagID::Compound => each!(Compound, self.read_compound(depth)?),
			TagID::IntArray => each!(IntArray, self.read_int_array()?),
			TagID::LongArray => each!(LongArray, self.read_long_array()?),
		})
	}

	fn read_compound(&mut self, depth: usize) -> McResult<Map> {
		let depth = self.enter(depth)?;
		let mut map = Map::new();
		loop {
			if self.remaining() == 0 {
				return Err(McError::UnterminatedCompound {
					offset: self.position,
				});
			}
			let id = self.read_tag_id()?;
			if id == TagID::End {
				return Ok(map);
			}
			let name = self.read_string()?;
			let value = self.read_payload(id, depth)?;
			map.insert(name, value);
		}
	}
}
