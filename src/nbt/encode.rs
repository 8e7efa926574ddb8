//! Writes tags in the same wire format that [super::decode] reads.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::{
	McError, McResult,
	nbt::{
		Map,
		tag::*,
	},
};

pub struct NbtEncoder<W: Write> {
	writer: W,
}

impl<W: Write> NbtEncoder<W> {
	pub fn new(writer: W) -> Self {
		Self {
			writer,
		}
	}

	/// Writes a named root tag. Returns the number of bytes written.
	pub fn write_root(&mut self, root: &NamedTag) -> McResult<usize> {
		self.writer.write_u8(root.tag.id().into())?;
		Ok(1 + self.write_string(&root.name)? + self.write_payload(&root.tag)?)
	}

	/// Writes a tag's payload without a type id or name.
	pub fn write_payload(&mut self, tag: &Tag) -> McResult<usize> {
		Ok(match tag {
			Tag::End => 0,
			Tag::Byte(value) => {
				self.writer.write_i8(*value)?;
				1
			}
			Tag::Short(value) => {
				self.writer.write_i16::<BigEndian>(*value)?;
				2
			}
			Tag::Int(value) => {
				self.writer.write_i32::<BigEndian>(*value)?;
				4
			}
			Tag::Long(value) => {
				self.writer.write_i64::<BigEndian>(*value)?;
				8
			}
			Tag::Float(value) => {
				self.writer.write_f32::<BigEndian>(*value)?;
				4
			}
			Tag::Double(value) => {
				self.writer.write_f64::<BigEndian>(*value)?;
				8
			}
			Tag::ByteArray(bytes) => self.write_byte_array(bytes)?,
			Tag::String(text) => self.write_string(text)?,
			Tag::List(list) => self.write_list(list)?,
			Tag::Compound(map) => self.write_compound(map)?,
			Tag::IntArray(values) => self.write_int_array(values)?,
			Tag::LongArray(values) => self.write_long_array(values)?,
		})
	}

	fn write_count(&mut self, count: usize) -> McResult<usize> {
		let count = i32::try_from(count).map_err(|_| McError::ListTooLong(count))?;
		self.writer.write_i32::<BigEndian>(count)?;
		Ok(4)
	}

	fn write_string(&mut self, text: &str) -> McResult<usize> {
		let length = u16::try_from(text.len()).map_err(|_| McError::StringTooLong(text.len()))?;
		self.writer.write_u16::<BigEndian>(length)?;
		self.writer.write_all(text.as_bytes())?;
		Ok(2 + text.len())
	}

	fn write_byte_array(&mut self, bytes: &[u8]) -> McResult<usize> {
		self.write_count(bytes.len())?;
		self.writer.write_all(bytes)?;
		Ok(4 + bytes.len())
	}

	fn write_int_array(&mut self, values: &[i32]) -> McResult<usize> {
		self.write_count(values.len())?;
		for value in values {
			self.writer.write_i32::<BigEndian>(*value)?;
		}
		Ok(4 + values.len() * 4)
	}

	fn write_long_array(&mut self, values: &[i64]) -> McResult<usize> {
		self.write_count(values.len())?;
		for value in values {
			self.writer.write_i64::<BigEndian>(*value)?;
		}
		Ok(4 + values.len() * 8)
	}

	fn write_list(&mut self, list: &ListTag) -> McResult<usize> {
		self.writer.write_u8(list.element_id().into())?;
		let mut size = 1 + self.write_count(list.len())?;
		macro_rules! each {
			($items:ident, |$item:ident| $write:expr) => {
				for $item in $items {
					size += $write;
				}
			};
		}
		match list {
			ListTag::End => (),
			ListTag::Byte(items) => each!(items, |item| { self.writer.write_i8(*item)?; 1 }),
			ListTag::Short(items) => each!(items, |item| { self.writer.write_i16::<BigEndian>(*item)?; 2 }),
			ListTag::Int(items) => each!(items, |item| { self.writer.write_i32::<BigEndian>(*item)?; 4 }),
			ListTag::Long(items) => each!(items, |item| { self.writer.write_i64::<BigEndian>(*item)?; 8 }),
			ListTag::Float(items) => each!(items, |item| { self.writer.write_f32::<BigEndian>(*item)?; 4 }),
			ListTag::Double(items) => each!(items, |item| { self.writer.write_f64::<BigEndian>(*item)?; 8 }),
			ListTag::ByteArray(items) => each!(items, |item| self.write_byte_array(item)?),
			ListTag::String(items) => each!(items, |item| self.write_string(item)?),
			ListTag::List(items) => each!(items, |item| self.write_list(item)?),
			ListTag::Compound(items) => each!(items, |item| self.write_compound(item)?),
			ListTag::IntArray(items) => each!(items, |item| self.write_int_array(item)?),
			ListTag::LongArray(items) => each!(items, |item| self.write_long_array(item)?),
		}
		Ok(size)
	}

	fn write_compound(&mut self, map: &Map) -> McResult<usize> {
		let mut size = 0;
		for (name, tag) in map {
			let id = tag.id();
			// An End member would terminate the compound early.
			if id == TagID::End {
				return Err(McError::EndTagMarker);
			}
			self.writer.write_u8(id.into())?;
			size += 1 + self.write_string(name)? + self.write_payload(tag)?;
		}
		self.writer.write_u8(TagID::End.into())?;
		Ok(size + 1)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{compound, list};
	use crate::nbt::{decode_root, encode_root, decode::NbtDecoder};

	#[test]
	fn encodes_simple_compound() {
		let root = NamedTag::new("", compound! { ("xPos", 5i32) });
		let bytes = encode_root(&root).unwrap();
		assert_eq!(
			bytes,
			[10, 0, 0, 3, 0, 4, b'x', b'P', b'o', b's', 0, 0, 0, 5, 0]
		);
	}

	#[test]
	fn written_size_matches_buffer() {
		let root = NamedTag::new("Level", compound! {
			("DataVersion", 3465i32),
			("Status", "minecraft:full"),
			("Heightmaps", compound! {
				("MOTION_BLOCKING", vec![1i64, 2, 3]),
			}),
			("sections", ListTag::Compound(vec![
				Map::from([
					("Y".to_owned(), Tag::Byte(-4)),
					("BlockLight".to_owned(), Tag::ByteArray(vec![0; 16])),
				]),
				Map::from([("Y".to_owned(), Tag::Byte(-3))]),
			])),
			("Pos", list![1.5f64, 64.0, -2.25]),
			("Tags", list!["a", "b"]),
			("Empty", ListTag::Compound(Vec::new())),
			("Nested", ListTag::List(vec![
				ListTag::Short(vec![1, 2]),
				ListTag::Short(vec![3]),
			])),
			("Biomes", vec![0i32; 4]),
			("Scale", 0.5f32),
			("Seed", i64::MIN),
		});
		let mut buffer = Vec::new();
		let written = NbtEncoder::new(&mut buffer).write_root(&root).unwrap();
		assert_eq!(written, buffer.len());

		let mut decoder = NbtDecoder::new(&buffer);
		assert_eq!(decoder.decode_root().unwrap(), root);
		assert_eq!(decoder.position(), buffer.len());
	}

	#[test]
	fn root_end_keeps_its_name() {
		let root = NamedTag::new("", Tag::End);
		let bytes = encode_root(&root).unwrap();
		assert_eq!(bytes, [0, 0, 0]);
		assert_eq!(decode_root(&bytes).unwrap(), root);
	}

	#[test]
	fn end_member_is_rejected() {
		let root = NamedTag::new("", compound! { ("end", Tag::End) });
		assert!(matches!(encode_root(&root), Err(McError::EndTagMarker)));
	}

	#[test]
	fn oversized_string_is_rejected() {
		let root = NamedTag::new("", "x".repeat(u16::MAX as usize + 1));
		assert!(matches!(encode_root(&root), Err(McError::StringTooLong(65536))));
		let root = NamedTag::new("", "x".repeat(u16::MAX as usize));
		let bytes = encode_root(&root).unwrap();
		assert_eq!(decode_root(&bytes).unwrap(), root);
	}
}
