//! Named Binary Tag (NBT) data model, decoder, and encoder.

pub mod tag;
pub mod tagtype;
pub mod decode;
pub mod encode;
pub mod display;
pub mod macros;

use crate::McResult;

/// Compound members keep the order they were read in.
pub type Map = indexmap::IndexMap<String, tag::Tag>;

/// Decode a complete NBT document from `buffer` with the default options.
/// See [decode::NbtDecoder::decode_root].
pub fn decode_root(buffer: &[u8]) -> McResult<tag::NamedTag> {
	decode::NbtDecoder::new(buffer).decode_root()
}

/// Encode a complete NBT document into a new buffer.
pub fn encode_root(root: &tag::NamedTag) -> McResult<Vec<u8>> {
	let mut buffer = Vec::new();
	encode::NbtEncoder::new(&mut buffer).write_root(root)?;
	Ok(buffer)
}
