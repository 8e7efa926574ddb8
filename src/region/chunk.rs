use std::io::Read;

use byteorder::{BigEndian, ByteOrder};
use flate2::read::ZlibDecoder;

use crate::{McError, McResult};

use super::compressionscheme::CompressionScheme;

/// The framed, still compressed body of a chunk.
/// `[length: i32][scheme: u8][payload: length - 1 bytes]`
#[derive(Debug, Clone, Copy)]
pub struct CompressedChunk<'a> {
	/// Counts the compression scheme byte plus the payload.
	pub byte_length: i32,
	pub compression_scheme: CompressionScheme,
	pub payload: &'a [u8],
}

impl<'a> CompressedChunk<'a> {
	/// Reads the chunk framing that begins at byte `offset` of a region buffer.
	pub fn read_at(buffer: &'a [u8], offset: u64) -> McResult<Self> {
		let start = usize::try_from(offset)
			.map_err(|_| McError::bounds(usize::MAX, 4, 0))?;
		let remaining = buffer.len().saturating_sub(start);
		if remaining < 4 {
			return Err(McError::bounds(start, 4, remaining));
		}
		let byte_length = BigEndian::read_i32(&buffer[start..start + 4]);
		if byte_length < 1 {
			return Err(McError::InvalidChunkLength(byte_length));
		}
		if remaining < 5 {
			return Err(McError::bounds(start + 4, 1, 0));
		}
		let compression_scheme = CompressionScheme::try_from(buffer[start + 4])?;
		if !compression_scheme.is_supported() {
			return Err(McError::UnsupportedCompression(compression_scheme.into()));
		}
		let payload_start = start + 5;
		let payload_length = byte_length as usize - 1;
		let Some(payload) = buffer.get(payload_start..payload_start + payload_length) else {
			return Err(McError::bounds(payload_start, payload_length, remaining - 5));
		};
		Ok(Self {
			byte_length,
			compression_scheme,
			payload,
		})
	}

	/// The number of bytes the framed chunk occupies, not counting sector padding.
	pub fn framed_size(&self) -> u64 {
		self.byte_length as u64 + 4
	}

	/// Inflates the payload into the chunk's NBT buffer.
	pub fn decompress(&self) -> McResult<Vec<u8>> {
		match self.compression_scheme {
			CompressionScheme::ZLib => {
				let mut data = Vec::new();
				ZlibDecoder::new(self.payload)
					.read_to_end(&mut data)
					.map_err(McError::CorruptPayload)?;
				Ok(data)
			}
			unsupported => Err(McError::UnsupportedCompression(unsupported.into())),
		}
	}
}

/// Reads and inflates the chunk body at byte `offset` of a region buffer,
/// producing the chunk's NBT document.
pub fn extract_chunk(buffer: &[u8], offset: u64) -> McResult<Vec<u8>> {
	let chunk = CompressedChunk::read_at(buffer, offset)?;
	let data = chunk.decompress()?;
	log::debug!(
		"inflated {} byte payload at offset {} into {} bytes",
		chunk.payload.len(),
		offset,
		data.len(),
	);
	Ok(data)
}
