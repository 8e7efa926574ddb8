use crate::McError;

/// Compression scheme byte that precedes every chunk payload.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionScheme {
	/// GZip compression is used.
	GZip = 1,
	/// ZLib compression is used.
	ZLib = 2,
	/// Data is uncompressed.
	Uncompressed = 3,
}

impl CompressionScheme {
	/// Only zlib payloads can be extracted.
	pub fn is_supported(self) -> bool {
		matches!(self, CompressionScheme::ZLib)
	}
}

impl TryFrom<u8> for CompressionScheme {
	type Error = McError;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		match value {
			1 => Ok(Self::GZip),
			2 => Ok(Self::ZLib),
			3 => Ok(Self::Uncompressed),
			unexpected => Err(McError::UnsupportedCompression(unexpected)),
		}
	}
}

impl From<CompressionScheme> for u8 {
	fn from(value: CompressionScheme) -> Self {
		value as u8
	}
}
