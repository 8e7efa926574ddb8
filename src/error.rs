use thiserror::Error;

/// The master error type.
#[derive(Debug, Error)]
pub enum McError {
	#[error("IO Error: {0}")]
	IoError(#[from] std::io::Error),
	#[error("Chunk ({x}, {z}) is not present in the region file.")]
	ChunkAbsent {
		x: i32,
		z: i32,
	},
	#[error("Read of {needed} bytes at offset {offset} exceeds the {remaining} bytes remaining.")]
	BoundsError {
		offset: usize,
		needed: usize,
		remaining: usize,
	},
	#[error("Unsupported compression scheme: {0}")]
	UnsupportedCompression(u8),
	#[error("Failed to decompress chunk payload: {0}")]
	CorruptPayload(#[source] std::io::Error),
	#[error("Unknown Tag ID: {0}")]
	UnknownTagType(u8),
	#[error("Failed to convert to UTF-8 string: {0}")]
	Utf8DecodeError(#[from] std::str::Utf8Error),
	#[error("Buffer ended at offset {offset} before the Compound's End marker.")]
	UnterminatedCompound {
		offset: usize,
	},
	#[error("Region file is too small to contain a header.")]
	InvalidRegionFile,
	#[error("Invalid chunk length: {0}")]
	InvalidChunkLength(i32),
	#[error("Negative length prefix: {0}")]
	NegativeLength(i32),
	#[error("Tag nesting exceeded the maximum depth of {0}.")]
	DepthLimitExceeded(usize),
	#[error("Encountered a non-empty List with the End Tag ID.")]
	EndTagMarker,
	#[error("String of {0} bytes does not fit a 16-bit length prefix.")]
	StringTooLong(usize),
	#[error("Sequence of {0} elements does not fit a 32-bit length prefix.")]
	ListTooLong(usize),
}

impl McError {
	/// Shorthand for building a [McError::BoundsError].
	pub(crate) fn bounds(offset: usize, needed: usize, remaining: usize) -> Self {
		McError::BoundsError {
			offset,
			needed,
			remaining,
		}
	}
}

pub type McResult<T> = Result<T,McError>;
