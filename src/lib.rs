pub mod nbt;
pub mod region;
pub mod error;
pub mod macros;

pub use flate2;

pub use error::McError;
pub use error::McResult;

pub use nbt::{
	decode_root,
	tag::{Tag, ListTag, NamedTag, TagID},
	Map,
};
pub use region::{
	region_of,
	floor_mod,
	header_slot_offset,
	locate,
	timestamp_of,
	chunk::extract_chunk,
	regionfile::RegionFile,
};
