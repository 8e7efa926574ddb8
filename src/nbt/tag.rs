use crate::{
	McError,
	nbt::tagtype::*,
};

/// The wire type id of an NBT tag.
/// The discriminants are the ids written to the stream and must never
/// be renumbered.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum TagID {
	End = 0,
	Byte = 1,
	Short = 2,
	Int = 3,
	Long = 4,
	Float = 5,
	Double = 6,
	ByteArray = 7,
	String = 8,
	List = 9,
	Compound = 10,
	IntArray = 11,
	LongArray = 12,
}

impl TagID {
	/// The name of the tag type as it appears in the NBT specification.
	pub fn title(self) -> &'static str {
		match self {
			TagID::End => "TAG_End",
			TagID::Byte => "TAG_Byte",
			TagID::Short => "TAG_Short",
			TagID::Int => "TAG_Int",
			TagID::Long => "TAG_Long",
			TagID::Float => "TAG_Float",
			TagID::Double => "TAG_Double",
			TagID::ByteArray => "TAG_Byte_Array",
			TagID::String => "TAG_String",
			TagID::List => "TAG_List",
			TagID::Compound => "TAG_Compound",
			TagID::IntArray => "TAG_Int_Array",
			TagID::LongArray => "TAG_Long_Array",
		}
	}
}

impl TryFrom<u8> for TagID {
	type Error = McError;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		Ok(match value {
			0 => TagID::End,
			1 => TagID::Byte,
			2 => TagID::Short,
			3 => TagID::Int,
			4 => TagID::Long,
			5 => TagID::Float,
			6 => TagID::Double,
			7 => TagID::ByteArray,
			8 => TagID::String,
			9 => TagID::List,
			10 => TagID::Compound,
			11 => TagID::IntArray,
			12 => TagID::LongArray,
			unknown => return Err(McError::UnknownTagType(unknown)),
		})
	}
}

impl From<TagID> for u8 {
	fn from(value: TagID) -> Self {
		value as u8
	}
}

impl std::fmt::Display for TagID {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.title())
	}
}

/// A single decoded NBT value.
#[derive(Clone, Debug, PartialEq)]
pub enum Tag {
	End,
	Byte(Byte),
	Short(Short),
	Int(Int),
	Long(Long),
	Float(Float),
	Double(Double),
	ByteArray(ByteArray),
	String(String),
	List(ListTag),
	Compound(Compound),
	IntArray(IntArray),
	LongArray(LongArray),
}

/// A homogeneous NBT list. The variant is the declared element type, so
/// an empty list still remembers what it was declared to hold.
/// Lists declared with the End type can only be empty.
#[derive(Clone, Debug, PartialEq)]
pub enum ListTag {
	End,
	Byte(Vec<Byte>),
	Short(Vec<Short>),
	Int(Vec<Int>),
	Long(Vec<Long>),
	Float(Vec<Float>),
	Double(Vec<Double>),
	ByteArray(Vec<ByteArray>),
	String(Vec<String>),
	List(Vec<ListTag>),
	Compound(Vec<Compound>),
	IntArray(Vec<IntArray>),
	LongArray(Vec<LongArray>),
}

/// The root of an NBT document: a tag and the name it was stored under.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTag {
	pub name: String,
	pub tag: Tag,
}

impl NamedTag {
	pub fn new<S: Into<String>, T: Into<Tag>>(name: S, tag: T) -> Self {
		Self {
			name: name.into(),
			tag: tag.into(),
		}
	}

	pub fn id(&self) -> TagID {
		self.tag.id()
	}
}

impl Tag {
	pub fn id(&self) -> TagID {
		match self {
			Tag::End => TagID::End,
			Tag::Byte(_) => TagID::Byte,
			Tag::Short(_) => TagID::Short,
			Tag::Int(_) => TagID::Int,
			Tag::Long(_) => TagID::Long,
			Tag::Float(_) => TagID::Float,
			Tag::Double(_) => TagID::Double,
			Tag::ByteArray(_) => TagID::ByteArray,
			Tag::String(_) => TagID::String,
			Tag::List(_) => TagID::List,
			Tag::Compound(_) => TagID::Compound,
			Tag::IntArray(_) => TagID::IntArray,
			Tag::LongArray(_) => TagID::LongArray,
		}
	}

	/// Look up a member of a Compound tag. Returns `None` for every other type.
	pub fn get(&self, key: &str) -> Option<&Tag> {
		match self {
			Tag::Compound(map) => map.get(key),
			_ => None,
		}
	}

	pub fn as_compound(&self) -> Option<&Compound> {
		match self {
			Tag::Compound(map) => Some(map),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&ListTag> {
		match self {
			Tag::List(list) => Some(list),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Tag::String(text) => Some(text),
			_ => None,
		}
	}

	/// Widens any integral scalar tag to an `i64`.
	pub fn as_i64(&self) -> Option<i64> {
		match *self {
			Tag::Byte(value) => Some(value as i64),
			Tag::Short(value) => Some(value as i64),
			Tag::Int(value) => Some(value as i64),
			Tag::Long(value) => Some(value),
			_ => None,
		}
	}
}

impl ListTag {
	/// The declared element type of this list.
	pub fn element_id(&self) -> TagID {
		match self {
			ListTag::End => TagID::End,
			ListTag::Byte(_) => TagID::Byte,
			ListTag::Short(_) => TagID::Short,
			ListTag::Int(_) => TagID::Int,
			ListTag::Long(_) => TagID::Long,
			ListTag::Float(_) => TagID::Float,
			ListTag::Double(_) => TagID::Double,
			ListTag::ByteArray(_) => TagID::ByteArray,
			ListTag::String(_) => TagID::String,
			ListTag::List(_) => TagID::List,
			ListTag::Compound(_) => TagID::Compound,
			ListTag::IntArray(_) => TagID::IntArray,
			ListTag::LongArray(_) => TagID::LongArray,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			ListTag::End => 0,
			ListTag::Byte(list) => list.len(),
			ListTag::Short(list) => list.len(),
			ListTag::Int(list) => list.len(),
			ListTag::Long(list) => list.len(),
			ListTag::Float(list) => list.len(),
			ListTag::Double(list) => list.len(),
			ListTag::ByteArray(list) => list.len(),
			ListTag::String(list) => list.len(),
			ListTag::List(list) => list.len(),
			ListTag::Compound(list) => list.len(),
			ListTag::IntArray(list) => list.len(),
			ListTag::LongArray(list) => list.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Get a copy of the element at `index` wrapped as a [Tag].
	pub fn get(&self, index: usize) -> Option<Tag> {
		macro_rules! wrap {
			($list:ident => $variant:ident) => {
				$list.get(index).cloned().map(Tag::$variant)
			};
		}
		match self {
			ListTag::End => None,
			ListTag::Byte(list) => wrap!(list => Byte),
			ListTag::Short(list) => wrap!(list => Short),
			ListTag::Int(list) => wrap!(list => Int),
			ListTag::Long(list) => wrap!(list => Long),
			ListTag::Float(list) => wrap!(list => Float),
			ListTag::Double(list) => wrap!(list => Double),
			ListTag::ByteArray(list) => wrap!(list => ByteArray),
			ListTag::String(list) => wrap!(list => String),
			ListTag::List(list) => wrap!(list => List),
			ListTag::Compound(list) => wrap!(list => Compound),
			ListTag::IntArray(list) => wrap!(list => IntArray),
			ListTag::LongArray(list) => wrap!(list => LongArray),
		}
	}
}

impl Default for ListTag {
	fn default() -> Self {
		ListTag::End
	}
}

macro_rules! tag_from_impls {
	($($type:ty => $variant:ident;)+) => {
		$(
			impl From<$type> for Tag {
				fn from(value: $type) -> Self {
					Tag::$variant(value)
				}
			}

			impl From<Vec<$type>> for ListTag {
				fn from(value: Vec<$type>) -> Self {
					ListTag::$variant(value)
				}
			}
		)+
	};
}

tag_from_impls!(
	Byte => Byte;
	Short => Short;
	Int => Int;
	Long => Long;
	Float => Float;
	Double => Double;
	ByteArray => ByteArray;
	String => String;
	ListTag => List;
	Compound => Compound;
	IntArray => IntArray;
	LongArray => LongArray;
);

impl From<&str> for Tag {
	fn from(value: &str) -> Self {
		Tag::String(value.to_owned())
	}
}

impl From<Vec<&str>> for ListTag {
	fn from(value: Vec<&str>) -> Self {
		ListTag::String(value.into_iter().map(str::to_owned).collect())
	}
}

impl From<bool> for Tag {
	fn from(value: bool) -> Self {
		Tag::Byte(value as i8)
	}
}
