//! SNBT-style text output for tags.
//!
//! `{}` prints everything on one line. `{:#}` spreads Compounds and Lists of
//! Compounds/Lists over multiple lines with four-space indentation.

use std::fmt::{self, Display, Formatter, Write};

use crate::nbt::{
	Map,
	tag::*,
};

fn is_bare_key(key: &str) -> bool {
	!key.is_empty()
	&& key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+'))
}

fn write_quoted(f: &mut Formatter<'_>, text: &str) -> fmt::Result {
	f.write_char('"')?;
	for c in text.chars() {
		match c {
			'"' => f.write_str("\\\"")?,
			'\\' => f.write_str("\\\\")?,
			'\n' => f.write_str("\\n")?,
			c => f.write_char(c)?,
		}
	}
	f.write_char('"')
}

fn write_key(f: &mut Formatter<'_>, key: &str) -> fmt::Result {
	if is_bare_key(key) {
		f.write_str(key)
	} else {
		write_quoted(f, key)
	}
}

fn write_indent(f: &mut Formatter<'_>, indent: usize) -> fmt::Result {
	for _ in 0..indent {
		f.write_str("    ")?;
	}
	Ok(())
}

fn write_array<T, I>(f: &mut Formatter<'_>, prefix: &str, suffix: &str, items: I) -> fmt::Result
where
T: Display,
I: IntoIterator<Item = T> {
	write!(f, "[{prefix};")?;
	for (i, item) in items.into_iter().enumerate() {
		if i > 0 {
			f.write_char(',')?;
		}
		write!(f, "{item}{suffix}")?;
	}
	f.write_char(']')
}

// Bytes are signed on the wire, like Byte tags.
fn write_byte_array(f: &mut Formatter<'_>, bytes: &[u8]) -> fmt::Result {
	write_array(f, "B", "b", bytes.iter().map(|byte| *byte as i8))
}

/// Writes `items` as a comma separated sequence between `open` and `close`,
/// one item per line when `pretty` is set.
fn write_seq<I, F>(
	f: &mut Formatter<'_>,
	open: char,
	close: char,
	items: I,
	pretty: Option<usize>,
	mut write_item: F,
) -> fmt::Result
where
I: ExactSizeIterator,
F: FnMut(&mut Formatter<'_>, I::Item, Option<usize>) -> fmt::Result {
	f.write_char(open)?;
	let empty = items.len() == 0;
	for (i, item) in items.enumerate() {
		if i > 0 {
			f.write_char(',')?;
		}
		if let Some(indent) = pretty {
			f.write_char('\n')?;
			write_indent(f, indent + 1)?;
		}
		write_item(f, item, pretty.map(|indent| indent + 1))?;
	}
	if let (Some(indent), false) = (pretty, empty) {
		f.write_char('\n')?;
		write_indent(f, indent)?;
	}
	f.write_char(close)
}

fn write_compound(f: &mut Formatter<'_>, map: &Map, pretty: Option<usize>) -> fmt::Result {
	write_seq(f, '{', '}', map.iter(), pretty, |f, (key, value), pretty| {
		write_key(f, key)?;
		f.write_str(if pretty.is_some() { ": " } else { ":" })?;
		write_tag(f, value, pretty)
	})
}

fn write_list(f: &mut Formatter<'_>, list: &ListTag, pretty: Option<usize>) -> fmt::Result {
	// Scalars stay on one line even in pretty mode.
	macro_rules! inline {
		($items:ident, $suffix:literal) => {
			write_seq(f, '[', ']', $items.iter(), None, |f, item, _| write!(f, "{item}{}", $suffix))
		};
	}
	match list {
		ListTag::End => f.write_str("[]"),
		ListTag::Byte(items) => inline!(items, "b"),
		ListTag::Short(items) => inline!(items, "s"),
		ListTag::Int(items) => inline!(items, ""),
		ListTag::Long(items) => inline!(items, "L"),
		ListTag::Float(items) => inline!(items, "f"),
		ListTag::Double(items) => inline!(items, "d"),
		ListTag::ByteArray(items) => write_seq(f, '[', ']', items.iter(), None, |f, item, _| write_byte_array(f, item)),
		ListTag::String(items) => write_seq(f, '[', ']', items.iter(), None, |f, item, _| write_quoted(f, item)),
		ListTag::IntArray(items) => write_seq(f, '[', ']', items.iter(), None, |f, item, _| write_array(f, "I", "", item)),
		ListTag::LongArray(items) => write_seq(f, '[', ']', items.iter(), None, |f, item, _| write_array(f, "L", "L", item)),
		ListTag::List(items) => write_seq(f, '[', ']', items.iter(), pretty, |f, item, pretty| write_list(f, item, pretty)),
		ListTag::Compound(items) => write_seq(f, '[', ']', items.iter(), pretty, |f, item, pretty| write_compound(f, item, pretty)),
	}
}

fn write_tag(f: &mut Formatter<'_>, tag: &Tag, pretty: Option<usize>) -> fmt::Result {
	match tag {
		Tag::End => f.write_str("END"),
		Tag::Byte(value) => write!(f, "{value}b"),
		Tag::Short(value) => write!(f, "{value}s"),
		Tag::Int(value) => write!(f, "{value}"),
		Tag::Long(value) => write!(f, "{value}L"),
		Tag::Float(value) => write!(f, "{value}f"),
		Tag::Double(value) => write!(f, "{value}d"),
		Tag::ByteArray(bytes) => write_byte_array(f, bytes),
		Tag::String(text) => write_quoted(f, text),
		Tag::List(list) => write_list(f, list, pretty),
		Tag::Compound(map) => write_compound(f, map, pretty),
		Tag::IntArray(values) => write_array(f, "I", "", values),
		Tag::LongArray(values) => write_array(f, "L", "L", values),
	}
}

impl Display for Tag {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let pretty = f.alternate().then_some(0);
		write_tag(f, self, pretty)
	}
}

impl Display for ListTag {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let pretty = f.alternate().then_some(0);
		write_list(f, self, pretty)
	}
}

impl Display for NamedTag {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write_key(f, &self.name)?;
		f.write_str(": ")?;
		let pretty = f.alternate().then_some(0);
		write_tag(f, &self.tag, pretty)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{compound, list};

	#[test]
	fn compact_output() {
		let tag = compound! {
			("xPos", -22i32),
			("Status", "full \"ish\""),
			("light", vec![1u8, 2]),
			("Heights", vec![3i64]),
			("pos", list![1.5f64, 2.0]),
			("empty list", list![]),
			("nested", compound! {}),
		};
		assert_eq!(
			tag.to_string(),
			"{xPos:-22,Status:\"full \\\"ish\\\"\",light:[B;1b,2b],Heights:[L;3L],pos:[1.5d,2d],\"empty list\":[],nested:{}}"
		);
	}

	#[test]
	fn byte_arrays_print_signed() {
		assert_eq!(Tag::ByteArray(vec![200, 255, 7]).to_string(), "[B;-56b,-1b,7b]");
		let list = ListTag::ByteArray(vec![vec![128]]);
		assert_eq!(list.to_string(), "[[B;-128b]]");
		assert_eq!(ListTag::Byte(vec![-56, -1]).to_string(), "[-56b,-1b]");
	}

	#[test]
	fn pretty_output() {
		let root = NamedTag::new("", compound! {
			("a", 1i8),
			("b", compound! { ("c", 2i16) }),
		});
		assert_eq!(
			format!("{root:#}"),
			"\"\": {\n    a: 1b,\n    b: {\n        c: 2s\n    }\n}"
		);
	}
}
