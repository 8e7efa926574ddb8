use chrono::{DateTime, Utc};

use crate::for_each_int_type;

/// A 32-bit Unix timestamp.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Timestamp(u32);

impl Timestamp {
	pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
		DateTime::<Utc>::try_from(*self).ok()
	}

	/// Seconds since the Unix epoch.
	pub fn seconds(&self) -> u32 {
		self.0
	}
}

macro_rules! __timestamp_impls {
	($type:ty) => {
		impl From<$type> for Timestamp {
			fn from(value: $type) -> Self {
				Self(value as u32)
			}
		}

		impl From<Timestamp> for $type {
			fn from(value: Timestamp) -> Self {
				value.0 as $type
			}
		}
	};
}

for_each_int_type!(__timestamp_impls);

impl From<DateTime<Utc>> for Timestamp {
	fn from(value: DateTime<Utc>) -> Self {
		Timestamp(value.timestamp() as u32)
	}
}

impl TryFrom<Timestamp> for DateTime<Utc> {
	type Error = ();

	fn try_from(value: Timestamp) -> Result<Self, Self::Error> {
		DateTime::<Utc>::from_timestamp(value.0 as i64, 0).ok_or(())
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.to_datetime() {
			Some(datetime) => write!(f, "{}", datetime.format("%Y-%m-%d %H:%M:%S UTC")),
			None => write!(f, "{}", self.0),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn converts_to_datetime() {
		let timestamp = Timestamp::from(1_700_000_000u32);
		let datetime = timestamp.to_datetime().unwrap();
		assert_eq!(datetime.timestamp(), 1_700_000_000);
		assert_eq!(Timestamp::from(datetime), timestamp);
		assert_eq!(timestamp.to_string(), "2023-11-14 22:13:20 UTC");
		assert_eq!(u32::from(timestamp), 1_700_000_000);
	}
}
