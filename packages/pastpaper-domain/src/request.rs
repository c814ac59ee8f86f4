use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::groups;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
	May,
	November,
}
impl Month {
	pub const ALL: [Month; 2] = [Month::May, Month::November];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::May => "May",
			Self::November => "November",
		}
	}

	pub fn from_folder_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|month| month.as_str() == name)
	}
}
impl Display for Month {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
	#[serde(rename = "HL")]
	Hl,
	#[serde(rename = "SL")]
	Sl,
}
impl Level {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Hl => "HL",
			Self::Sl => "SL",
		}
	}
}
impl Display for Level {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Paper {
	One,
	Two,
	Three,
}
impl Paper {
	pub fn number(self) -> u32 {
		match self {
			Self::One => 1,
			Self::Two => 2,
			Self::Three => 3,
		}
	}

	pub fn from_number(number: u32) -> Option<Self> {
		match number {
			1 => Some(Self::One),
			2 => Some(Self::Two),
			3 => Some(Self::Three),
			_ => None,
		}
	}

	/// Accepts `"2"` as well as the picker's `"Paper 2"`.
	pub fn parse(raw: &str) -> Option<Self> {
		let trimmed = raw.trim();
		let digits = trimmed
			.strip_prefix("Paper")
			.or_else(|| trimmed.strip_prefix("paper"))
			.unwrap_or(trimmed)
			.trim_start_matches([' ', '_']);

		digits.parse().ok().and_then(Self::from_number)
	}
}
impl Display for Paper {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.number())
	}
}
impl Serialize for Paper {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}
impl<'de> Deserialize<'de> for Paper {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		match StringOrNumber::deserialize(deserializer)? {
			StringOrNumber::Number(number) => u32::try_from(number)
				.ok()
				.and_then(Self::from_number)
				.ok_or_else(|| serde::de::Error::custom(format!("unknown paper {number}"))),
			StringOrNumber::Text(text) => Self::parse(&text)
				.ok_or_else(|| serde::de::Error::custom(format!("unknown paper '{text}'"))),
		}
	}
}

/// A fully structured selection from the paper picker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredQuery {
	#[serde(deserialize_with = "deserialize_year")]
	pub year: u16,
	pub month: Month,
	pub group: String,
	pub subject: String,
	#[serde(default)]
	pub level: Option<Level>,
	#[serde(default)]
	pub paper: Option<Paper>,
}
impl StructuredQuery {
	/// Checks that level and paper are present exactly when the group and subject call for them.
	/// The year is not range-checked; a session missing from the store simply yields nothing.
	pub fn validate(&self, catalog: &pastpaper_config::Catalog) -> Result<(), InvalidQuery> {
		if self.group.trim().is_empty() {
			return Err(InvalidQuery::MissingField { field: "group" });
		}
		if self.subject.trim().is_empty() {
			return Err(InvalidQuery::MissingField { field: "subject" });
		}

		if groups::is_audio_group(catalog, &self.group) {
			if self.level.is_some() {
				return Err(InvalidQuery::NotApplicable { field: "level", reason: "audio files" });
			}
			if self.paper.is_some() {
				return Err(InvalidQuery::NotApplicable { field: "paper", reason: "audio files" });
			}

			return Ok(());
		}
		if self.level.is_none() {
			return Err(InvalidQuery::MissingField { field: "level" });
		}
		if groups::is_music(catalog, &self.group, &self.subject) {
			if self.paper.is_some() {
				return Err(InvalidQuery::NotApplicable { field: "paper", reason: "music" });
			}

			return Ok(());
		}
		if self.paper.is_none() {
			return Err(InvalidQuery::MissingField { field: "paper" });
		}

		Ok(())
	}
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidQuery {
	#[error("{field} is required.")]
	MissingField { field: &'static str },
	#[error("{field} does not apply to {reason}.")]
	NotApplicable { field: &'static str, reason: &'static str },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
	Number(u64),
	Text(String),
}

fn deserialize_year<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
	D: Deserializer<'de>,
{
	match StringOrNumber::deserialize(deserializer)? {
		StringOrNumber::Number(number) => u16::try_from(number).map_err(serde::de::Error::custom),
		StringOrNumber::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
	}
}
