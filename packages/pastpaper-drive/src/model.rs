use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";
pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const AUDIO_MIME_TYPES: [&str; 2] = ["audio/mpeg", "audio/mp3"];
pub const AUDIO_EXTENSION: &str = ".mp3";

/// A raw object returned by the remote store listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub mime_type: String,
	#[serde(default, deserialize_with = "deserialize_size")]
	pub size: Option<u64>,
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_time: Option<OffsetDateTime>,
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub modified_time: Option<OffsetDateTime>,
	#[serde(default)]
	pub parents: Vec<String>,
	#[serde(default)]
	pub web_view_link: Option<String>,
	#[serde(default)]
	pub trashed: bool,
}
impl DriveItem {
	pub fn is_folder(&self) -> bool {
		self.mime_type == FOLDER_MIME_TYPE
	}

	pub fn kind(&self) -> FileKind {
		if self.mime_type.starts_with("audio/") {
			return FileKind::Audio;
		}
		if self.mime_type != PDF_MIME_TYPE
			&& self.name.to_lowercase().ends_with(AUDIO_EXTENSION)
		{
			return FileKind::Audio;
		}

		FileKind::Pdf
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
	Pdf,
	Audio,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderHandle {
	pub id: String,
	pub name: String,
}
impl From<DriveItem> for FolderHandle {
	fn from(item: DriveItem) -> Self {
		Self { id: item.id, name: item.name }
	}
}

/// Immutable snapshot of a remote file as handed to callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
	pub id: String,
	pub name: String,
	pub size: Option<u64>,
	#[serde(with = "time::serde::rfc3339::option")]
	pub created_time: Option<OffsetDateTime>,
	#[serde(with = "time::serde::rfc3339::option")]
	pub modified_time: Option<OffsetDateTime>,
	pub view_link: String,
	#[serde(rename = "type")]
	pub kind: FileKind,
}
impl From<DriveItem> for RemoteFile {
	fn from(item: DriveItem) -> Self {
		let kind = item.kind();
		let view_link = item
			.web_view_link
			.unwrap_or_else(|| format!("https://drive.google.com/file/d/{}/view", item.id));

		Self {
			id: item.id,
			name: item.name,
			size: item.size,
			created_time: item.created_time,
			modified_time: item.modified_time,
			view_link,
			kind,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileContent {
	pub content_type: String,
	pub bytes: Vec<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileList {
	#[serde(default)]
	pub(crate) files: Vec<DriveItem>,
	pub(crate) next_page_token: Option<String>,
}

// The remote encodes int64 fields as JSON strings.
fn deserialize_size<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Text(String),
		Number(u64),
	}

	match Option::<Raw>::deserialize(deserializer)? {
		None => Ok(None),
		Some(Raw::Number(value)) => Ok(Some(value)),
		Some(Raw::Text(text)) => text.parse().map(Some).map_err(serde::de::Error::custom),
	}
}
