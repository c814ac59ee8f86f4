use pastpaper_drive::{FileContent, FileKind, PDF_MIME_TYPE, RemoteFile};

use crate::{Error, PaperService, Result};

const GENERIC_CONTENT_TYPE: &str = "application/octet-stream";
const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

impl PaperService {
	pub async fn file_metadata(&self, file_id: &str) -> Result<RemoteFile> {
		let file_id = validate_file_id(file_id)?;

		match self.store.file(file_id).await? {
			Some(item) => Ok(RemoteFile::from(item)),
			None => Err(Error::NotFound { message: format!("File {file_id} does not exist.") }),
		}
	}

	/// Downloads a file. Generic content types are replaced by one derived from the file kind.
	pub async fn file_content(&self, file_id: &str) -> Result<(RemoteFile, FileContent)> {
		let file = self.file_metadata(file_id).await?;
		let Some(mut content) = self.store.content(&file.id).await? else {
			return Err(Error::NotFound { message: format!("File {} has no content.", file.id) });
		};

		if content.content_type.is_empty() || content.content_type == GENERIC_CONTENT_TYPE {
			content.content_type = match file.kind {
				FileKind::Pdf => PDF_MIME_TYPE.to_string(),
				FileKind::Audio => AUDIO_CONTENT_TYPE.to_string(),
			};
		}

		tracing::debug!(file_id = file.id.as_str(), bytes = content.bytes.len(), "File downloaded.");

		Ok((file, content))
	}
}

fn validate_file_id(file_id: &str) -> Result<&str> {
	let trimmed = file_id.trim();

	if trimmed.is_empty()
		|| !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
	{
		return Err(Error::InvalidRequest {
			message: "file_id must be a non-empty identifier.".to_string(),
		});
	}

	Ok(trimmed)
}

#[cfg(test)]
mod tests {
	use super::validate_file_id;

	#[test]
	fn file_ids_reject_path_characters() {
		assert!(validate_file_id("1AbC_d-9").is_ok());
		assert!(validate_file_id("").is_err());
		assert!(validate_file_id("../etc").is_err());
		assert!(validate_file_id("a?alt=media").is_err());
	}
}
