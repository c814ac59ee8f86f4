use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use pastpaper_domain::{Month, filename, groups, plan};
use pastpaper_drive::{PDF_MIME_TYPE, Query};

use crate::{Error, PaperService, Result, cache::SubjectsKey};

const LANGUAGE_COURSE_SUFFIXES: [&str; 2] = ["_B", "_ab_initio"];

/// Picker state. The deepest selection present decides which level of options is returned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsRequest {
	#[serde(default)]
	pub year: Option<u16>,
	#[serde(default)]
	pub month: Option<Month>,
	#[serde(default)]
	pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum AvailableOptions {
	Years(Vec<u16>),
	Months(Vec<Month>),
	Groups(Vec<String>),
	Subjects(Vec<String>),
}

impl PaperService {
	pub async fn available_options(&self, req: OptionsRequest) -> Result<AvailableOptions> {
		let group = req.group.as_deref().map(str::trim).filter(|group| !group.is_empty());

		match (req.year, req.month, group) {
			(None, None, None) => Ok(AvailableOptions::Years(self.list_available_years().await?)),
			(Some(year), None, None) =>
				Ok(AvailableOptions::Months(self.list_available_months(year).await?)),
			(Some(year), Some(month), None) =>
				Ok(AvailableOptions::Groups(self.list_available_groups(year, month).await?)),
			(Some(year), Some(month), Some(group)) =>
				Ok(AvailableOptions::Subjects(self.get_available_subjects(year, month, group).await?)),
			_ => Err(Error::InvalidRequest {
				message: "month requires year, and group requires year and month.".to_string(),
			}),
		}
	}

	pub async fn list_available_groups(&self, year: u16, month: Month) -> Result<Vec<String>> {
		let folders = self.list_subject_folders(year, month).await?;

		Ok(folders.into_iter().map(|folder| folder.name).collect())
	}

	/// Subjects recovered from the file names inside a group folder, sorted and distinct.
	pub async fn get_available_subjects(
		&self,
		year: u16,
		month: Month,
		group: &str,
	) -> Result<Vec<String>> {
		let key = SubjectsKey { year, month, group: group.to_string() };

		if let Some(subjects) = self.cache.subjects(&key) {
			return Ok(subjects);
		}

		let catalog = &self.cfg.catalog;
		let folders = self.list_subject_folders(year, month).await?;
		let Some(folder) = folders.into_iter().find(|folder| folder.name == group) else {
			return Ok(Vec::new());
		};
		let audio = groups::is_audio_group(catalog, group);
		let kind_filter = if audio { plan::audio_filter() } else { Query::mime_type(PDF_MIME_TYPE) };
		let remote = Query::all([Query::in_parents(&folder.id), kind_filter, Query::not_trashed()]);
		let items = self.fetch(&remote, "subjects").await?;
		let mut subjects = BTreeSet::new();

		for item in items {
			let subject = if audio {
				filename::audio_subject_from_filename(&item.name)
			} else {
				filename::subject_from_filename(&item.name)
			};

			if let Some(subject) = subject {
				subjects.insert(subject);
			}
		}

		let mut subjects: Vec<String> = subjects.into_iter().collect();

		if groups::is_language_acquisition_group(catalog, group) {
			subjects.retain(|subject| {
				LANGUAGE_COURSE_SUFFIXES.iter().any(|suffix| subject.ends_with(suffix))
			});
		}

		if !subjects.is_empty() {
			self.cache.put_subjects(key, subjects.clone());
		}

		Ok(subjects)
	}
}
