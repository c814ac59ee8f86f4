use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use pastpaper_domain::{
	Paper, StructuredQuery, groups,
	language::{self, LanguageCourse},
	level, paper, plan, preference, subject,
};
use pastpaper_drive::{DriveItem, FileKind, RemoteFile};

use crate::{PaperService, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
	pub files: Vec<RemoteFile>,
}

/// Where the supplementary audio pass looks, in order. The first strategy that finds audio wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioStrategy {
	/// The audio group folder of the requested session.
	Scoped,
	/// Every group folder of the requested session.
	Broader,
	/// The whole store, unscoped.
	Global,
}
impl AudioStrategy {
	pub const ORDER: [AudioStrategy; 3] = [Self::Scoped, Self::Broader, Self::Global];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Scoped => "scoped",
			Self::Broader => "broader",
			Self::Global => "global",
		}
	}
}

pub(crate) struct StrategyOutcome {
	pub(crate) found: bool,
	pub(crate) files: Vec<DriveItem>,
}
impl StrategyOutcome {
	fn skipped() -> Self {
		Self { found: false, files: Vec::new() }
	}
}

impl PaperService {
	pub async fn search(&self, query: StructuredQuery) -> Result<SearchResponse> {
		query.validate(&self.cfg.catalog)?;

		let mut files = Vec::new();
		let mut seen = HashSet::new();

		merge_distinct(&mut files, &mut seen, self.primary_search(&query).await?);

		if let Some(course) = self.supplementary_course(&query) {
			let (audio, auxiliary) = tokio::join!(
				self.audio_supplement(&query, &course),
				self.auxiliary_supplement(&query, &course)
			);

			merge_distinct(&mut files, &mut seen, audio?);
			merge_distinct(&mut files, &mut seen, auxiliary?);
		}

		tracing::info!(
			year = query.year,
			month = %query.month,
			group = query.group.as_str(),
			subject = query.subject.as_str(),
			count = files.len(),
			"Search completed."
		);

		Ok(SearchResponse { files: files.into_iter().map(RemoteFile::from).collect() })
	}

	async fn primary_search(&self, query: &StructuredQuery) -> Result<Vec<DriveItem>> {
		let catalog = &self.cfg.catalog;
		let Some(folder) = self.resolve_group_folder(query.year, query.month, &query.group).await?
		else {
			return Ok(Vec::new());
		};
		let remote = plan::primary_query(catalog, query, &folder.id);
		let mut items = self.fetch(&remote, "primary").await?;

		if groups::is_audio_group(catalog, &query.group) {
			items.retain(|item| item.kind() == FileKind::Audio);

			return Ok(items);
		}

		Ok(self.post_filter(query, items))
	}

	// Order matters: translations collapse before variant and paper checks run on the survivors.
	fn post_filter(&self, query: &StructuredQuery, mut items: Vec<DriveItem>) -> Vec<DriveItem> {
		let catalog = &self.cfg.catalog;
		let music = groups::is_music(catalog, &query.group, &query.subject);

		if groups::prefers_english(catalog, &query.group) {
			items = preference::prefer_english(items, |item| item.name.as_str());
		}

		let spec = subject::split_variant(&query.subject);

		match spec.variant {
			Some(variant) =>
				items.retain(|item| subject::matches_variant(&item.name, &spec.base, variant)),
			None => items.retain(|item| subject::matches_subject(&item.name, &query.subject)),
		}

		if let Some(requested) = query.paper
			&& !music
		{
			items.retain(|item| paper::matches_paper(&item.name, requested));
		}
		if let Some(requested) = query.level
			&& music
		{
			items.retain(|item| level::matches_music_level(&item.name, requested));
		}

		items
	}

	fn supplementary_course(&self, query: &StructuredQuery) -> Option<LanguageCourse> {
		let catalog = &self.cfg.catalog;

		if query.paper != Some(Paper::Two)
			|| query.year < catalog.audio_supplement_min_year
			|| groups::is_audio_group(catalog, &query.group)
		{
			return None;
		}

		language::language_course(&query.subject)
	}

	async fn audio_supplement(
		&self,
		query: &StructuredQuery,
		course: &LanguageCourse,
	) -> Result<Vec<DriveItem>> {
		for strategy in AudioStrategy::ORDER {
			let outcome = self.run_audio_strategy(strategy, query, course).await?;

			if outcome.found {
				tracing::debug!(
					strategy = strategy.as_str(),
					language = course.language.as_str(),
					count = outcome.files.len(),
					"Audio strategy resolved."
				);

				return Ok(outcome.files);
			}
		}

		Ok(Vec::new())
	}

	async fn run_audio_strategy(
		&self,
		strategy: AudioStrategy,
		query: &StructuredQuery,
		course: &LanguageCourse,
	) -> Result<StrategyOutcome> {
		let parents: Vec<String> = match strategy {
			AudioStrategy::Scoped => {
				let audio_group = &self.cfg.catalog.audio_group;

				match self.resolve_group_folder(query.year, query.month, audio_group).await? {
					Some(folder) => vec![folder.id],
					None => return Ok(StrategyOutcome::skipped()),
				}
			},
			AudioStrategy::Broader => {
				let folders = self.list_subject_folders(query.year, query.month).await?;

				if folders.is_empty() {
					return Ok(StrategyOutcome::skipped());
				}

				folders.into_iter().map(|folder| folder.id).collect()
			},
			AudioStrategy::Global => Vec::new(),
		};
		let remote = plan::audio_query(parents, &course.language, query.level);
		let mut files = self.fetch(&remote, strategy.as_str()).await?;

		files.retain(|item| item.kind() == FileKind::Audio);

		Ok(StrategyOutcome { found: !files.is_empty(), files })
	}

	async fn auxiliary_supplement(
		&self,
		query: &StructuredQuery,
		course: &LanguageCourse,
	) -> Result<Vec<DriveItem>> {
		let catalog = &self.cfg.catalog;

		if groups::is_language_acquisition_group(catalog, &query.group) {
			return Ok(Vec::new());
		}

		let Some(folder) = self
			.resolve_group_folder(query.year, query.month, &catalog.language_acquisition_group)
			.await?
		else {
			return Ok(Vec::new());
		};
		let mut files = self.fetch(&plan::auxiliary_query(&folder.id, course), "auxiliary").await?;

		files.retain(|item| plan::matches_auxiliary(&item.name, course, query.level));

		Ok(files)
	}
}

fn merge_distinct(target: &mut Vec<DriveItem>, seen: &mut HashSet<String>, items: Vec<DriveItem>) {
	for item in items {
		if seen.insert(item.id.clone()) {
			target.push(item);
		}
	}
}
