//! Classification of group folder names against the catalog configuration.

use pastpaper_config::Catalog;

use crate::request::{Paper, StructuredQuery};

pub fn is_audio_group(catalog: &Catalog, group: &str) -> bool {
	group == catalog.audio_group
}

pub fn is_language_acquisition_group(catalog: &Catalog, group: &str) -> bool {
	group == catalog.language_acquisition_group
}

/// Language groups keep every language variant of a paper.
pub fn is_language_group(catalog: &Catalog, group: &str) -> bool {
	group.contains(&catalog.language_group_marker)
}

/// Music papers carry no paper number and may be shared across levels.
pub fn is_music(catalog: &Catalog, group: &str, subject: &str) -> bool {
	group.contains(&catalog.arts_group_marker) && subject.trim().eq_ignore_ascii_case("music")
}

/// Language acquisition paper 2 files are named inconsistently, so the paper number never narrows the remote query.
pub fn skips_remote_paper_filter(catalog: &Catalog, query: &StructuredQuery) -> bool {
	is_music(catalog, &query.group, &query.subject)
		|| (is_language_acquisition_group(catalog, &query.group) && query.paper == Some(Paper::Two))
}

pub fn prefers_english(catalog: &Catalog, group: &str) -> bool {
	!is_audio_group(catalog, group) && !is_language_group(catalog, group)
}
