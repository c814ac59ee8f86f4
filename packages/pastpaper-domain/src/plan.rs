//! Remote queries for the primary search and the supplementary language passes.

use pastpaper_config::Catalog;
use pastpaper_drive::{AUDIO_EXTENSION, AUDIO_MIME_TYPES, PDF_MIME_TYPE, Query};

use crate::{
	groups,
	language::{CourseKind, LanguageCourse},
	level::{level_fragments, mentions_level},
	paper::{is_comprehension, paper_fragments, paper_numbers},
	request::{Level, Paper, StructuredQuery},
	subject::{self, normalize_name},
};

/// Matches audio by MIME type or, for mislabelled uploads, by extension.
pub fn audio_filter() -> Query {
	Query::any(
		AUDIO_MIME_TYPES
			.iter()
			.map(|mime| Query::mime_type(*mime))
			.chain([Query::name_contains(AUDIO_EXTENSION)]),
	)
}

pub fn primary_query(catalog: &Catalog, query: &StructuredQuery, folder_id: &str) -> Query {
	if groups::is_audio_group(catalog, &query.group) {
		return Query::all([
			Query::in_parents(folder_id),
			audio_filter(),
			Query::name_contains(query.subject.trim()),
			Query::not_trashed(),
		]);
	}

	let spec = subject::split_variant(&query.subject);
	let subject_filter = match spec.variant {
		Some(variant) => Query::name_contains_any(subject::variant_fragments(&spec.base, variant)),
		None => Query::name_contains_any(subject::subject_fragments(&query.subject)),
	};
	let mut clauses = vec![
		Query::in_parents(folder_id),
		Query::mime_type(PDF_MIME_TYPE),
		Query::not_trashed(),
		subject_filter,
	];

	if let Some(level) = query.level
		&& !groups::is_music(catalog, &query.group, &query.subject)
	{
		clauses.push(Query::name_contains_any(level_fragments(level)));
	}
	if let Some(paper) = query.paper
		&& !groups::skips_remote_paper_filter(catalog, query)
	{
		clauses.push(Query::name_contains_any(paper_fragments(paper)));
	}

	Query::all(clauses)
}

/// Course audio tracks; an absent level falls back to SL.
pub fn audio_names(language: &str, level: Option<Level>) -> Query {
	let level = level.unwrap_or(Level::Sl);

	Query::name_contains_any([
		format!("{language}_B_{level}"),
		format!("{language}_ab_initio_{level}"),
	])
}

/// Audio tracks for a course, optionally scoped to a set of parent folders.
pub fn audio_query<I, S>(parents: I, language: &str, level: Option<Level>) -> Query
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	let parents: Vec<String> = parents.into_iter().map(Into::into).collect();
	let mut clauses = Vec::with_capacity(4);

	if !parents.is_empty() {
		clauses.push(Query::in_any_parent(parents));
	}

	clauses.extend([audio_filter(), audio_names(language, level), Query::not_trashed()]);

	Query::all(clauses)
}

fn course_marker(kind: CourseKind) -> &'static str {
	match kind {
		CourseKind::LanguageB => "B",
		CourseKind::AbInitio => "ab_initio",
	}
}

/// Paper 2 PDFs for a course in the language-acquisition folder.
pub fn auxiliary_query(folder_id: &str, course: &LanguageCourse) -> Query {
	let language = &course.language;
	let marker = course_marker(course.kind);
	let spaced = marker.replace('_', " ");

	Query::all([
		Query::in_parents(folder_id),
		Query::mime_type(PDF_MIME_TYPE),
		Query::not_trashed(),
		Query::name_contains_any([
			format!("{language}_{marker}_paper_2"),
			format!("{language} {spaced} paper 2"),
			format!("{language}_{marker}_paper2"),
			format!("{language} {spaced} paper2"),
		]),
	])
}

pub fn matches_auxiliary(file_name: &str, course: &LanguageCourse, level: Option<Level>) -> bool {
	let name = normalize_name(file_name);
	let language = normalize_name(&course.language);
	let level_ok = level.is_none_or(|level| mentions_level(file_name, level));

	name.starts_with(&language)
		&& level_ok
		&& (paper_numbers(file_name).contains(&Paper::Two.number()) || is_comprehension(file_name))
}
