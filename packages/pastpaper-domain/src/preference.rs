//! English preference among translated copies of the same paper.

use std::collections::HashMap;

use crate::language::is_language_token;

const TIME_ZONE_MARKER: &str = "TZ";

fn tokens(file_name: &str) -> Vec<&str> {
	let stem = file_name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(file_name);

	stem.split(['_', ' ', '-']).filter(|token| !token.is_empty()).collect()
}

pub fn has_language_token(file_name: &str) -> bool {
	tokens(file_name).into_iter().any(is_language_token)
}

/// The file name with language tokens and the extension removed, used to group translations.
pub fn base_name(file_name: &str) -> String {
	tokens(file_name)
		.into_iter()
		.filter(|token| !is_language_token(token))
		.map(str::to_lowercase)
		.collect::<Vec<_>>()
		.join("_")
}

/// Keeps one file per base name: the first language-free copy without a time-zone marker, else the
/// first language-free copy. Groups made only of translations are dropped. Output follows the order
/// in which base names first appear.
pub fn prefer_english<T, F>(files: Vec<T>, name_of: F) -> Vec<T>
where
	F: Fn(&T) -> &str,
{
	let mut order = Vec::new();
	let mut groups: HashMap<String, Vec<T>> = HashMap::new();

	for file in files {
		let key = base_name(name_of(&file));

		if !groups.contains_key(&key) {
			order.push(key.clone());
		}

		groups.entry(key).or_default().push(file);
	}

	order
		.into_iter()
		.filter_map(|key| {
			let candidates = groups.remove(&key)?;
			let mut english =
				candidates.into_iter().filter(|file| !has_language_token(name_of(file)));
			let first = english.next()?;

			if !name_of(&first).contains(TIME_ZONE_MARKER) {
				return Some(first);
			}

			Some(english.find(|file| !name_of(file).contains(TIME_ZONE_MARKER)).unwrap_or(first))
		})
		.collect()
}
