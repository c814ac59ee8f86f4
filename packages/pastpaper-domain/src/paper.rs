use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;

use crate::{request::Paper, subject::normalize_name};

static PAPER_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)paper[\s_]*(\d+)").expect("Paper number regex must compile.")
});

const COMPREHENSION_MARKERS: [&str; 2] = ["reading_comprehension", "listening_comprehension"];

pub fn paper_fragments(paper: Paper) -> Vec<String> {
	let n = paper.number();

	vec![format!("Paper {n}"), format!("paper_{n}"), format!("paper {n}"), format!("Paper_{n}")]
}

/// Every paper number mentioned in a file name.
pub fn paper_numbers(file_name: &str) -> BTreeSet<u32> {
	PAPER_NUMBER
		.captures_iter(file_name)
		.filter_map(|captures| captures.get(1)?.as_str().parse().ok())
		.collect()
}

pub fn is_comprehension(file_name: &str) -> bool {
	let name = normalize_name(file_name);

	COMPREHENSION_MARKERS.iter().any(|marker| name.contains(marker))
}

/// Keeps a file that names the requested paper and no other; paper 2 also admits comprehension files.
pub fn matches_paper(file_name: &str, paper: Paper) -> bool {
	let numbers = paper_numbers(file_name);
	let exact = numbers.len() == 1 && numbers.contains(&paper.number());

	exact || (paper == Paper::Two && is_comprehension(file_name))
}
