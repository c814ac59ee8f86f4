//! Subject names recovered from file names, used to populate the subject picker.

use std::sync::LazyLock;

use regex::Regex;

/// A naming convention that yields a subject. Rules are tried in order and the first match wins.
pub struct SubjectRule {
	pub name: &'static str,
	pattern: Regex,
}

static SUBJECT_RULES: LazyLock<Vec<SubjectRule>> = LazyLock::new(|| {
	[
		("music_prefix", r"^(Music)(?:___|_)"),
		("paper_separator", r"^(.+?)_paper_"),
		("paper_number_level", r"^(.+?)_paper_\d+_[A-Z]+"),
		("leading_words", r"^([A-Za-z\s_]+?)(?:_|paper|HL|SL|TZ|\d|\.pdf)"),
	]
	.into_iter()
	.map(|(name, pattern)| SubjectRule {
		name,
		pattern: Regex::new(pattern).expect("Subject rule regex must compile."),
	})
	.collect()
});
static NOT_A_SUBJECT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(paper|HL|SL|TZ|\d+)$").expect("Subject rejection regex must compile.")
});
static AUDIO_SUBJECT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(.+?)_(B|ab_initio)_(HL|SL)$").expect("Audio subject regex must compile.")
});

const MAX_SUBJECT_LEN: usize = 100;

pub fn subject_rules() -> &'static [SubjectRule] {
	&SUBJECT_RULES
}

/// Returns the subject and the name of the rule that produced it.
pub fn match_subject(file_name: &str) -> Option<(String, &'static str)> {
	subject_rules().iter().find_map(|rule| {
		let subject = rule.pattern.captures(file_name)?.get(1)?.as_str().trim();

		if subject.is_empty() || subject.len() >= MAX_SUBJECT_LEN || NOT_A_SUBJECT.is_match(subject)
		{
			return None;
		}

		Some((subject.to_string(), rule.name))
	})
}

pub fn subject_from_filename(file_name: &str) -> Option<String> {
	match_subject(file_name).map(|(subject, _)| subject)
}

/// Audio files are named `<Language>_B_<Level>.mp3` or `<Language>_ab_initio_<Level>.mp3`; the whole stem is the subject.
pub fn audio_subject_from_filename(file_name: &str) -> Option<String> {
	let stem = file_name
		.len()
		.checked_sub(4)
		.filter(|&cut| file_name.is_char_boundary(cut) && file_name[cut..].eq_ignore_ascii_case(".mp3"))
		.map(|cut| &file_name[..cut])?;

	AUDIO_SUBJECT.is_match(stem).then(|| stem.to_string())
}
