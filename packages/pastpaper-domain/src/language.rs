//! Language names as they appear in subject and file names.

use std::sync::LazyLock;

use regex::Regex;

/// Languages recognised as tokens inside file names.
pub const LANGUAGES: [&str; 30] = [
	"french",
	"spanish",
	"german",
	"chinese",
	"japanese",
	"korean",
	"arabic",
	"russian",
	"portuguese",
	"italian",
	"dutch",
	"swedish",
	"norwegian",
	"danish",
	"finnish",
	"polish",
	"czech",
	"hungarian",
	"romanian",
	"bulgarian",
	"greek",
	"turkish",
	"hebrew",
	"hindi",
	"bengali",
	"thai",
	"vietnamese",
	"indonesian",
	"malay",
	"filipino",
];

const ABBREVIATIONS: [(&str, &str); 31] = [
	("eng", "English"),
	("fr", "French"),
	("sp", "Spanish"),
	("ger", "German"),
	("chi", "Chinese"),
	("jap", "Japanese"),
	("kor", "Korean"),
	("ara", "Arabic"),
	("rus", "Russian"),
	("por", "Portuguese"),
	("ita", "Italian"),
	("dut", "Dutch"),
	("swe", "Swedish"),
	("nor", "Norwegian"),
	("dan", "Danish"),
	("fin", "Finnish"),
	("pol", "Polish"),
	("cze", "Czech"),
	("hun", "Hungarian"),
	("rom", "Romanian"),
	("bul", "Bulgarian"),
	("gre", "Greek"),
	("tur", "Turkish"),
	("heb", "Hebrew"),
	("hin", "Hindi"),
	("ben", "Bengali"),
	("tha", "Thai"),
	("vie", "Vietnamese"),
	("ind", "Indonesian"),
	("may", "Malay"),
	("fil", "Filipino"),
];

// Tried in order; the first suffix that matches decides the course.
static COURSE_SUFFIXES: LazyLock<[(Regex, CourseKind); 3]> = LazyLock::new(|| {
	[
		(r"(?i)[\s_]+language[\s_]+b[\s_]*$", CourseKind::LanguageB),
		(r"(?i)[\s_]+ab[\s_]initio[\s_]*$", CourseKind::AbInitio),
		(r"(?i)[\s_]+b[\s_]*$", CourseKind::LanguageB),
	]
	.map(|(pattern, kind)| {
		(Regex::new(pattern).expect("Course suffix regex must compile."), kind)
	})
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CourseKind {
	LanguageB,
	AbInitio,
}

/// A second-language course, e.g. "French B" or "Arabic ab initio".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageCourse {
	pub language: String,
	pub kind: CourseKind,
}

pub fn is_language_token(token: &str) -> bool {
	let lower = token.to_lowercase();

	LANGUAGES.contains(&lower.as_str())
}

/// True when any word of a subject names a language, English included.
pub fn mentions_language(subject: &str) -> bool {
	subject
		.split([' ', '_'])
		.any(|token| token.eq_ignore_ascii_case("english") || is_language_token(token))
}

/// Maps a bare language name or abbreviation to its display form.
pub fn canonical_language(raw: &str) -> Option<String> {
	let lower = raw.trim().to_lowercase();

	if let Some((_, full)) = ABBREVIATIONS.iter().find(|(abbr, _)| *abbr == lower) {
		return Some((*full).to_string());
	}
	if lower == "english" || LANGUAGES.contains(&lower.as_str()) {
		return Some(capitalize(&lower));
	}

	None
}

/// Strips the course suffix from a subject and normalises what remains into a language name.
pub fn extract_language_name(subject: &str) -> String {
	let trimmed = subject.trim();
	let base = split_course(trimmed).map(|(base, _)| base).unwrap_or(trimmed);

	canonical_language(base).unwrap_or_else(|| capitalize(base.trim()))
}

/// The course a subject names, when it carries a course suffix and the language is known.
pub fn language_course(subject: &str) -> Option<LanguageCourse> {
	let (_, kind) = split_course(subject.trim())?;
	let language = canonical_language(&extract_language_name(subject))?;

	Some(LanguageCourse { language, kind })
}

fn split_course(subject: &str) -> Option<(&str, CourseKind)> {
	COURSE_SUFFIXES.iter().find_map(|(suffix, kind)| {
		let found = suffix.find(subject)?;

		Some((&subject[..found.start()], *kind))
	})
}

fn capitalize(raw: &str) -> String {
	let mut chars = raw.chars();

	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
		None => String::new(),
	}
}
