//! Subject matching against file names, including A/B variant isolation.

use std::sync::LazyLock;

use regex::Regex;

use crate::language;

static VARIANT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)^(.+?)[\s_]+([ab])[\s_]*$").expect("Variant regex must compile.")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
	A,
	B,
}
impl Variant {
	fn letter(self) -> char {
		match self {
			Self::A => 'a',
			Self::B => 'b',
		}
	}

	fn other(self) -> Self {
		match self {
			Self::A => Self::B,
			Self::B => Self::A,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectSpec {
	pub base: String,
	pub variant: Option<Variant>,
}

/// Splits "French B" or "French_B" into its base subject and variant letter. Only language
/// subjects have variants; "Economics B" stays a plain subject.
pub fn split_variant(subject: &str) -> SubjectSpec {
	let trimmed = subject.trim();
	let captures = VARIANT.captures(trimmed).filter(|captures| {
		captures.get(1).is_some_and(|base| language::mentions_language(base.as_str()))
	});

	match captures {
		Some(captures) => {
			let base = captures.get(1).map(|m| m.as_str().trim()).unwrap_or_default().to_string();
			let variant = match captures.get(2).map(|m| m.as_str()) {
				Some("a" | "A") => Variant::A,
				_ => Variant::B,
			};

			SubjectSpec { base, variant: Some(variant) }
		},
		None => SubjectSpec { base: trimmed.to_string(), variant: None },
	}
}

/// Lowercases a file or subject name and folds spaces into underscores.
pub fn normalize_name(name: &str) -> String {
	name.trim().to_lowercase().replace(' ', "_")
}

/// Name fragments that select a variant remotely, before the post-filter narrows further.
pub fn variant_fragments(base: &str, variant: Variant) -> Vec<String> {
	let upper = variant.letter().to_ascii_uppercase();
	let lower = variant.letter();
	let underscored = base.trim().replace(' ', "_");
	let spaced = base.trim().replace('_', " ");

	vec![
		format!("{underscored}_{upper}_"),
		format!("{spaced} {upper} "),
		format!("{underscored}_{lower}_"),
		format!("{spaced} {lower} "),
	]
}

/// Name fragments for a subject without a variant letter.
pub fn subject_fragments(subject: &str) -> Vec<String> {
	let trimmed = subject.trim();

	vec![trimmed.to_string(), proper_case(trimmed), trimmed.replace(' ', "_")]
}

/// Keeps a file only when it starts with the base subject and carries exactly the requested variant.
pub fn matches_variant(file_name: &str, base: &str, variant: Variant) -> bool {
	let name = normalize_name(file_name);
	let base = normalize_name(base);

	name.starts_with(&base)
		&& has_variant_marker(&name, &base, variant)
		&& !has_variant_marker(&name, &base, variant.other())
}

/// Keeps a file whose name starts with the subject as a whole token and is not a lettered variant of it.
pub fn matches_subject(file_name: &str, subject: &str) -> bool {
	let name = normalize_name(file_name);
	let subject = normalize_name(subject);
	let Some(rest) = name.strip_prefix(&subject) else {
		return false;
	};

	if rest.is_empty() {
		return true;
	}
	if !rest.starts_with(['_', '.', '-']) {
		return false;
	}

	let next = rest.split(['_', '.', '-']).find(|token| !token.is_empty()).unwrap_or_default();

	!matches!(next, "a" | "b" | "ab")
}

fn has_variant_marker(name: &str, base: &str, variant: Variant) -> bool {
	let marker = format!("{base}_{}", variant.letter());

	name.match_indices(&marker).any(|(index, _)| {
		matches!(name[index + marker.len()..].chars().next(), None | Some('_' | '.' | '-'))
	})
}

fn proper_case(raw: &str) -> String {
	raw.split(' ')
		.map(|word| {
			let mut chars = word.chars();

			match chars.next() {
				Some(first) =>
					first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
				None => String::new(),
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_variant_with_space_or_underscore() {
		assert_eq!(
			split_variant("French B"),
			SubjectSpec { base: "French".to_string(), variant: Some(Variant::B) }
		);
		assert_eq!(
			split_variant("Spanish_a"),
			SubjectSpec { base: "Spanish".to_string(), variant: Some(Variant::A) }
		);
		assert_eq!(
			split_variant("Arabic_ab_initio"),
			SubjectSpec { base: "Arabic_ab_initio".to_string(), variant: None }
		);
		assert_eq!(split_variant("Arab").variant, None);
		assert_eq!(
			split_variant("Economics B"),
			SubjectSpec { base: "Economics B".to_string(), variant: None }
		);
		assert_eq!(
			split_variant("English Language A"),
			SubjectSpec { base: "English Language".to_string(), variant: Some(Variant::A) }
		);
	}

	#[test]
	fn variant_filter_isolates_b_from_a() {
		assert!(matches_variant("French_B_paper_1_TZ1_HL.pdf", "French", Variant::B));
		assert!(matches_variant("French B paper 2 HL.pdf", "French", Variant::B));
		assert!(!matches_variant("French_A_paper_1_HL.pdf", "French", Variant::B));
		assert!(!matches_variant("Old_French_B_paper_1.pdf", "French", Variant::B));
		assert!(!matches_variant("French_Bx_paper_1.pdf", "French", Variant::B));
	}

	#[test]
	fn bare_subject_excludes_lettered_variants() {
		assert!(matches_subject("Spanish_paper_1_HL.pdf", "Spanish"));
		assert!(!matches_subject("Spanish_B_paper_1_HL.pdf", "Spanish"));
		assert!(!matches_subject("Spanish_ab_initio_paper_1_SL.pdf", "Spanish"));
		assert!(!matches_subject("Spanishx_paper_1.pdf", "Spanish"));
		assert!(matches_subject("Global politics paper 1.pdf", "Global_politics"));
	}

	#[test]
	fn fragments_cover_both_separators() {
		assert_eq!(
			variant_fragments("French", Variant::B),
			vec!["French_B_", "French B ", "French_b_", "French b "]
		);
		assert_eq!(subject_fragments("global politics"), vec![
			"global politics",
			"Global Politics",
			"global_politics"
		]);
	}
}
