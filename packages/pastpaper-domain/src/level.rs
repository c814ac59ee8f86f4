use crate::request::Level;

const SHARED_LEVEL: &str = "HLSL";

pub fn level_fragments(level: Level) -> Vec<String> {
	vec![level.as_str().to_string(), SHARED_LEVEL.to_string()]
}

fn level_tokens(file_name: &str) -> Vec<String> {
	file_name
		.split(|c: char| !c.is_ascii_alphanumeric())
		.filter(|token| !token.is_empty())
		.map(str::to_ascii_uppercase)
		.filter(|token| matches!(token.as_str(), "HL" | "SL" | SHARED_LEVEL))
		.collect()
}

/// Music files may carry the requested level, the shared marker, or no level at all.
pub fn matches_music_level(file_name: &str, level: Level) -> bool {
	let tokens = level_tokens(file_name);

	tokens.is_empty() || tokens.iter().any(|token| token == level.as_str() || token == SHARED_LEVEL)
}

/// Level check for supplementary files, which must name a level.
pub fn mentions_level(file_name: &str, level: Level) -> bool {
	let tokens = level_tokens(file_name);

	tokens.iter().any(|token| token == level.as_str() || token == SHARED_LEVEL)
}
