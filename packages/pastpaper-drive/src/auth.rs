use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::{Error, Result};

/// Supplies the bearer token for remote calls. Minting and refreshing tokens happens elsewhere.
pub trait TokenSource
where
	Self: Send + Sync,
{
	fn bearer_token(&self) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StaticToken(Option<String>);
impl StaticToken {
	pub fn new(token: Option<String>) -> Self {
		Self(token.filter(|token| !token.trim().is_empty()))
	}
}
impl TokenSource for StaticToken {
	fn bearer_token(&self) -> Option<String> {
		self.0.clone()
	}
}

pub fn auth_headers(tokens: &dyn TokenSource) -> Result<HeaderMap> {
	let token = tokens.bearer_token().ok_or(Error::MissingCredential)?;
	let mut headers = HeaderMap::new();

	headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);

	Ok(headers)
}
