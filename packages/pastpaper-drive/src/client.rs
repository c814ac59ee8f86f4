use std::{sync::Arc, time::Duration};

use reqwest::{Client, Response, StatusCode, header::CONTENT_TYPE};

use crate::{
	DriveItem, Error, FileContent, Query, Result,
	auth::{self, StaticToken, TokenSource},
	model::FileList,
};

const ITEM_FIELDS: &str =
	"id, name, mimeType, size, createdTime, modifiedTime, parents, webViewLink, trashed";

pub struct DriveClient {
	http: Client,
	api_base: String,
	page_size: u32,
	tokens: Arc<dyn TokenSource>,
}
impl DriveClient {
	pub fn new(cfg: &pastpaper_config::Drive) -> Result<Self> {
		Self::with_token_source(cfg, Arc::new(StaticToken::new(cfg.access_token.clone())))
	}

	pub fn with_token_source(
		cfg: &pastpaper_config::Drive,
		tokens: Arc<dyn TokenSource>,
	) -> Result<Self> {
		let http = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;

		Ok(Self {
			http,
			api_base: cfg.api_base.trim_end_matches('/').to_string(),
			page_size: cfg.page_size,
			tokens,
		})
	}

	/// Lists every item matching `query`, following page tokens until the remote runs out.
	pub async fn list(&self, query: &Query) -> Result<Vec<DriveItem>> {
		let url = format!("{}/files", self.api_base);
		let q = query.render();
		let fields = format!("nextPageToken, files({ITEM_FIELDS})");
		let page_size = self.page_size.to_string();
		let mut items = Vec::new();
		let mut page_token: Option<String> = None;

		loop {
			let mut params: Vec<(&str, &str)> = vec![
				("fields", fields.as_str()),
				("orderBy", "name"),
				("pageSize", page_size.as_str()),
				("supportsAllDrives", "true"),
				("includeItemsFromAllDrives", "true"),
			];

			if !q.is_empty() {
				params.push(("q", q.as_str()));
			}
			if let Some(token) = page_token.as_deref() {
				params.push(("pageToken", token));
			}

			let res = self
				.http
				.get(&url)
				.headers(auth::auth_headers(self.tokens.as_ref())?)
				.query(&params)
				.send()
				.await?;
			let page: FileList = check_status(res).await?.json().await?;

			tracing::trace!(count = page.files.len(), "Fetched listing page.");

			items.extend(page.files);

			match page.next_page_token {
				Some(token) if page_token.as_deref() == Some(token.as_str()) => {
					return Err(Error::InvalidResponse {
						message: format!("Remote repeated page token {token}."),
					});
				},
				Some(token) if !token.is_empty() => page_token = Some(token),
				_ => break,
			}
		}

		Ok(items)
	}

	/// Metadata for one file, or `None` when the remote does not know the id.
	pub async fn file(&self, file_id: &str) -> Result<Option<DriveItem>> {
		let url = format!("{}/files/{file_id}", self.api_base);
		let res = self
			.http
			.get(url)
			.headers(auth::auth_headers(self.tokens.as_ref())?)
			.query(&[("fields", ITEM_FIELDS), ("supportsAllDrives", "true")])
			.send()
			.await?;

		if res.status() == StatusCode::NOT_FOUND {
			return Ok(None);
		}

		Ok(Some(check_status(res).await?.json().await?))
	}

	pub async fn content(&self, file_id: &str) -> Result<Option<FileContent>> {
		let url = format!("{}/files/{file_id}", self.api_base);
		let res = self
			.http
			.get(url)
			.headers(auth::auth_headers(self.tokens.as_ref())?)
			.query(&[("alt", "media"), ("supportsAllDrives", "true")])
			.send()
			.await?;

		if res.status() == StatusCode::NOT_FOUND {
			return Ok(None);
		}

		let res = check_status(res).await?;
		let content_type = res
			.headers()
			.get(CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
			.unwrap_or("application/octet-stream")
			.to_string();
		let bytes = res.bytes().await?.to_vec();

		Ok(Some(FileContent { content_type, bytes }))
	}
}

async fn check_status(res: Response) -> Result<Response> {
	let status = res.status();

	if status.is_success() {
		return Ok(res);
	}
	if status == StatusCode::UNAUTHORIZED {
		return Err(Error::MissingCredential);
	}

	let body = res.text().await.unwrap_or_default();

	Err(Error::Status { status: status.as_u16(), body })
}
