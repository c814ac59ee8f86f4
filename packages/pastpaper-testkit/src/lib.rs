//! In-memory remote store and fixtures shared by service and API tests.

use std::{
	collections::HashMap,
	sync::{
		Mutex,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use pastpaper_config::{Catalog, Config, Drive, Proxy, Service};
use pastpaper_drive::{
	BoxFuture, DriveItem, Error, FOLDER_MIME_TYPE, FileContent, PDF_MIME_TYPE, Query, RemoteStore,
	Result,
};

pub const ROOT_FOLDER_ID: &str = "root";

/// How listings whose rendered query contains a fragment should fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Failure {
	Status(u16),
	MissingCredential,
	Stall(Duration),
}

#[derive(Default)]
struct State {
	items: Vec<DriveItem>,
	contents: HashMap<String, FileContent>,
	failures: Vec<(String, Failure)>,
	queries: Vec<String>,
}

/// A folder tree held in memory. Listings are answered by evaluating the [`Query`] locally.
pub struct FakeDrive {
	state: Mutex<State>,
	list_calls: AtomicUsize,
	next_id: AtomicUsize,
}
impl FakeDrive {
	pub fn new() -> Self {
		Self {
			state: Mutex::new(State::default()),
			list_calls: AtomicUsize::new(0),
			next_id: AtomicUsize::new(1),
		}
	}

	pub fn add_folder(&self, parent_id: &str, name: &str) -> String {
		self.insert(parent_id, name, FOLDER_MIME_TYPE)
	}

	pub fn add_pdf(&self, parent_id: &str, name: &str) -> String {
		self.insert(parent_id, name, PDF_MIME_TYPE)
	}

	pub fn add_file(&self, parent_id: &str, name: &str, mime_type: &str) -> String {
		self.insert(parent_id, name, mime_type)
	}

	/// Creates `root/<year>/<month>/<group>` as needed and returns the group folder id.
	pub fn add_group(&self, year: &str, month: &str, group: &str) -> String {
		self.ensure_path(&[year, month, group])
	}

	/// Creates the folder chain below the root as needed and returns the id of the last folder.
	pub fn ensure_path(&self, names: &[&str]) -> String {
		names
			.iter()
			.fold(ROOT_FOLDER_ID.to_string(), |parent, name| self.ensure_folder(&parent, name))
	}

	pub fn set_content(&self, file_id: &str, content_type: &str, bytes: &[u8]) {
		let mut state = self.lock();

		state.contents.insert(
			file_id.to_string(),
			FileContent { content_type: content_type.to_string(), bytes: bytes.to_vec() },
		);
	}

	pub fn trash(&self, file_id: &str) {
		let mut state = self.lock();

		if let Some(item) = state.items.iter_mut().find(|item| item.id == file_id) {
			item.trashed = true;
		}
	}

	/// Every listing whose rendered query contains `fragment` fails; an empty fragment fails them all.
	pub fn fail_listings(&self, fragment: &str, failure: Failure) {
		self.lock().failures.push((fragment.to_string(), failure));
	}

	/// Lets every listing succeed again.
	pub fn clear_failures(&self) {
		self.lock().failures.clear();
	}

	pub fn list_calls(&self) -> usize {
		self.list_calls.load(Ordering::SeqCst)
	}

	pub fn reset_calls(&self) {
		self.list_calls.store(0, Ordering::SeqCst);
		self.lock().queries.clear();
	}

	/// Rendered queries in the order they were received.
	pub fn queries(&self) -> Vec<String> {
		self.lock().queries.clone()
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, State> {
		self.state.lock().unwrap_or_else(|err| err.into_inner())
	}

	fn insert(&self, parent_id: &str, name: &str, mime_type: &str) -> String {
		let id = format!("item-{}", self.next_id.fetch_add(1, Ordering::SeqCst));

		self.lock().items.push(DriveItem {
			id: id.clone(),
			name: name.to_string(),
			mime_type: mime_type.to_string(),
			size: Some(1_024),
			parents: vec![parent_id.to_string()],
			..Default::default()
		});

		id
	}

	fn ensure_folder(&self, parent_id: &str, name: &str) -> String {
		let existing = self
			.lock()
			.items
			.iter()
			.find(|item| {
				item.is_folder() && item.name == name && item.parents.iter().any(|p| p == parent_id)
			})
			.map(|item| item.id.clone());

		existing.unwrap_or_else(|| self.add_folder(parent_id, name))
	}

	async fn answer(&self, query: &Query) -> Result<Vec<DriveItem>> {
		let rendered = query.render();

		self.list_calls.fetch_add(1, Ordering::SeqCst);

		let failure = {
			let mut state = self.lock();

			state.queries.push(rendered.clone());
			state
				.failures
				.iter()
				.find(|(fragment, _)| rendered.contains(fragment.as_str()))
				.map(|(_, failure)| failure.clone())
		};

		match failure {
			Some(Failure::Status(status)) =>
				return Err(Error::Status { status, body: "injected failure".to_string() }),
			Some(Failure::MissingCredential) => return Err(Error::MissingCredential),
			Some(Failure::Stall(delay)) => tokio::time::sleep(delay).await,
			None => {},
		}

		let state = self.lock();
		let mut items: Vec<DriveItem> =
			state.items.iter().filter(|item| query.matches(item)).cloned().collect();

		items.sort_by(|a, b| a.name.cmp(&b.name));

		Ok(items)
	}
}
impl Default for FakeDrive {
	fn default() -> Self {
		Self::new()
	}
}

impl RemoteStore for FakeDrive {
	fn list<'a>(&'a self, query: &'a Query) -> BoxFuture<'a, Result<Vec<DriveItem>>> {
		Box::pin(self.answer(query))
	}

	fn file<'a>(&'a self, file_id: &'a str) -> BoxFuture<'a, Result<Option<DriveItem>>> {
		Box::pin(async move {
			Ok(self.lock().items.iter().find(|item| item.id == file_id && !item.trashed).cloned())
		})
	}

	fn content<'a>(&'a self, file_id: &'a str) -> BoxFuture<'a, Result<Option<FileContent>>> {
		Box::pin(async move { Ok(self.lock().contents.get(file_id).cloned()) })
	}
}

/// A configuration pointing at [`ROOT_FOLDER_ID`] with a short listing budget.
pub fn test_config() -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "debug".to_string() },
		drive: Drive {
			api_base: "http://127.0.0.1:9".to_string(),
			root_folder_id: ROOT_FOLDER_ID.to_string(),
			access_token: Some("test-token".to_string()),
			page_size: 100,
			timeout_ms: 1_000,
			list_timeout_ms: 2_000,
		},
		catalog: Catalog::default(),
		proxy: Proxy::default(),
	}
}
